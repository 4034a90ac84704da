//! Explicit call/reply representation of the session protocol.
//!
//! Each [`InputSession`] method has one [`SessionCall`] variant owning its
//! arguments. The demultiplexer routes a `SessionCall` to whichever endpoint
//! is active and hands back a [`SessionReply`]; when nothing can serve the
//! call, [`SessionCall::neutral_reply`] supplies the protocol's "not handled"
//! value instead of an error.

use crate::session::{
    CommandData, CompletionInfo, CorrectionInfo, EditorAction, ExtractedText,
    ExtractedTextRequest, InputSession, KeyEvent,
};

/// One session protocol operation together with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    TextBeforeCursor { n: usize, flags: u32 },
    TextAfterCursor { n: usize, flags: u32 },
    SelectedText { flags: u32 },
    CursorCapsMode { req_modes: u32 },
    ExtractedText { request: ExtractedTextRequest, flags: u32 },
    DeleteSurroundingText { before: usize, after: usize },
    SetComposingText { text: String, new_cursor_position: i32 },
    SetComposingRegion { start: i32, end: i32 },
    FinishComposingText,
    CommitText { text: String, new_cursor_position: i32 },
    CommitCompletion(CompletionInfo),
    CommitCorrection(CorrectionInfo),
    SetSelection { start: i32, end: i32 },
    PerformEditorAction(EditorAction),
    PerformContextMenuAction { id: u32 },
    BeginBatchEdit,
    EndBatchEdit,
    SendKeyEvent(KeyEvent),
    ClearMetaKeyStates { states: u32 },
    ReportFullscreenMode { enabled: bool },
    PerformPrivateCommand { action: String, data: CommandData },
    RequestCursorUpdates { mode: u32 },
    CloseConnection,
}

/// Result of a routed [`SessionCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    Text(Option<String>),
    Extracted(Option<ExtractedText>),
    Flag(bool),
    CapsMode(u32),
    Unit,
}

impl SessionReply {
    /// Text payload; any other reply kind reads as "no text".
    pub fn into_text(self) -> Option<String> {
        match self {
            SessionReply::Text(text) => text,
            _ => None,
        }
    }

    pub fn into_extracted(self) -> Option<ExtractedText> {
        match self {
            SessionReply::Extracted(extracted) => extracted,
            _ => None,
        }
    }

    /// Boolean payload; any other reply kind reads as "not handled".
    pub fn into_flag(self) -> bool {
        matches!(self, SessionReply::Flag(true))
    }

    pub fn into_caps_mode(self) -> u32 {
        match self {
            SessionReply::CapsMode(mode) => mode,
            _ => 0,
        }
    }
}

impl SessionCall {
    /// Operation name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCall::TextBeforeCursor { .. } => "text_before_cursor",
            SessionCall::TextAfterCursor { .. } => "text_after_cursor",
            SessionCall::SelectedText { .. } => "selected_text",
            SessionCall::CursorCapsMode { .. } => "cursor_caps_mode",
            SessionCall::ExtractedText { .. } => "extracted_text",
            SessionCall::DeleteSurroundingText { .. } => "delete_surrounding_text",
            SessionCall::SetComposingText { .. } => "set_composing_text",
            SessionCall::SetComposingRegion { .. } => "set_composing_region",
            SessionCall::FinishComposingText => "finish_composing_text",
            SessionCall::CommitText { .. } => "commit_text",
            SessionCall::CommitCompletion(_) => "commit_completion",
            SessionCall::CommitCorrection(_) => "commit_correction",
            SessionCall::SetSelection { .. } => "set_selection",
            SessionCall::PerformEditorAction(_) => "perform_editor_action",
            SessionCall::PerformContextMenuAction { .. } => "perform_context_menu_action",
            SessionCall::BeginBatchEdit => "begin_batch_edit",
            SessionCall::EndBatchEdit => "end_batch_edit",
            SessionCall::SendKeyEvent(_) => "send_key_event",
            SessionCall::ClearMetaKeyStates { .. } => "clear_meta_key_states",
            SessionCall::ReportFullscreenMode { .. } => "report_fullscreen_mode",
            SessionCall::PerformPrivateCommand { .. } => "perform_private_command",
            SessionCall::RequestCursorUpdates { .. } => "request_cursor_updates",
            SessionCall::CloseConnection => "close_connection",
        }
    }

    /// The reply used when no endpoint is available to serve this call.
    pub fn neutral_reply(&self) -> SessionReply {
        match self {
            SessionCall::TextBeforeCursor { .. }
            | SessionCall::TextAfterCursor { .. }
            | SessionCall::SelectedText { .. } => SessionReply::Text(None),
            SessionCall::ExtractedText { .. } => SessionReply::Extracted(None),
            SessionCall::CursorCapsMode { .. } => SessionReply::CapsMode(0),
            SessionCall::CloseConnection => SessionReply::Unit,
            _ => SessionReply::Flag(false),
        }
    }

    /// Perform this call against `endpoint`.
    pub fn apply(&self, endpoint: &dyn InputSession) -> SessionReply {
        match self {
            SessionCall::TextBeforeCursor { n, flags } => {
                SessionReply::Text(endpoint.text_before_cursor(*n, *flags))
            }
            SessionCall::TextAfterCursor { n, flags } => {
                SessionReply::Text(endpoint.text_after_cursor(*n, *flags))
            }
            SessionCall::SelectedText { flags } => {
                SessionReply::Text(endpoint.selected_text(*flags))
            }
            SessionCall::CursorCapsMode { req_modes } => {
                SessionReply::CapsMode(endpoint.cursor_caps_mode(*req_modes))
            }
            SessionCall::ExtractedText { request, flags } => {
                SessionReply::Extracted(endpoint.extracted_text(request, *flags))
            }
            SessionCall::DeleteSurroundingText { before, after } => {
                SessionReply::Flag(endpoint.delete_surrounding_text(*before, *after))
            }
            SessionCall::SetComposingText {
                text,
                new_cursor_position,
            } => SessionReply::Flag(endpoint.set_composing_text(text, *new_cursor_position)),
            SessionCall::SetComposingRegion { start, end } => {
                SessionReply::Flag(endpoint.set_composing_region(*start, *end))
            }
            SessionCall::FinishComposingText => {
                SessionReply::Flag(endpoint.finish_composing_text())
            }
            SessionCall::CommitText {
                text,
                new_cursor_position,
            } => SessionReply::Flag(endpoint.commit_text(text, *new_cursor_position)),
            SessionCall::CommitCompletion(completion) => {
                SessionReply::Flag(endpoint.commit_completion(completion))
            }
            SessionCall::CommitCorrection(correction) => {
                SessionReply::Flag(endpoint.commit_correction(correction))
            }
            SessionCall::SetSelection { start, end } => {
                SessionReply::Flag(endpoint.set_selection(*start, *end))
            }
            SessionCall::PerformEditorAction(action) => {
                SessionReply::Flag(endpoint.perform_editor_action(*action))
            }
            SessionCall::PerformContextMenuAction { id } => {
                SessionReply::Flag(endpoint.perform_context_menu_action(*id))
            }
            SessionCall::BeginBatchEdit => SessionReply::Flag(endpoint.begin_batch_edit()),
            SessionCall::EndBatchEdit => SessionReply::Flag(endpoint.end_batch_edit()),
            SessionCall::SendKeyEvent(event) => SessionReply::Flag(endpoint.send_key_event(event)),
            SessionCall::ClearMetaKeyStates { states } => {
                SessionReply::Flag(endpoint.clear_meta_key_states(*states))
            }
            SessionCall::ReportFullscreenMode { enabled } => {
                SessionReply::Flag(endpoint.report_fullscreen_mode(*enabled))
            }
            SessionCall::PerformPrivateCommand { action, data } => {
                SessionReply::Flag(endpoint.perform_private_command(action, data))
            }
            SessionCall::RequestCursorUpdates { mode } => {
                SessionReply::Flag(endpoint.request_cursor_updates(*mode))
            }
            SessionCall::CloseConnection => {
                endpoint.close_connection();
                SessionReply::Unit
            }
        }
    }
}
