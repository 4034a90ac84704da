//! The single input session handed to the host.
//!
//! [`ForwardingSession`] implements [`InputSession`] by turning every method
//! into a [`SessionCall`] and routing it through a shared [`InputDemuxer`].
//! The demultiplexer lock is released before the resolved endpoint runs, so
//! an endpoint may call back into the demultiplexer (for instance to move
//! focus) without deadlocking.

use crate::call::{SessionCall, SessionReply};
use crate::demuxer::InputDemuxer;
use crate::session::{
    CommandData, CompletionInfo, CorrectionInfo, EditorAction, ExtractedText,
    ExtractedTextRequest, InputSession, KeyEvent,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Demultiplexer shared between the host callbacks and the forwarding session.
pub type SharedDemuxer = Arc<Mutex<InputDemuxer>>;

/// Wrap a demultiplexer for sharing.
pub fn shared(demuxer: InputDemuxer) -> SharedDemuxer {
    Arc::new(Mutex::new(demuxer))
}

/// Input session whose every operation goes to the currently focused target.
#[derive(Clone)]
pub struct ForwardingSession {
    demuxer: SharedDemuxer,
}

impl ForwardingSession {
    pub fn new(demuxer: SharedDemuxer) -> Self {
        Self { demuxer }
    }

    pub fn demuxer(&self) -> &SharedDemuxer {
        &self.demuxer
    }

    /// Route `call` to the active endpoint.
    pub fn dispatch(&self, call: SessionCall) -> SessionReply {
        // Resolve under the lock, call without it.
        let endpoint = self.demuxer.lock().resolve_active_endpoint();
        match endpoint {
            Some(endpoint) => call.apply(endpoint.as_ref()),
            None => {
                log::debug!("No input endpoint for {}, ignoring", call.name());
                call.neutral_reply()
            }
        }
    }
}

impl InputSession for ForwardingSession {
    fn text_before_cursor(&self, n: usize, flags: u32) -> Option<String> {
        self.dispatch(SessionCall::TextBeforeCursor { n, flags })
            .into_text()
    }

    fn text_after_cursor(&self, n: usize, flags: u32) -> Option<String> {
        self.dispatch(SessionCall::TextAfterCursor { n, flags })
            .into_text()
    }

    fn selected_text(&self, flags: u32) -> Option<String> {
        self.dispatch(SessionCall::SelectedText { flags }).into_text()
    }

    fn cursor_caps_mode(&self, req_modes: u32) -> u32 {
        self.dispatch(SessionCall::CursorCapsMode { req_modes })
            .into_caps_mode()
    }

    fn extracted_text(&self, request: &ExtractedTextRequest, flags: u32) -> Option<ExtractedText> {
        self.dispatch(SessionCall::ExtractedText {
            request: *request,
            flags,
        })
        .into_extracted()
    }

    fn delete_surrounding_text(&self, before: usize, after: usize) -> bool {
        self.dispatch(SessionCall::DeleteSurroundingText { before, after })
            .into_flag()
    }

    fn set_composing_text(&self, text: &str, new_cursor_position: i32) -> bool {
        self.dispatch(SessionCall::SetComposingText {
            text: text.to_string(),
            new_cursor_position,
        })
        .into_flag()
    }

    fn set_composing_region(&self, start: i32, end: i32) -> bool {
        self.dispatch(SessionCall::SetComposingRegion { start, end })
            .into_flag()
    }

    fn finish_composing_text(&self) -> bool {
        self.dispatch(SessionCall::FinishComposingText).into_flag()
    }

    fn commit_text(&self, text: &str, new_cursor_position: i32) -> bool {
        self.dispatch(SessionCall::CommitText {
            text: text.to_string(),
            new_cursor_position,
        })
        .into_flag()
    }

    fn commit_completion(&self, completion: &CompletionInfo) -> bool {
        self.dispatch(SessionCall::CommitCompletion(completion.clone()))
            .into_flag()
    }

    fn commit_correction(&self, correction: &CorrectionInfo) -> bool {
        self.dispatch(SessionCall::CommitCorrection(correction.clone()))
            .into_flag()
    }

    fn set_selection(&self, start: i32, end: i32) -> bool {
        self.dispatch(SessionCall::SetSelection { start, end })
            .into_flag()
    }

    fn perform_editor_action(&self, action: EditorAction) -> bool {
        self.dispatch(SessionCall::PerformEditorAction(action))
            .into_flag()
    }

    fn perform_context_menu_action(&self, id: u32) -> bool {
        self.dispatch(SessionCall::PerformContextMenuAction { id })
            .into_flag()
    }

    fn begin_batch_edit(&self) -> bool {
        self.dispatch(SessionCall::BeginBatchEdit).into_flag()
    }

    fn end_batch_edit(&self) -> bool {
        self.dispatch(SessionCall::EndBatchEdit).into_flag()
    }

    fn send_key_event(&self, event: &KeyEvent) -> bool {
        self.dispatch(SessionCall::SendKeyEvent(event.clone()))
            .into_flag()
    }

    fn clear_meta_key_states(&self, states: u32) -> bool {
        self.dispatch(SessionCall::ClearMetaKeyStates { states })
            .into_flag()
    }

    fn report_fullscreen_mode(&self, enabled: bool) -> bool {
        self.dispatch(SessionCall::ReportFullscreenMode { enabled })
            .into_flag()
    }

    fn perform_private_command(&self, action: &str, data: &CommandData) -> bool {
        self.dispatch(SessionCall::PerformPrivateCommand {
            action: action.to_string(),
            data: data.clone(),
        })
        .into_flag()
    }

    fn request_cursor_updates(&self, mode: u32) -> bool {
        self.dispatch(SessionCall::RequestCursorUpdates { mode })
            .into_flag()
    }

    fn close_connection(&self) {
        self.dispatch(SessionCall::CloseConnection);
    }
}
