//! The input session protocol.
//!
//! [`InputSession`] is the fixed operation set a host's text-input machinery
//! expects from whatever currently owns the keyboard: text around the cursor,
//! selection, composition, batch edit markers, key events, editor actions and
//! private commands. Every target endpoint implements it, and so does the
//! [`ForwardingSession`](crate::ForwardingSession) handed to the host.
//!
//! Methods take `&self` because endpoints are shared (`Arc<dyn InputSession>`)
//! between the demultiplexer cache and the host. Implementations keep their
//! mutable editing state behind their own lock.

use std::collections::BTreeMap;

/// Key/value payload attached to a private command.
pub type CommandData = BTreeMap<String, String>;

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
    Multiple,
}

/// A raw key event forwarded to the focused editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    /// Platform key code
    pub key_code: u32,
    /// Modifier bitmask at the time of the event
    pub meta_state: u32,
    pub repeat_count: u32,
}

impl KeyEvent {
    /// Key-down event with no modifiers.
    pub fn down(key_code: u32) -> Self {
        Self {
            action: KeyAction::Down,
            key_code,
            meta_state: 0,
            repeat_count: 0,
        }
    }

    /// Key-up event with no modifiers.
    pub fn up(key_code: u32) -> Self {
        Self {
            action: KeyAction::Up,
            ..Self::down(key_code)
        }
    }
}

/// Editor action requested by the input method (the "enter key" role).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Unspecified,
    None,
    Go,
    Search,
    Send,
    Next,
    Done,
    Previous,
    /// Host-specific action code
    Other(u32),
}

/// Parameters of an extracted-text request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractedTextRequest {
    pub token: i32,
    pub flags: u32,
    pub hint_max_chars: u32,
    pub hint_max_lines: u32,
}

/// Snapshot of the editor text returned for an extracted-text request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText {
    pub text: String,
    pub start_offset: i32,
    pub partial_start_offset: i32,
    pub partial_end_offset: i32,
    pub selection_start: i32,
    pub selection_end: i32,
    pub flags: u32,
}

/// A completion proposed by the input method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionInfo {
    pub id: i64,
    pub position: i32,
    pub text: String,
    pub label: Option<String>,
}

/// An auto-correction applied by the input method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionInfo {
    pub offset: i32,
    pub old_text: String,
    pub new_text: String,
}

/// Operations of one input session.
///
/// Return values follow the host protocol: `false`, `None` or `0` mean the
/// editor did not handle the call.
pub trait InputSession: Send + Sync {
    /// Up to `n` characters before the cursor.
    fn text_before_cursor(&self, n: usize, flags: u32) -> Option<String>;

    /// Up to `n` characters after the cursor.
    fn text_after_cursor(&self, n: usize, flags: u32) -> Option<String>;

    /// The current selection, if any.
    fn selected_text(&self, flags: u32) -> Option<String>;

    /// Capitalization mode in effect at the cursor.
    fn cursor_caps_mode(&self, req_modes: u32) -> u32;

    fn extracted_text(&self, request: &ExtractedTextRequest, flags: u32) -> Option<ExtractedText>;

    /// Delete `before` characters before and `after` characters after the cursor.
    fn delete_surrounding_text(&self, before: usize, after: usize) -> bool;

    fn set_composing_text(&self, text: &str, new_cursor_position: i32) -> bool;

    fn set_composing_region(&self, start: i32, end: i32) -> bool;

    fn finish_composing_text(&self) -> bool;

    fn commit_text(&self, text: &str, new_cursor_position: i32) -> bool;

    fn commit_completion(&self, completion: &CompletionInfo) -> bool;

    fn commit_correction(&self, correction: &CorrectionInfo) -> bool;

    fn set_selection(&self, start: i32, end: i32) -> bool;

    fn perform_editor_action(&self, action: EditorAction) -> bool;

    fn perform_context_menu_action(&self, id: u32) -> bool;

    fn begin_batch_edit(&self) -> bool;

    fn end_batch_edit(&self) -> bool;

    fn send_key_event(&self, event: &KeyEvent) -> bool;

    fn clear_meta_key_states(&self, states: u32) -> bool;

    fn report_fullscreen_mode(&self, enabled: bool) -> bool;

    /// Host- or input-method-specific command with an opaque payload.
    fn perform_private_command(&self, action: &str, data: &CommandData) -> bool;

    fn request_cursor_updates(&self, mode: u32) -> bool;

    /// The input method is done with this session.
    fn close_connection(&self);
}
