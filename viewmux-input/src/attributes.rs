//! Negotiation parameters exchanged when an input session is created.

/// Editor attributes negotiated during the session creation handshake.
///
/// The host fills these in when it creates an input session. Targets that
/// are materialized later receive the most recently observed set, so their
/// endpoint matches what the input method was told about the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorAttributes {
    /// Content type and variation bitmask of the field
    pub input_type: u32,
    /// Input method options (action button, no-extract, ...)
    pub ime_options: u32,
    pub initial_selection_start: i32,
    pub initial_selection_end: i32,
    pub initial_caps_mode: u32,
    pub hint_text: Option<String>,
    pub field_name: Option<String>,
    pub private_ime_options: Option<String>,
}
