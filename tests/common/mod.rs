//! Shared integration test helpers for viewmux.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{sample_fixture, RecordingEditor};
//! ```
//!
//! Rust integration tests use `mod common;` to bring in helpers from
//! `tests/common/mod.rs`. `#![allow(dead_code)]` suppresses warnings when
//! only a subset of helpers is used per file.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use viewmux::TreeFixture;
use viewmux::a11y::{EventSink, HostEvent};
use viewmux::config::Config;
use viewmux::input::{
    CommandData, CompletionInfo, CorrectionInfo, EditorAction, EditorAttributes, ExtractedText,
    ExtractedTextRequest, InputSession, KeyEvent, TargetHandle,
};

/// A login form: a label (10) for an edit field (11) with one inner view
/// (20), and a button (12). The last event names a node that does not
/// exist.
pub const SAMPLE_FIXTURE: &str = r#"
root: 1
nodes:
  - id: 1
    children: [10, 11, 12]
    attributes:
      class_name: android.widget.LinearLayout
      bounds_in_parent: { left: 0, top: 0, right: 400, bottom: 300 }
      bounds_in_screen: { left: 0, top: 100, right: 400, bottom: 400 }
  - id: 10
    attributes:
      class_name: android.widget.TextView
      text: Email
      bounds_in_parent: { left: 10, top: 10, right: 390, bottom: 40 }
    relations: { label_for: 11, traversal_before: 11 }
  - id: 11
    children: [20]
    attributes:
      class_name: android.widget.EditText
      hint_text: you@example.com
      input_type: 33
      flags: { editable: true, focusable: true }
    relations: { labeled_by: 10, traversal_after: 10 }
  - id: 12
    attributes:
      class_name: android.widget.Button
      text: Sign in
      flags: { clickable: true }
      actions: [{ id: 16 }]
  - id: 20
    attributes:
      class_name: android.view.View
events:
  - kind: view_focused
    source: 11
  - kind: view_text_changed
    source: 11
    text: [a]
    records:
      - source: 20
        item_count: 1
  - kind: view_clicked
    source: 99
"#;

/// Parse [`SAMPLE_FIXTURE`].
pub fn sample_fixture() -> Arc<TreeFixture> {
    Arc::new(TreeFixture::from_yaml(SAMPLE_FIXTURE).expect("sample fixture should parse"))
}

/// Write `contents` to `name` inside a fresh temp dir.
///
/// The `TempDir` must be kept alive for as long as the file is used.
pub fn write_temp_file(name: &str, contents: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write temp file");
    (path, temp_dir)
}

/// Default config with a temp dir for save/load tests.
pub fn default_config_with_tmp_dir() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    (Config::default(), temp_dir)
}

/// Editor endpoint that records committed text.
pub struct RecordingEditor {
    pub name: &'static str,
    pub committed: Mutex<Vec<String>>,
}

impl RecordingEditor {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            committed: Mutex::new(Vec::new()),
        })
    }

    pub fn committed(&self) -> Vec<String> {
        self.committed.lock().clone()
    }
}

impl InputSession for RecordingEditor {
    fn text_before_cursor(&self, _n: usize, _flags: u32) -> Option<String> {
        Some(self.committed.lock().concat())
    }
    fn text_after_cursor(&self, _n: usize, _flags: u32) -> Option<String> {
        Some(String::new())
    }
    fn selected_text(&self, _flags: u32) -> Option<String> {
        None
    }
    fn cursor_caps_mode(&self, _req_modes: u32) -> u32 {
        0
    }
    fn extracted_text(
        &self,
        _request: &ExtractedTextRequest,
        _flags: u32,
    ) -> Option<ExtractedText> {
        Some(ExtractedText {
            text: self.committed.lock().concat(),
            ..ExtractedText::default()
        })
    }
    fn delete_surrounding_text(&self, _before: usize, _after: usize) -> bool {
        true
    }
    fn set_composing_text(&self, _text: &str, _new_cursor_position: i32) -> bool {
        true
    }
    fn set_composing_region(&self, _start: i32, _end: i32) -> bool {
        true
    }
    fn finish_composing_text(&self) -> bool {
        true
    }
    fn commit_text(&self, text: &str, _new_cursor_position: i32) -> bool {
        self.committed.lock().push(text.to_string());
        true
    }
    fn commit_completion(&self, completion: &CompletionInfo) -> bool {
        self.committed.lock().push(completion.text.clone());
        true
    }
    fn commit_correction(&self, _correction: &CorrectionInfo) -> bool {
        true
    }
    fn set_selection(&self, _start: i32, _end: i32) -> bool {
        true
    }
    fn perform_editor_action(&self, _action: EditorAction) -> bool {
        true
    }
    fn perform_context_menu_action(&self, _id: u32) -> bool {
        true
    }
    fn begin_batch_edit(&self) -> bool {
        true
    }
    fn end_batch_edit(&self) -> bool {
        true
    }
    fn send_key_event(&self, _event: &KeyEvent) -> bool {
        true
    }
    fn clear_meta_key_states(&self, _states: u32) -> bool {
        true
    }
    fn report_fullscreen_mode(&self, _enabled: bool) -> bool {
        true
    }
    fn perform_private_command(&self, _action: &str, _data: &CommandData) -> bool {
        true
    }
    fn request_cursor_updates(&self, _mode: u32) -> bool {
        true
    }
    fn close_connection(&self) {}
}

/// Focusable target backed by a [`RecordingEditor`].
pub struct EditorTarget {
    pub editor: Arc<RecordingEditor>,
    pub seen: Mutex<Vec<EditorAttributes>>,
}

impl EditorTarget {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            editor: RecordingEditor::new(name),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl TargetHandle for EditorTarget {
    fn produce_endpoint(&self, attributes: &EditorAttributes) -> Option<Arc<dyn InputSession>> {
        self.seen.lock().push(attributes.clone());
        Some(Arc::clone(&self.editor) as Arc<dyn InputSession>)
    }
}

/// Event sink that keeps every delivered event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<HostEvent>>,
}

impl EventSink for RecordingSink {
    fn send_event(&self, event: HostEvent) -> bool {
        self.events.lock().push(event);
        true
    }
}
