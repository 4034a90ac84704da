//! Accessibility events raised by the embedded subsystem.
//!
//! An event is generic over the id type of its sources so that the raw
//! form ([`EmbeddedEvent`]) and the host-facing form ([`HostEvent`]) share
//! one definition.

use crate::ids::{EmbeddedNodeId, HostNodeId};
use serde::{Deserialize, Serialize};

/// Classification of an accessibility event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ViewClicked,
    ViewLongClicked,
    ViewSelected,
    ViewFocused,
    ViewTextChanged,
    ViewTextSelectionChanged,
    ViewScrolled,
    ViewAccessibilityFocused,
    ViewAccessibilityFocusCleared,
    WindowStateChanged,
    WindowContentChanged,
    Announcement,
    /// Any event type without a dedicated variant
    Other(u32),
}

/// One sub-record of an event, with its own source node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub struct EventRecord<I> {
    pub source: I,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_index: Option<u32>,
}

impl<I> EventRecord<I> {
    /// Same record with its source rewritten by `map`.
    pub fn try_map_source<J, E>(
        self,
        map: impl FnOnce(I) -> Result<J, E>,
    ) -> Result<EventRecord<J>, E> {
        let EventRecord {
            source,
            class_name,
            text,
            item_count,
            from_index,
            to_index,
        } = self;
        Ok(EventRecord {
            source: map(source)?,
            class_name,
            text,
            item_count,
            from_index,
            to_index,
        })
    }
}

/// An accessibility event and its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub struct AccessibilityEvent<I> {
    pub kind: EventKind,
    pub source: I,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(default)]
    pub content_change_types: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<EventRecord<I>>,
}

/// Event as raised inside the embedded subsystem.
pub type EmbeddedEvent = AccessibilityEvent<EmbeddedNodeId>;

/// Event as delivered to the host.
pub type HostEvent = AccessibilityEvent<HostNodeId>;

impl<I> AccessibilityEvent<I> {
    pub fn new(kind: EventKind, source: I) -> Self {
        Self {
            kind,
            source,
            class_name: None,
            package_name: None,
            text: Vec::new(),
            content_description: None,
            content_change_types: 0,
            records: Vec::new(),
        }
    }

    /// Rewrite the event source and every record source, stopping at the
    /// first source `map_source` rejects.
    ///
    /// `map_source` receives `None` for the event source and the record
    /// index for records.
    pub fn try_map_sources<J, E, F>(self, mut map_source: F) -> Result<AccessibilityEvent<J>, E>
    where
        F: FnMut(Option<usize>, I) -> Result<J, E>,
    {
        let source = map_source(None, self.source)?;
        let records = self
            .records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record.try_map_source(|source| map_source(Some(index), source))
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(AccessibilityEvent {
            kind: self.kind,
            source,
            class_name: self.class_name,
            package_name: self.package_name,
            text: self.text,
            content_description: self.content_description,
            content_change_types: self.content_change_types,
            records,
        })
    }
}
