//! Accessibility node data model.
//!
//! [`NodeData`] is what the embedded subsystem reports for one of its nodes;
//! [`TranslatedNode`] is what the host receives after every relationship has
//! been rewritten into host ids.

use crate::ids::{EmbeddedNodeId, HostNodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value extras attached to nodes and actions.
pub type Extras = BTreeMap<String, String>;

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Translate the rectangle by `(dx, dy)`.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Boolean node state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeFlags {
    pub accessibility_focused: bool,
    pub can_open_popup: bool,
    pub checkable: bool,
    pub checked: bool,
    pub clickable: bool,
    pub content_invalid: bool,
    pub context_clickable: bool,
    pub dismissable: bool,
    pub editable: bool,
    pub enabled: bool,
    pub focusable: bool,
    pub focused: bool,
    pub important_for_accessibility: bool,
    pub long_clickable: bool,
    pub multi_line: bool,
    pub password: bool,
    pub scrollable: bool,
    pub selected: bool,
    pub showing_hint_text: bool,
    pub visible_to_user: bool,
}

/// Shape of a list or grid container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionInfo {
    pub row_count: i32,
    pub column_count: i32,
    pub hierarchical: bool,
    pub selection_mode: u32,
}

/// Position of an item inside a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionItemInfo {
    pub row_index: i32,
    pub row_span: i32,
    pub column_index: i32,
    pub column_span: i32,
    pub heading: bool,
    pub selected: bool,
}

/// Value range of a slider-like node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeInfo {
    pub kind: u32,
    pub min: f32,
    pub max: f32,
    pub current: f32,
}

/// An action a node advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAction {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl NodeAction {
    /// Action id for moving accessibility focus onto a node.
    pub const ACCESSIBILITY_FOCUS: u32 = 0x40;

    pub fn new(id: u32) -> Self {
        Self { id, label: None }
    }

    pub fn accessibility_focus() -> Self {
        Self::new(Self::ACCESSIBILITY_FOCUS)
    }
}

/// Node attributes that cross the bridge unchanged (apart from geometry).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub flags: NodeFlags,
    pub input_type: u32,
    pub live_region: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_text_length: Option<u32>,
    pub movement_granularities: u32,
    pub drawing_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_info: Option<CollectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_item_info: Option<CollectionItemInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_info: Option<RangeInfo>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: Extras,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available_extra_data: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NodeAction>,
    pub bounds_in_parent: Rect,
    pub bounds_in_screen: Rect,
}

impl NodeAttributes {
    pub fn has_action(&self, id: u32) -> bool {
        self.actions.iter().any(|a| a.id == id)
    }
}

/// A node as reported by the embedded subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: EmbeddedNodeId,
    /// `None` for the embedded root
    #[serde(default)]
    pub parent: Option<EmbeddedNodeId>,
    #[serde(default)]
    pub attributes: NodeAttributes,
}

/// Ordering and labelling links of an embedded node.
///
/// Not every embedded subsystem exposes these; see
/// [`RelationshipProbe`](crate::provider::RelationshipProbe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeRelations {
    pub traversal_before: Option<EmbeddedNodeId>,
    pub traversal_after: Option<EmbeddedNodeId>,
    pub label_for: Option<EmbeddedNodeId>,
    pub labeled_by: Option<EmbeddedNodeId>,
}

/// Host-facing snapshot of one node.
///
/// Every relationship field holds a host id or is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedNode {
    pub id: HostNodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<HostNodeId>,
    pub children: Vec<HostNodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal_before: Option<HostNodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal_after: Option<HostNodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_for: Option<HostNodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labeled_by: Option<HostNodeId>,
    pub attributes: NodeAttributes,
}

impl TranslatedNode {
    pub(crate) fn new(id: HostNodeId, attributes: NodeAttributes) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            traversal_before: None,
            traversal_after: None,
            label_for: None,
            labeled_by: None,
            attributes,
        }
    }
}
