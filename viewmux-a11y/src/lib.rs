//! Accessibility identifier bridge for viewmux.
//!
//! Makes a node tree owned by an embedded subsystem appear to the host as
//! part of its own accessibility tree, addressed by host-owned ids:
//!
//! - [`IdMap`]: paired host ↔ embedded id maps with a monotonic allocator
//! - [`AccessibilityBridge`]: node description, action forwarding and
//!   event translation across the boundary
//! - [`EmbeddedTreeProvider`] / [`RelationshipProbe`] / [`EventSink`]: the
//!   collaborators the bridge talks to

pub mod bridge;
pub mod error;
pub mod event;
pub mod id_map;
pub mod ids;
pub mod node;
pub mod provider;

pub use bridge::{AccessibilityBridge, SharedBridge, shared_bridge};
pub use error::{BridgeError, ProbeError};
pub use event::{AccessibilityEvent, EmbeddedEvent, EventKind, EventRecord, HostEvent};
pub use id_map::IdMap;
pub use ids::{EmbeddedNodeId, HostNodeId};
pub use node::{
    CollectionInfo, CollectionItemInfo, Extras, NodeAction, NodeAttributes, NodeData, NodeFlags,
    NodeRelations, RangeInfo, Rect, TranslatedNode,
};
pub use provider::{EmbeddedTreeProvider, EventSink, RelationshipProbe};
