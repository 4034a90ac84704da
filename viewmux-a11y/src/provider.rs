//! Interfaces to the embedded subsystem and to the host.

use crate::error::ProbeError;
use crate::event::HostEvent;
use crate::ids::EmbeddedNodeId;
use crate::node::{Extras, NodeData, NodeRelations};
use std::sync::Arc;

/// Read and act on the embedded subsystem's node tree.
pub trait EmbeddedTreeProvider {
    /// The embedded tree's root node.
    fn root_node(&self) -> Option<NodeData>;

    /// A node by id, or `None` if the subsystem no longer knows it.
    fn fetch_node(&self, id: EmbeddedNodeId) -> Option<NodeData>;

    /// Child ids of `id`, in the subsystem's order.
    fn fetch_child_ids(&self, id: EmbeddedNodeId) -> Vec<EmbeddedNodeId>;

    /// Perform an action on a node, returning whether it was handled.
    fn perform_action(&self, id: EmbeddedNodeId, action: u32, extras: &Extras) -> bool;
}

impl<T: EmbeddedTreeProvider + ?Sized> EmbeddedTreeProvider for Arc<T> {
    fn root_node(&self) -> Option<NodeData> {
        (**self).root_node()
    }

    fn fetch_node(&self, id: EmbeddedNodeId) -> Option<NodeData> {
        (**self).fetch_node(id)
    }

    fn fetch_child_ids(&self, id: EmbeddedNodeId) -> Vec<EmbeddedNodeId> {
        (**self).fetch_child_ids(id)
    }

    fn perform_action(&self, id: EmbeddedNodeId, action: u32, extras: &Extras) -> bool {
        (**self).perform_action(id, action, extras)
    }
}

/// Reads traversal-order and label links the embedded subsystem does not
/// publish through [`EmbeddedTreeProvider`].
///
/// How the links are obtained is up to the implementation. If
/// [`initialize`](Self::initialize) fails, the bridge stops asking for the
/// rest of the session.
pub trait RelationshipProbe {
    fn initialize(&self) -> Result<(), ProbeError>;

    fn relations(&self, id: EmbeddedNodeId) -> Result<NodeRelations, ProbeError>;
}

impl<T: RelationshipProbe + ?Sized> RelationshipProbe for Arc<T> {
    fn initialize(&self) -> Result<(), ProbeError> {
        (**self).initialize()
    }

    fn relations(&self, id: EmbeddedNodeId) -> Result<NodeRelations, ProbeError> {
        (**self).relations(id)
    }
}

/// Host side receiver for translated events.
pub trait EventSink {
    /// Deliver an event, returning whether the host accepted it.
    fn send_event(&self, event: HostEvent) -> bool;
}
