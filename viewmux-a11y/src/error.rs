//! Typed error types for viewmux-a11y.

use crate::ids::{EmbeddedNodeId, HostNodeId};
use thiserror::Error;

/// Errors surfaced by [`AccessibilityBridge`](crate::AccessibilityBridge).
///
/// Unmapped relationship ids during node description are not errors; they
/// are omitted from the translated node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The host asked about an id this bridge never issued.
    #[error("host node {0} is not mapped to an embedded node")]
    UnknownHostId(HostNodeId),

    /// The embedded subsystem has no root node to expose.
    #[error("embedded subsystem has no root node")]
    RootUnavailable,

    /// A mapped node is no longer known to the embedded subsystem.
    #[error("embedded node {embedded} behind host node {host} is unavailable")]
    NodeUnavailable {
        host: HostNodeId,
        embedded: EmbeddedNodeId,
    },

    /// Every host id above the root threshold has been issued.
    #[error("no host ids left to map embedded node {0}")]
    IdSpaceExhausted(EmbeddedNodeId),

    /// An event names a source that was never surfaced through node description.
    #[error("event source {0} was never surfaced to the host")]
    UnattributedEvent(EmbeddedNodeId),

    /// An event record names a source that was never surfaced.
    #[error("event record {index} source {embedded} was never surfaced to the host")]
    UnattributedRecord {
        index: usize,
        embedded: EmbeddedNodeId,
    },
}

/// Errors from a [`RelationshipProbe`](crate::RelationshipProbe).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The probe cannot read relationships at all in this process.
    #[error("relationship probe unavailable: {0}")]
    Unavailable(String),

    /// Relationships of one node could not be read.
    #[error("relationships of {id} could not be read: {reason}")]
    Lookup { id: EmbeddedNodeId, reason: String },
}
