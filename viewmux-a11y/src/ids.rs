//! Node identifiers on either side of the bridge.
//!
//! Host ids and embedded ids are separate types so that an embedded id can
//! never end up in a field the host reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node id in the flat space the bridge hands to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostNodeId(pub u32);

/// Node id owned by the embedded subsystem; opaque to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddedNodeId(pub i64);

impl fmt::Display for HostNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for EmbeddedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "embedded:{}", self.0)
    }
}

impl From<u32> for HostNodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<i64> for EmbeddedNodeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
