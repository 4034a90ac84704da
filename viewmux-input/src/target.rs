//! Registered input targets.

use crate::attributes::EditorAttributes;
use crate::session::InputSession;
use std::sync::Arc;

/// Caller-assigned, stable identifier of a registered target.
pub type TargetId = u64;

/// Something that can own keyboard focus and produce its own input session.
pub trait TargetHandle: Send + Sync {
    /// Create this target's session endpoint for the negotiated attributes.
    ///
    /// Returns `None` when the target has nothing to edit; the demultiplexer
    /// then routes to its default endpoint.
    fn produce_endpoint(&self, attributes: &EditorAttributes) -> Option<Arc<dyn InputSession>>;
}

/// Registry entry for one target.
pub(crate) struct TargetEntry {
    pub handle: Arc<dyn TargetHandle>,
    /// Lazily materialized endpoint, created at most once until invalidated
    pub endpoint: Option<Arc<dyn InputSession>>,
}

impl TargetEntry {
    pub fn new(handle: Arc<dyn TargetHandle>) -> Self {
        Self {
            handle,
            endpoint: None,
        }
    }
}
