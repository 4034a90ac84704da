//! Breadth-first walk of the host-visible tree.
//!
//! Mirrors what a host accessibility service does when it first inspects an
//! embedded region: describe the root, then every child it was handed.

use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use viewmux_a11y::{
    AccessibilityBridge, BridgeError, EmbeddedTreeProvider, HostNodeId, TranslatedNode,
};

/// A translated node and its distance from the walk's start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkedNode {
    pub depth: usize,
    #[serde(flatten)]
    pub node: TranslatedNode,
}

/// Walks the tree through [`AccessibilityBridge::describe_node`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalker {
    /// Children of nodes at this depth are not described (None = unbounded)
    max_depth: Option<usize>,
}

impl TreeWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Describe every node reachable from `start`, in visit order.
    ///
    /// Each host id is described once even if several nodes list it.
    pub fn walk<P: EmbeddedTreeProvider>(
        &self,
        bridge: &mut AccessibilityBridge<P>,
        start: HostNodeId,
    ) -> Result<Vec<WalkedNode>, BridgeError> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut walked = Vec::new();

        while let Some((id, depth)) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let node = bridge.describe_node(id)?;
            if self.max_depth.is_none_or(|max| depth < max) {
                queue.extend(node.children.iter().map(|child| (*child, depth + 1)));
            }
            walked.push(WalkedNode { depth, node });
        }

        log::debug!("Walked {} nodes from {}", walked.len(), start);
        Ok(walked)
    }
}
