//! YAML-described embedded trees.
//!
//! A fixture stands in for an embedded subsystem: it lists nodes with their
//! attributes, child order and relationships, plus raw events to replay
//! through the bridge. The `viewmux` CLI and the integration tests use it.
//!
//! ```yaml
//! root: 1
//! nodes:
//!   - id: 1
//!     children: [100, 101]
//!     attributes: { class_name: FrameLayout }
//!   - id: 100
//!     attributes: { text: Email, flags: { focusable: true } }
//!     relations: { traversal_before: 101, label_for: 101 }
//!   - id: 101
//!     attributes: { class_name: EditText, flags: { editable: true } }
//! events:
//!   - kind: view_focused
//!     source: 101
//! ```
//!
//! A node without an explicit `parent` gets the node that lists it as a
//! child.

use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use viewmux_a11y::{
    EmbeddedEvent, EmbeddedNodeId, EmbeddedTreeProvider, Extras, NodeAttributes, NodeData,
    NodeRelations, ProbeError, RelationshipProbe,
};

/// One node as written in the fixture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureNode {
    pub id: EmbeddedNodeId,
    #[serde(default)]
    pub parent: Option<EmbeddedNodeId>,
    #[serde(default)]
    pub children: Vec<EmbeddedNodeId>,
    #[serde(default)]
    pub attributes: NodeAttributes,
    #[serde(default)]
    pub relations: Option<NodeRelations>,
}

/// On-disk layout of a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FixtureFile {
    root: EmbeddedNodeId,
    nodes: Vec<FixtureNode>,
    #[serde(default)]
    events: Vec<EmbeddedEvent>,
    /// Make relationship probe initialization fail
    #[serde(default)]
    probe_unavailable: bool,
}

/// An action the bridge forwarded to the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformedAction {
    pub node: EmbeddedNodeId,
    pub action: u32,
    pub extras: Extras,
}

/// In-memory embedded tree loaded from YAML.
#[derive(Debug)]
pub struct TreeFixture {
    root: EmbeddedNodeId,
    nodes: HashMap<EmbeddedNodeId, FixtureNode>,
    events: Vec<EmbeddedEvent>,
    probe_unavailable: bool,
    performed: Mutex<Vec<PerformedAction>>,
}

impl TreeFixture {
    /// Load a fixture from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Invalid fixture {}", path.display()))
    }

    /// Parse and check a fixture.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let file: FixtureFile =
            serde_yaml_ng::from_str(contents).context("Failed to parse fixture YAML")?;

        let mut nodes = HashMap::with_capacity(file.nodes.len());
        for node in file.nodes {
            let id = node.id;
            if nodes.insert(id, node).is_some() {
                bail!("Duplicate node id {}", id.0);
            }
        }
        if !nodes.contains_key(&file.root) {
            bail!("Root node {} is not defined", file.root.0);
        }

        let mut inferred: HashMap<EmbeddedNodeId, EmbeddedNodeId> = HashMap::new();
        for node in nodes.values() {
            for child in &node.children {
                if !nodes.contains_key(child) {
                    bail!("Node {} lists undefined child {}", node.id.0, child.0);
                }
                if let Some(other) = inferred.insert(*child, node.id) {
                    bail!(
                        "Node {} is listed as a child of both {} and {}",
                        child.0,
                        other.0,
                        node.id.0
                    );
                }
            }
        }
        for (child, parent) in inferred {
            if let Some(node) = nodes.get_mut(&child)
                && node.parent.is_none()
                && child != file.root
            {
                node.parent = Some(parent);
            }
        }

        Ok(Self {
            root: file.root,
            nodes,
            events: file.events,
            probe_unavailable: file.probe_unavailable,
            performed: Mutex::new(Vec::new()),
        })
    }

    pub fn root_id(&self) -> EmbeddedNodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Raw events to replay, in file order.
    pub fn events(&self) -> &[EmbeddedEvent] {
        &self.events
    }

    /// Actions forwarded so far, oldest first.
    pub fn performed_actions(&self) -> Vec<PerformedAction> {
        self.performed.lock().clone()
    }
}

impl EmbeddedTreeProvider for TreeFixture {
    fn root_node(&self) -> Option<NodeData> {
        self.fetch_node(self.root)
    }

    fn fetch_node(&self, id: EmbeddedNodeId) -> Option<NodeData> {
        self.nodes.get(&id).map(|node| NodeData {
            id,
            parent: node.parent,
            attributes: node.attributes.clone(),
        })
    }

    fn fetch_child_ids(&self, id: EmbeddedNodeId) -> Vec<EmbeddedNodeId> {
        self.nodes
            .get(&id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Records the action; accepted when the node exists.
    fn perform_action(&self, id: EmbeddedNodeId, action: u32, extras: &Extras) -> bool {
        self.performed.lock().push(PerformedAction {
            node: id,
            action,
            extras: extras.clone(),
        });
        self.nodes.contains_key(&id)
    }
}

impl RelationshipProbe for TreeFixture {
    fn initialize(&self) -> Result<(), ProbeError> {
        if self.probe_unavailable {
            return Err(ProbeError::Unavailable(
                "fixture marks relationships unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn relations(&self, id: EmbeddedNodeId) -> Result<NodeRelations, ProbeError> {
        self.nodes
            .get(&id)
            .map(|node| node.relations.unwrap_or_default())
            .ok_or_else(|| ProbeError::Lookup {
                id,
                reason: "unknown node".to_string(),
            })
    }
}
