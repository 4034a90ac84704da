//! Identifier bridge between the host accessibility tree and an embedded tree.
//!
//! The host addresses nodes by [`HostNodeId`]. Ids below the configured
//! threshold stand for the synthetic root: describing one binds it to the
//! embedded root. Every other host id is allocated by the bridge the first
//! time a child is enumerated, so the host can only ever name nodes it has
//! already been shown.
//!
//! Mappings are never removed; a bridge lives exactly as long as one
//! embedding session.

use crate::error::{BridgeError, ProbeError};
use crate::event::{EmbeddedEvent, HostEvent};
use crate::id_map::IdMap;
use crate::ids::{EmbeddedNodeId, HostNodeId};
use crate::node::{Extras, NodeAction, NodeRelations, TranslatedNode};
use crate::provider::{EmbeddedTreeProvider, EventSink, RelationshipProbe};
use parking_lot::Mutex;
use std::sync::Arc;
use viewmux_config::{BridgeConfig, RegionConfig};

/// Bridge shared between host callbacks running on several threads.
pub type SharedBridge<P> = Arc<Mutex<AccessibilityBridge<P>>>;

/// Wrap a bridge for sharing.
pub fn shared_bridge<P>(bridge: AccessibilityBridge<P>) -> SharedBridge<P> {
    Arc::new(Mutex::new(bridge))
}

type BoxedProbe = Box<dyn RelationshipProbe + Send + Sync>;

/// Lifecycle of the optional relationship probe.
enum ProbeState {
    /// No probe installed, or relationship enrichment turned off
    Disabled,
    /// Installed but not initialized yet
    Pending(BoxedProbe),
    Ready(BoxedProbe),
    /// Initialization failed; enrichment is skipped for the session
    Failed(ProbeError),
}

/// Translates between host node ids and an embedded node tree.
pub struct AccessibilityBridge<P> {
    provider: P,
    ids: IdMap,
    root_id_threshold: u32,
    /// Screen rectangle of the embedded region
    region: RegionConfig,
    traversal_order: bool,
    label_relations: bool,
    root_accessibility_focus: bool,
    probe: ProbeState,
}

impl<P: EmbeddedTreeProvider> AccessibilityBridge<P> {
    pub fn new(provider: P) -> Self {
        Self::from_config(provider, &BridgeConfig::default())
    }

    pub fn from_config(provider: P, config: &BridgeConfig) -> Self {
        if config.first_embedded_id < config.root_id_threshold {
            log::warn!(
                "first_embedded_id {} is below root_id_threshold {}, allocating from the threshold",
                config.first_embedded_id,
                config.root_id_threshold
            );
        }
        Self {
            provider,
            ids: IdMap::new(config.first_embedded_id.max(config.root_id_threshold)),
            root_id_threshold: config.root_id_threshold,
            region: config.region,
            traversal_order: config.traversal_order,
            label_relations: config.label_relations,
            root_accessibility_focus: config.root_accessibility_focus,
            probe: ProbeState::Disabled,
        }
    }

    /// Install a probe for traversal-order and label relationships.
    ///
    /// Ignored when both relationship kinds are turned off.
    pub fn with_probe<R>(mut self, probe: R) -> Self
    where
        R: RelationshipProbe + Send + Sync + 'static,
    {
        if self.traversal_order || self.label_relations {
            self.probe = ProbeState::Pending(Box::new(probe));
        }
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn id_map(&self) -> &IdMap {
        &self.ids
    }

    /// Whether `id` stands for the synthetic root.
    pub fn is_root_id(&self, id: HostNodeId) -> bool {
        id.0 < self.root_id_threshold
    }

    pub fn host_id_for(&self, embedded: EmbeddedNodeId) -> Option<HostNodeId> {
        self.ids.host_for(embedded)
    }

    pub fn embedded_id_for(&self, host: HostNodeId) -> Option<EmbeddedNodeId> {
        self.ids.embedded_for(host)
    }

    /// The error that disabled relationship enrichment, if any.
    pub fn relationship_probe_error(&self) -> Option<&ProbeError> {
        match &self.probe {
            ProbeState::Failed(err) => Some(err),
            _ => None,
        }
    }

    // =========================================================================
    // Node description
    // =========================================================================

    /// Describe the node the host knows as `host_id`.
    ///
    /// Children not seen before get fresh host ids, in the order the
    /// embedded subsystem lists them. Parent, traversal and label links
    /// whose targets have not been mapped yet are left out.
    pub fn describe_node(&mut self, host_id: HostNodeId) -> Result<TranslatedNode, BridgeError> {
        let is_root = self.is_root_id(host_id);
        let source = if is_root {
            let root = self
                .provider
                .root_node()
                .ok_or(BridgeError::RootUnavailable)?;
            self.ids.bind(host_id, root.id);
            root
        } else {
            let embedded = self
                .ids
                .embedded_for(host_id)
                .ok_or(BridgeError::UnknownHostId(host_id))?;
            self.provider
                .fetch_node(embedded)
                .ok_or(BridgeError::NodeUnavailable {
                    host: host_id,
                    embedded,
                })?
        };

        let mut attributes = source.attributes;
        if is_root {
            if self.root_accessibility_focus
                && !attributes.has_action(NodeAction::ACCESSIBILITY_FOCUS)
            {
                attributes.actions.push(NodeAction::accessibility_focus());
            }
        } else {
            attributes
                .bounds_in_parent
                .offset(self.region.left, self.region.top);
        }

        let mut result = TranslatedNode::new(host_id, attributes);

        for child in self.provider.fetch_child_ids(source.id) {
            let child_id = self
                .ids
                .allocate(child)
                .ok_or(BridgeError::IdSpaceExhausted(child))?;
            result.children.push(child_id);
        }

        if let Some(parent) = source.parent {
            result.parent = self.resolve_link(host_id, "parent", parent);
        }

        if let Some(relations) = self.relations(source.id) {
            if self.traversal_order {
                result.traversal_before =
                    self.resolve_optional(host_id, "traversal-before", relations.traversal_before);
                result.traversal_after =
                    self.resolve_optional(host_id, "traversal-after", relations.traversal_after);
            }
            if self.label_relations {
                result.label_for =
                    self.resolve_optional(host_id, "label-for", relations.label_for);
                result.labeled_by =
                    self.resolve_optional(host_id, "labeled-by", relations.labeled_by);
            }
        }

        Ok(result)
    }

    fn resolve_link(
        &self,
        host_id: HostNodeId,
        link: &str,
        embedded: EmbeddedNodeId,
    ) -> Option<HostNodeId> {
        let mapped = self.ids.host_for(embedded);
        if mapped.is_none() {
            log::debug!(
                "Skipping {} link of {}: {} not mapped yet",
                link,
                host_id,
                embedded
            );
        }
        mapped
    }

    fn resolve_optional(
        &self,
        host_id: HostNodeId,
        link: &str,
        embedded: Option<EmbeddedNodeId>,
    ) -> Option<HostNodeId> {
        embedded.and_then(|id| self.resolve_link(host_id, link, id))
    }

    /// Relationships of `id` through the probe, initializing it on first use.
    fn relations(&mut self, id: EmbeddedNodeId) -> Option<NodeRelations> {
        if matches!(self.probe, ProbeState::Pending(_))
            && let ProbeState::Pending(probe) =
                std::mem::replace(&mut self.probe, ProbeState::Disabled)
        {
            self.probe = match probe.initialize() {
                Ok(()) => ProbeState::Ready(probe),
                Err(err) => {
                    log::error!("Relationship probe disabled for this session: {}", err);
                    ProbeState::Failed(err)
                }
            };
        }

        let ProbeState::Ready(probe) = &self.probe else {
            return None;
        };
        match probe.relations(id) {
            Ok(relations) => Some(relations),
            Err(err) => {
                log::debug!("No relationships for {}: {}", id, err);
                None
            }
        }
    }

    // =========================================================================
    // Actions and events
    // =========================================================================

    /// Forward an action on a mapped node to the embedded subsystem.
    pub fn perform_action(
        &self,
        host_id: HostNodeId,
        action: u32,
        extras: &Extras,
    ) -> Result<bool, BridgeError> {
        let embedded = self
            .ids
            .embedded_for(host_id)
            .ok_or(BridgeError::UnknownHostId(host_id))?;
        log::debug!("Bridging action {} on {} to {}", action, host_id, embedded);
        Ok(self.provider.perform_action(embedded, action, extras))
    }

    /// Rewrite an embedded event into host ids.
    ///
    /// Every source must already be mapped; an event about a node the host
    /// has never been shown cannot be attributed.
    pub fn translate_event(&self, raw: EmbeddedEvent) -> Result<HostEvent, BridgeError> {
        raw.try_map_sources(|index, embedded| {
            self.ids.host_for(embedded).ok_or(match index {
                None => BridgeError::UnattributedEvent(embedded),
                Some(index) => BridgeError::UnattributedRecord { index, embedded },
            })
        })
    }

    /// Translate `raw` and deliver it to the host.
    pub fn delegate_event(
        &self,
        raw: EmbeddedEvent,
        sink: &dyn EventSink,
    ) -> Result<bool, BridgeError> {
        let event = self.translate_event(raw)?;
        log::debug!("Delegating {:?} event from {}", event.kind, event.source);
        Ok(sink.send_event(event))
    }
}

impl<P> std::fmt::Debug for AccessibilityBridge<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let probe = match &self.probe {
            ProbeState::Disabled => "disabled",
            ProbeState::Pending(_) => "pending",
            ProbeState::Ready(_) => "ready",
            ProbeState::Failed(_) => "failed",
        };
        f.debug_struct("AccessibilityBridge")
            .field("mapped", &self.ids.len())
            .field("next_id", &self.ids.next_id())
            .field("root_id_threshold", &self.root_id_threshold)
            .field("probe", &probe)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeAttributes, NodeData, Rect};

    /// Root (1) with a single child (2).
    struct TwoNodes;

    impl EmbeddedTreeProvider for TwoNodes {
        fn root_node(&self) -> Option<NodeData> {
            self.fetch_node(EmbeddedNodeId(1))
        }

        fn fetch_node(&self, id: EmbeddedNodeId) -> Option<NodeData> {
            let parent = match id.0 {
                1 => None,
                2 => Some(EmbeddedNodeId(1)),
                _ => return None,
            };
            Some(NodeData {
                id,
                parent,
                attributes: NodeAttributes {
                    bounds_in_parent: Rect::new(0, 0, 10, 10),
                    bounds_in_screen: Rect::new(5, 5, 15, 15),
                    ..NodeAttributes::default()
                },
            })
        }

        fn fetch_child_ids(&self, id: EmbeddedNodeId) -> Vec<EmbeddedNodeId> {
            if id.0 == 1 {
                vec![EmbeddedNodeId(2)]
            } else {
                Vec::new()
            }
        }

        fn perform_action(&self, _id: EmbeddedNodeId, _action: u32, _extras: &Extras) -> bool {
            true
        }
    }

    fn config() -> BridgeConfig {
        BridgeConfig {
            region: RegionConfig {
                left: 100,
                top: 200,
                right: 400,
                bottom: 600,
            },
            ..BridgeConfig::default()
        }
    }

    #[test]
    fn test_root_gets_focus_action_and_no_offset() {
        let mut bridge = AccessibilityBridge::from_config(TwoNodes, &config());
        let root = bridge.describe_node(HostNodeId(0)).unwrap();
        assert!(root.attributes.has_action(NodeAction::ACCESSIBILITY_FOCUS));
        assert_eq!(root.attributes.bounds_in_parent, Rect::new(0, 0, 10, 10));
        assert_eq!(root.parent, None);
    }

    #[test]
    fn test_embedded_node_bounds_are_offset() {
        let mut bridge = AccessibilityBridge::from_config(TwoNodes, &config());
        let root = bridge.describe_node(HostNodeId(0)).unwrap();
        let child = bridge.describe_node(root.children[0]).unwrap();
        assert_eq!(child.attributes.bounds_in_parent, Rect::new(100, 200, 110, 210));
        assert_eq!(child.attributes.bounds_in_screen, Rect::new(5, 5, 15, 15));
        assert_eq!(child.parent, Some(HostNodeId(0)));
        assert!(!child.attributes.has_action(NodeAction::ACCESSIBILITY_FOCUS));
    }

    #[test]
    fn test_root_focus_action_can_be_disabled() {
        let config = BridgeConfig {
            root_accessibility_focus: false,
            ..BridgeConfig::default()
        };
        let mut bridge = AccessibilityBridge::from_config(TwoNodes, &config);
        let root = bridge.describe_node(HostNodeId(7)).unwrap();
        assert!(root.attributes.actions.is_empty());
    }

    #[test]
    fn test_low_seed_is_clamped_to_threshold() {
        let config = BridgeConfig {
            root_id_threshold: 10,
            first_embedded_id: 3,
            ..BridgeConfig::default()
        };
        let mut bridge = AccessibilityBridge::from_config(TwoNodes, &config);
        let root = bridge.describe_node(HostNodeId(0)).unwrap();
        assert_eq!(root.children, vec![HostNodeId(10)]);
    }

    #[test]
    fn test_unknown_host_id() {
        let mut bridge = AccessibilityBridge::new(TwoNodes);
        assert_eq!(
            bridge.describe_node(HostNodeId(9000)).unwrap_err(),
            BridgeError::UnknownHostId(HostNodeId(9000))
        );
        assert_eq!(
            bridge
                .perform_action(HostNodeId(9000), 16, &Extras::new())
                .unwrap_err(),
            BridgeError::UnknownHostId(HostNodeId(9000))
        );
    }
}
