//! One embedding session: an input demultiplexer and an identifier bridge
//! built from the same configuration.
//!
//! Both components are behind their own `parking_lot::Mutex`, so host
//! callbacks may arrive on any thread. Neither lock is held while calling
//! into another session's component.

use anyhow::{Context, Result};
use viewmux_a11y::{
    AccessibilityBridge, BridgeError, EmbeddedEvent, EmbeddedTreeProvider, EventSink, Extras,
    HostEvent, HostNodeId, RelationshipProbe, SharedBridge, TranslatedNode, shared_bridge,
};
use viewmux_config::Config;
use viewmux_input::{ForwardingSession, InputDemuxer, SharedDemuxer, shared};

use crate::walker::{TreeWalker, WalkedNode};

/// Owns the per-session input and accessibility state.
pub struct EmbeddingSession<P> {
    config: Config,
    demuxer: SharedDemuxer,
    bridge: SharedBridge<P>,
}

impl<P: EmbeddedTreeProvider> EmbeddingSession<P> {
    /// Start a session over `provider` without relationship enrichment.
    pub fn new(config: Config, provider: P) -> Result<Self> {
        config.validate().context("Invalid session configuration")?;
        let bridge = AccessibilityBridge::from_config(provider, &config.bridge);
        Ok(Self::assemble(config, bridge))
    }

    /// Start a session whose bridge also reads traversal and label links
    /// through `probe`.
    pub fn with_probe<R>(config: Config, provider: P, probe: R) -> Result<Self>
    where
        R: RelationshipProbe + Send + Sync + 'static,
    {
        config.validate().context("Invalid session configuration")?;
        let bridge = AccessibilityBridge::from_config(provider, &config.bridge).with_probe(probe);
        Ok(Self::assemble(config, bridge))
    }

    fn assemble(config: Config, bridge: AccessibilityBridge<P>) -> Self {
        crate::debug_info!(
            "SESSION",
            "Embedding session started (root threshold {}, first id {})",
            config.bridge.root_id_threshold,
            config.bridge.first_embedded_id
        );
        Self {
            demuxer: shared(InputDemuxer::from_config(&config.input)),
            bridge: shared_bridge(bridge),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn demuxer(&self) -> &SharedDemuxer {
        &self.demuxer
    }

    pub fn bridge(&self) -> &SharedBridge<P> {
        &self.bridge
    }

    /// The single input session to hand to the host.
    pub fn input_session(&self) -> ForwardingSession {
        ForwardingSession::new(SharedDemuxer::clone(&self.demuxer))
    }

    pub fn describe_node(&self, id: HostNodeId) -> Result<TranslatedNode, BridgeError> {
        self.bridge.lock().describe_node(id)
    }

    pub fn perform_action(
        &self,
        id: HostNodeId,
        action: u32,
        extras: &Extras,
    ) -> Result<bool, BridgeError> {
        self.bridge.lock().perform_action(id, action, extras)
    }

    pub fn translate_event(&self, raw: EmbeddedEvent) -> Result<HostEvent, BridgeError> {
        let result = self.bridge.lock().translate_event(raw);
        if let Err(err) = &result {
            crate::debug_error!("SESSION", "Dropping event: {}", err);
        }
        result
    }

    pub fn delegate_event(
        &self,
        raw: EmbeddedEvent,
        sink: &dyn EventSink,
    ) -> Result<bool, BridgeError> {
        // Translate under the lock, deliver without it.
        let event = self.translate_event(raw)?;
        Ok(sink.send_event(event))
    }

    /// Walk the host-visible tree from `start`.
    pub fn walk(
        &self,
        walker: &TreeWalker,
        start: HostNodeId,
    ) -> Result<Vec<WalkedNode>, BridgeError> {
        walker.walk(&mut self.bridge.lock(), start)
    }
}

impl<P> std::fmt::Debug for EmbeddingSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingSession")
            .field("config", &self.config)
            .field("demuxer", &*self.demuxer.lock())
            .field("bridge", &*self.bridge.lock())
            .finish()
    }
}
