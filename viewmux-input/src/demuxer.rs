//! Focus-routed input session demultiplexer.
//!
//! The host talks to exactly one input session. [`InputDemuxer`] keeps a
//! registry of targets that can each produce their own session, tracks which
//! of them currently has focus, and resolves every routed call to that
//! target's endpoint, falling back to a default endpoint.
//!
//! Endpoints are materialized lazily: a target is only asked for its
//! endpoint when a call is routed to it, using the editor attributes seen in
//! the most recent session creation handshake. The result is cached on the
//! registry entry so a focused target keeps one session across calls.

use crate::attributes::EditorAttributes;
use crate::call::{SessionCall, SessionReply};
use crate::focus::{FocusIntentDetector, FocusSignal, RestartGate, RestartRequest};
use crate::session::InputSession;
use crate::target::{TargetEntry, TargetHandle, TargetId};
use std::collections::HashMap;
use std::sync::Arc;
use viewmux_config::InputConfig;

/// Produces the default endpoint on demand.
pub type DefaultCreator =
    Box<dyn Fn(&EditorAttributes) -> Option<Arc<dyn InputSession>> + Send + Sync>;

/// Routes input session calls to the focused target.
pub struct InputDemuxer {
    /// Registered targets keyed by their caller-assigned id
    targets: HashMap<TargetId, TargetEntry>,
    /// Currently focused target (None = default endpoint)
    focused: Option<TargetId>,
    /// Fallback endpoint when no target is focused or it cannot serve
    default_endpoint: Option<Arc<dyn InputSession>>,
    /// Builds the default endpoint when none has been installed
    default_creator: Option<DefaultCreator>,
    /// Attributes from the most recent session creation handshake
    last_attributes: Option<EditorAttributes>,
    detector: FocusIntentDetector,
    restart_on_focus: bool,
    restart: RestartGate,
}

impl InputDemuxer {
    /// Create an empty demultiplexer with default settings
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            targets: HashMap::new(),
            focused: None,
            default_endpoint: None,
            default_creator: None,
            last_attributes: None,
            detector: FocusIntentDetector::new(config.focus_operation.clone()),
            restart_on_focus: config.restart_on_focus,
            restart: RestartGate::default(),
        }
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register a target, replacing the handle of an existing entry.
    ///
    /// An endpoint already cached for `id` is kept; use
    /// [`invalidate_endpoint`](Self::invalidate_endpoint) to drop it.
    pub fn register_target(&mut self, id: TargetId, handle: Arc<dyn TargetHandle>) {
        match self.targets.get_mut(&id) {
            Some(entry) => {
                log::debug!("Replacing handle for input target {}", id);
                entry.handle = handle;
            }
            None => {
                log::debug!("Registered input target {}", id);
                self.targets.insert(id, TargetEntry::new(handle));
            }
        }
    }

    /// Remove a target and its cached endpoint.
    ///
    /// Focus is left pointing at `id`; until it is registered again, calls
    /// fall back to the default endpoint.
    pub fn unregister_target(&mut self, id: TargetId) -> bool {
        let removed = self.targets.remove(&id).is_some();
        if removed {
            log::debug!("Unregistered input target {}", id);
        }
        removed
    }

    /// Drop the cached endpoint of `id` so the next routed call produces a new one.
    pub fn invalidate_endpoint(&mut self, id: TargetId) -> bool {
        self.targets
            .get_mut(&id)
            .and_then(|entry| entry.endpoint.take())
            .is_some()
    }

    pub fn is_registered(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Reverse lookup of a handle's id, by identity.
    ///
    /// Linear in the number of targets, which stays small.
    pub fn target_id_for(&self, handle: &Arc<dyn TargetHandle>) -> Option<TargetId> {
        self.targets
            .iter()
            .find(|(_, entry)| Arc::ptr_eq(&entry.handle, handle))
            .map(|(id, _)| *id)
    }

    // =========================================================================
    // Default endpoint
    // =========================================================================

    pub fn set_default_endpoint(&mut self, endpoint: Arc<dyn InputSession>) {
        self.default_endpoint = Some(endpoint);
    }

    pub fn set_default_creator(&mut self, creator: DefaultCreator) {
        self.default_creator = Some(creator);
    }

    pub fn default_endpoint(&self) -> Option<Arc<dyn InputSession>> {
        self.default_endpoint.clone()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Host notification that an input surface is being presented for `handle`.
    ///
    /// On a focus acquisition the focused target becomes the handle's id, or
    /// none (default endpoint) when the handle is not registered. Always
    /// returns `true`: whether the target can actually serve input is decided
    /// when its endpoint is resolved.
    pub fn notify_focus_candidate(
        &mut self,
        handle: &Arc<dyn TargetHandle>,
        signal: FocusSignal,
    ) -> bool {
        if signal == FocusSignal::ShowInputSurface {
            let id = self.target_id_for(handle);
            log::debug!("Input focus moved from {:?} to {:?}", self.focused, id);
            self.focused = id;
            if self.restart_on_focus {
                self.restart.on_focus_acquired(id);
            }
        }
        true
    }

    /// Same as [`notify_focus_candidate`](Self::notify_focus_candidate) for
    /// hosts that can only describe the operations currently running.
    pub fn notify_focus_candidate_in_context<'a, I>(
        &mut self,
        handle: &Arc<dyn TargetHandle>,
        frames: I,
    ) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let signal = self.detector.classify(frames);
        self.notify_focus_candidate(handle, signal)
    }

    pub fn focused_target(&self) -> Option<TargetId> {
        self.focused
    }

    /// Take the restart the host owes after the last focus acquisition.
    pub fn take_restart_request(&mut self) -> Option<RestartRequest> {
        self.restart.take()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Host entry point for creating an input session.
    ///
    /// Records `attributes` for later lazy materialization, then returns the
    /// endpoint that will serve the session.
    pub fn create_session(
        &mut self,
        attributes: EditorAttributes,
    ) -> Option<Arc<dyn InputSession>> {
        self.last_attributes = Some(attributes);
        if self.focused.is_none() {
            return self.default_or_create();
        }
        self.resolve_active_endpoint()
    }

    pub fn last_attributes(&self) -> Option<&EditorAttributes> {
        self.last_attributes.as_ref()
    }

    /// The endpoint every routed call currently goes to.
    pub fn resolve_active_endpoint(&mut self) -> Option<Arc<dyn InputSession>> {
        let Some(id) = self.focused else {
            return self.default_endpoint.clone();
        };

        let Some(entry) = self.targets.get_mut(&id) else {
            log::warn!(
                "Focused input target {} is not registered, routing to default",
                id
            );
            return self.default_endpoint.clone();
        };

        if let Some(endpoint) = &entry.endpoint {
            return Some(Arc::clone(endpoint));
        }

        let attributes = self.last_attributes.clone().unwrap_or_default();
        match entry.handle.produce_endpoint(&attributes) {
            Some(endpoint) => {
                log::debug!("Materialized input endpoint for target {}", id);
                entry.endpoint = Some(Arc::clone(&endpoint));
                Some(endpoint)
            }
            None => {
                log::debug!(
                    "Target {} produced no input endpoint, routing to default",
                    id
                );
                self.default_endpoint.clone()
            }
        }
    }

    /// Route one call to the active endpoint.
    ///
    /// With no endpoint at all the call is a no-op answered with the
    /// protocol's neutral reply.
    pub fn dispatch(&mut self, call: SessionCall) -> SessionReply {
        match self.resolve_active_endpoint() {
            Some(endpoint) => call.apply(endpoint.as_ref()),
            None => {
                log::debug!("No input endpoint for {}, ignoring", call.name());
                call.neutral_reply()
            }
        }
    }

    fn default_or_create(&mut self) -> Option<Arc<dyn InputSession>> {
        if let Some(endpoint) = &self.default_endpoint {
            return Some(Arc::clone(endpoint));
        }
        let creator = self.default_creator.as_ref()?;
        let attributes = self.last_attributes.clone().unwrap_or_default();
        let endpoint = creator(&attributes)?;
        log::debug!("Created default input endpoint");
        self.default_endpoint = Some(Arc::clone(&endpoint));
        Some(endpoint)
    }
}

impl Default for InputDemuxer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputDemuxer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDemuxer")
            .field("targets", &self.targets.len())
            .field("focused", &self.focused)
            .field("has_default_endpoint", &self.default_endpoint.is_some())
            .field("restart_pending", &self.restart.is_pending())
            .finish()
    }
}
