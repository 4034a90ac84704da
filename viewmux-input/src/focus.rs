//! Focus-acquisition detection and the post-focus restart handshake.
//!
//! Hosts that can say why they are touching a target pass a [`FocusSignal`]
//! directly. Hosts that only expose the chain of operations currently
//! running go through [`FocusIntentDetector`], which is the single place
//! that looks at a call context.

use crate::target::TargetId;

/// Why the host is presenting an input surface for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    /// The host is showing its input surface for the target: focus moves.
    ShowInputSurface,
    /// Any other call; focus stays where it is.
    Incidental,
}

/// Classifies a host call context into a [`FocusSignal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusIntentDetector {
    /// Operation name marking a focus acquisition
    marker: String,
}

impl FocusIntentDetector {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// A call context containing the marker operation anywhere is a focus
    /// acquisition. Frames may be bare names or path-qualified
    /// (`host::ime::show_soft_input`); only the last segment is compared.
    pub fn classify<'a, I>(&self, frames: I) -> FocusSignal
    where
        I: IntoIterator<Item = &'a str>,
    {
        let hit = frames
            .into_iter()
            .any(|frame| frame.rsplit("::").next().is_some_and(|op| op == self.marker));
        if hit {
            FocusSignal::ShowInputSurface
        } else {
            FocusSignal::Incidental
        }
    }
}

impl Default for FocusIntentDetector {
    fn default() -> Self {
        Self::new(viewmux_config::defaults::focus_operation())
    }
}

/// Request for the host to restart its input session against a new target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartRequest {
    /// Target that acquired focus; `None` means the default endpoint
    pub target: Option<TargetId>,
}

/// One-shot gate around the restart handshake.
///
/// A focus acquisition queues a restart. Restarting makes the host present
/// its input surface again, which is itself a focus acquisition; that echo
/// must not queue another restart.
#[derive(Debug, Default)]
pub(crate) struct RestartGate {
    pending: Option<RestartRequest>,
    restarting: bool,
}

impl RestartGate {
    pub fn on_focus_acquired(&mut self, target: Option<TargetId>) {
        if self.restarting {
            self.restarting = false;
            log::debug!("Focus echo from input restart, not restarting again");
            return;
        }
        self.pending = Some(RestartRequest { target });
    }

    /// Hand the pending request to the host, which is now restarting.
    pub fn take(&mut self) -> Option<RestartRequest> {
        let request = self.pending.take();
        if request.is_some() {
            self.restarting = true;
        }
        request
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
