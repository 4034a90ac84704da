//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute on a config field and by the matching `Default` impl.

use crate::types::{LogLevel, RegionConfig};

pub fn bool_true() -> bool {
    true
}

pub fn log_level() -> LogLevel {
    LogLevel::Off
}

// ── Identifier bridge ──────────────────────────────────────────────────────

/// Host node ids below this value address the synthetic root.
pub fn root_id_threshold() -> u32 {
    5000
}

/// First host node id handed out for embedded nodes.
pub fn first_embedded_id() -> u32 {
    5000
}

pub fn region() -> RegionConfig {
    RegionConfig::default()
}

// ── Input demultiplexer ────────────────────────────────────────────────────

/// Host operation whose presence in the call context marks a focus acquisition.
pub fn focus_operation() -> String {
    "show_soft_input".to_string()
}
