//! Configuration system for viewmux.
//!
//! This crate provides configuration loading, saving, validation, and
//! default values for an embedding session. It includes:
//!
//! - Identifier bridge settings (root id threshold, id seed, embedded region)
//! - Input demultiplexer settings (focus marker operation, restart policy)
//! - Log level selection for the debug log bridge

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::{BridgeConfig, Config, InputConfig};
pub use error::ConfigError;
pub use types::{LogLevel, RegionConfig};
