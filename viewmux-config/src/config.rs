//! Embedding session configuration.
//!
//! Covers:
//! - The `Config` struct and its nested `BridgeConfig` / `InputConfig`
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`)
//! - Semantic validation (`validate`)

use crate::error::ConfigError;
use crate::types::{LogLevel, RegionConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration for one embedding session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Verbosity of the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Identifier bridge settings
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Input demultiplexer settings
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: crate::defaults::log_level(),
            bridge: BridgeConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Settings for the accessibility identifier bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Host node ids strictly below this value denote the synthetic root
    #[serde(default = "crate::defaults::root_id_threshold")]
    pub root_id_threshold: u32,

    /// Seed for host ids allocated to embedded nodes
    #[serde(default = "crate::defaults::first_embedded_id")]
    pub first_embedded_id: u32,

    /// Screen rectangle of the embedded region
    #[serde(default = "crate::defaults::region")]
    pub region: RegionConfig,

    /// Resolve traversal-before/after relationships
    #[serde(default = "crate::defaults::bool_true")]
    pub traversal_order: bool,

    /// Resolve label-for/labeled-by relationships
    #[serde(default = "crate::defaults::bool_true")]
    pub label_relations: bool,

    /// Advertise the accessibility-focus action on the synthetic root
    #[serde(default = "crate::defaults::bool_true")]
    pub root_accessibility_focus: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            root_id_threshold: crate::defaults::root_id_threshold(),
            first_embedded_id: crate::defaults::first_embedded_id(),
            region: crate::defaults::region(),
            traversal_order: crate::defaults::bool_true(),
            label_relations: crate::defaults::bool_true(),
            root_accessibility_focus: crate::defaults::bool_true(),
        }
    }
}

/// Settings for the input session demultiplexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Host operation name that marks a focus acquisition in a call context
    #[serde(default = "crate::defaults::focus_operation")]
    pub focus_operation: String,

    /// Ask the host to restart its input session after focus moves
    #[serde(default = "crate::defaults::bool_true")]
    pub restart_on_focus: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            focus_operation: crate::defaults::focus_operation(),
            restart_on_focus: crate::defaults::bool_true(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        log::info!(
            "Config file not found, creating default at {:?}",
            config_path
        );
        let config = Self::default();
        if let Err(e) = config.save() {
            log::error!("Failed to save default config: {}", e);
            return Err(e);
        }
        Ok(config)
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.first_embedded_id < self.bridge.root_id_threshold {
            return Err(ConfigError::Validation(format!(
                "bridge.first_embedded_id ({}) must not be below bridge.root_id_threshold ({})",
                self.bridge.first_embedded_id, self.bridge.root_id_threshold
            )));
        }
        if self.input.focus_operation.trim().is_empty() {
            return Err(ConfigError::Validation(
                "input.focus_operation must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration directory path (`~/.config/viewmux`)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("viewmux")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("viewmux")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_seed_below_threshold_rejected() {
        let mut config = Config::default();
        config.bridge.first_embedded_id = 10;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("first_embedded_id"));
    }

    #[test]
    fn test_empty_focus_operation_rejected() {
        let mut config = Config::default();
        config.input.focus_operation = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bridge.root_id_threshold, 5000);
        assert_eq!(config.input.focus_operation, "show_soft_input");
    }
}
