mod common;

use common::{default_config_with_tmp_dir, write_temp_file};
use viewmux::config::{Config, ConfigError, LogLevel};

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.log_level, LogLevel::Off);
    assert_eq!(config.bridge.root_id_threshold, 5000);
    assert_eq!(config.bridge.first_embedded_id, 5000);
    assert!(config.bridge.traversal_order);
    assert!(config.bridge.label_relations);
    assert!(config.bridge.root_accessibility_focus);
    assert_eq!(config.input.focus_operation, "show_soft_input");
    assert!(config.input.restart_on_focus);
}

#[test]
fn test_config_save_and_load_round_trip() {
    let (mut config, dir) = default_config_with_tmp_dir();
    config.log_level = LogLevel::Debug;
    config.bridge.region.left = 24;
    config.bridge.region.top = 96;
    config.input.restart_on_focus = false;

    let path = dir.path().join("nested").join("config.yaml");
    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_yaml_keeps_other_defaults() {
    let (path, _dir) = write_temp_file(
        "config.yaml",
        "log_level: warn\nbridge:\n  root_id_threshold: 100\n  first_embedded_id: 250\n",
    );
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.bridge.root_id_threshold, 100);
    assert_eq!(config.bridge.first_embedded_id, 250);
    assert!(config.bridge.traversal_order);
    assert_eq!(config.input.focus_operation, "show_soft_input");
}

#[test]
fn test_load_rejects_seed_below_threshold() {
    let (path, _dir) = write_temp_file(
        "config.yaml",
        "bridge:\n  root_id_threshold: 100\n  first_embedded_id: 50\n",
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Validation(_))
    ));
}

#[test]
fn test_load_reports_parse_errors() {
    let (path, _dir) = write_temp_file("config.yaml", "log_level: [1, 2]\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_config_path_is_under_config_dir() {
    let path = Config::config_path();
    assert!(path.starts_with(Config::config_dir()));
    assert_eq!(path.file_name().unwrap(), "config.yaml");
}
