use spectate_config::defaults::MAX_CYCLE_SECS;
use spectate_config::{Config, ConfigError, KeyBinding, LayoutFamily, LayoutMode, LogLevel};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_yaml_round_trip_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("config.yaml");

    let config = Config::default()
        .with_channels("twitch:a,youtube:video:abc")
        .with_family(LayoutFamily::Grid)
        .with_layout("focus")
        .with_cycle(30);
    config.save_to(&path).expect("save");

    let loaded = Config::load_from(&path).expect("load");
    assert_eq!(loaded, config);
    assert!(!path.with_extension("yaml.tmp").exists());
}

#[test]
fn test_partial_yaml_uses_defaults() {
    let yaml = r#"
channels: "twitch:a, twitch:b"
layout: both
keybindings:
  - key: "Shift+S"
    action: swap
"#;
    let config = Config::from_yaml(yaml).expect("parse");
    assert_eq!(config.channels, "twitch:a, twitch:b");
    assert_eq!(config.initial_mode(), LayoutMode::Both);
    assert!(config.muted);
    assert_eq!(config.audio_delay_ms, 750);
    assert_eq!(config.log_level, LogLevel::Off);
    assert_eq!(config.keybindings, vec![KeyBinding::new("Shift+S", "swap")]);
}

#[test]
fn test_empty_yaml_is_default() {
    assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let err = Config::from_yaml("family: [not, a, family]").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file_is_error_with_context() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = Config::load_from(&temp_dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_some());
}

#[test]
fn test_query_overrides_file_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "channels: twitch:from_file\nstart: 1\n").unwrap();

    let config = Config::load_from(&path)
        .unwrap()
        .with_query("channels=twitch:from_query");
    assert_eq!(config.channels, "twitch:from_query");
    assert_eq!(config.start, 1);
}

#[test]
fn test_out_of_range_cycle_is_rejected() {
    let mut config = Config::default().with_cycle(10);
    let err = config.set_option("cycle", "18446744073709551615").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(config.cycle, 10);

    let config = Config::default().with_query("cycle=18446744073709551615&start=1");
    assert_eq!(config.cycle, 0);
    assert_eq!(config.cycle_interval(), None);
    assert_eq!(config.start, 1);

    let config = Config::default().with_query(&format!("cycle={MAX_CYCLE_SECS}"));
    assert_eq!(config.cycle, MAX_CYCLE_SECS);
}

#[test]
fn test_yaml_cycle_is_clamped() {
    let config = Config::from_yaml("cycle: 18446744073709551615\n").expect("parse");
    assert_eq!(config.cycle_interval(), Some(Duration::from_secs(MAX_CYCLE_SECS)));
}
