use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::{load_config, load_config_from};
use super::settings::{PartialBrokerSettings, PartialSettings, Settings};
use crate::utils::error::Error;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.broker.channel_capacity, 16);
    assert_eq!(settings.logging.level, "info");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_merge_keeps_defaults_for_missing_values() {
    let partial = PartialSettings {
        broker: Some(PartialBrokerSettings {
            channel_capacity: Some(4),
        }),
        logging: None,
    };
    let settings = Settings::merged(partial);
    assert_eq!(settings.broker.channel_capacity, 4);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_validate_rejects_zero_capacity() {
    let mut settings = Settings::default();
    settings.broker.channel_capacity = 0;
    assert!(matches!(
        settings.validate(),
        Err(Error::InvalidSetting {
            key: "broker.channel_capacity",
            ..
        })
    ));
}

#[test]
fn test_validate_rejects_unknown_level() {
    let mut settings = Settings::default();
    settings.logging.level = "chatty".to_string();
    assert!(matches!(
        settings.validate(),
        Err(Error::InvalidSetting {
            key: "logging.level",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let name = tmp.path().join("absent");

    let cfg = load_config_from(name.to_str().unwrap()).expect("load_config failed");
    assert_eq!(cfg, Settings::default());
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [broker]
        channel_capacity = 64

        [logging]
        level = "debug"
    "#;
    fs::write(tmp.path().join("popbus.toml"), toml).expect("write config file");
    let name = tmp.path().join("popbus");

    let cfg = load_config_from(name.to_str().unwrap()).expect("load_config failed");
    assert_eq!(cfg.broker.channel_capacity, 64);
    assert_eq!(cfg.logging.level, "debug");
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("popbus.toml"),
        "[broker]\nchannel_capacity = 64\n",
    )
    .expect("write config file");
    let name = tmp.path().join("popbus");

    temp_env::with_vars(
        [
            ("POPBUS_BROKER__CHANNEL_CAPACITY", Some("8")),
            ("POPBUS_LOGGING__LEVEL", Some("warn")),
        ],
        || {
            let cfg = load_config_from(name.to_str().unwrap()).expect("load_config failed");
            assert_eq!(cfg.broker.channel_capacity, 8);
            assert_eq!(cfg.logging.level, "warn");
        },
    );
}

#[test]
#[serial]
fn test_invalid_file_value_is_rejected() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("popbus.toml"),
        "[broker]\nchannel_capacity = 0\n",
    )
    .expect("write config file");
    let name = tmp.path().join("popbus");

    let err = load_config_from(name.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, Error::InvalidSetting { .. }));
}

#[test]
#[serial]
fn test_load_config_reads_checked_in_defaults() {
    // Tests run from the crate root, where config/default.toml lives.
    let cfg = load_config().expect("load_config failed");
    assert_eq!(cfg, Settings::default());
}
