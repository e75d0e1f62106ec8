//! Settings loading, validation and the settings tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use odyssey_sync::config::{FlipPov, Settings, SettingsTree, DEFAULT_MAX_PLAYERS, DEFAULT_PORT};
use odyssey_sync::error::ProtocolError;
use odyssey_sync::permissions::PermissionSet;
use serde_json::json;
use std::net::IpAddr;

#[test]
fn test_default_settings_are_valid() {
    let settings = Settings::default();
    assert!(settings.validate().is_empty());
    assert!(settings.validate_strict().is_ok());
    assert_eq!(settings.server.port, DEFAULT_PORT);
    assert_eq!(settings.server.max_players, DEFAULT_MAX_PLAYERS);
}

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let settings = Settings::from_json(
        r#"{
            "Server": { "MaxPlayers": 4 },
            "Flip": { "Enabled": true, "Pov": "Self" },
            "JsonApi": { "Enabled": true, "Tokens": { "abc": ["Status/Players"] } }
        }"#,
    )
    .unwrap();

    assert_eq!(settings.server.max_players, 4);
    assert_eq!(settings.server.port, DEFAULT_PORT);
    assert_eq!(settings.flip.pov, FlipPov::SelfOnly);
    assert_eq!(settings.json_api.tokens["abc"], vec!["Status/Players".to_string()]);
    assert!(settings.validate().is_empty());
}

#[test]
fn test_invalid_values_are_reported() {
    let settings = Settings::default_with_overrides(|s| {
        s.server.address = "not-an-ip".into();
        s.server.port = 0;
        s.server.max_players = 0;
        s.ban_list.ip_addresses = vec!["999.1.1.1".into()];
    });

    let errors = settings.validate();
    assert_eq!(errors.len(), 4, "{errors:?}");
    assert!(errors.iter().any(|e| e.contains("not-an-ip")));
    assert!(errors.iter().any(|e| e.contains("999.1.1.1")));

    match settings.validate_strict() {
        Err(ProtocolError::ConfigError(msg)) => assert!(msg.contains("Max players")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_json_api_enabled_without_tokens() {
    let settings = Settings::default_with_overrides(|s| s.json_api.enabled = true);
    assert_eq!(settings.validate().len(), 1);
}

#[test]
fn test_malformed_json_is_config_error() {
    let err = Settings::from_json("{ \"Server\": ").unwrap_err();
    assert!(matches!(err, ProtocolError::ConfigError(ref m) if m.contains("JSON")));
}

#[test]
fn test_save_and_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let settings = Settings::default_with_overrides(|s| {
        s.server.max_players = 12;
        s.ban_list.enabled = true;
        s.ban_list.ip_addresses = vec!["10.0.0.7".into()];
    });
    settings.save_to_file(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"MaxPlayers\": 12"));

    let loaded = Settings::from_file(&path).unwrap();
    assert_eq!(loaded, settings);
    assert!(loaded
        .ban_list
        .is_ip_banned(&"10.0.0.7".parse::<IpAddr>().unwrap()));
}

#[test]
fn test_save_and_load_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let settings = Settings::default_with_overrides(|s| s.server.port = 4000);
    settings.save_to_file(&path).unwrap();

    assert_eq!(Settings::from_file(&path).unwrap(), settings);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ProtocolError::ConfigError(_)));
}

#[test]
fn test_example_config_parses() {
    let example = Settings::example_config();
    assert_eq!(Settings::from_toml(&example).unwrap(), Settings::default());
}

#[test]
fn test_tree_mirrors_file_keys() {
    let settings = Settings::default_with_overrides(|s| s.server.max_players = 6);
    let tree = SettingsTree::from_settings(&settings).unwrap();

    assert_eq!(tree.lookup(["Server", "MaxPlayers"]), Some(&json!(6)));
    assert_eq!(tree.lookup(["Flip", "Pov"]), Some(&json!("Both")));
    assert!(tree.lookup(["Server", "maxplayers"]).is_none());
    assert!(tree.lookup(["Server", "MaxPlayers", "Deeper"]).is_none());
}

#[test]
fn test_tree_rejects_non_object_root() {
    assert!(SettingsTree::from_value(json!([1, 2, 3])).is_err());
}

#[test]
fn test_token_permissions() {
    let settings = Settings::from_json(
        r#"{ "JsonApi": { "Enabled": true, "Tokens": { "t": ["Status/Players", "Status/Players/Name"] } } }"#,
    )
    .unwrap();

    let perms = PermissionSet::for_token(&settings, "t").unwrap();
    assert_eq!(perms.len(), 2);
    assert!(PermissionSet::for_token(&settings, "other").is_none());

    let mut disabled = settings.clone();
    disabled.json_api.enabled = false;
    assert!(PermissionSet::for_token(&disabled, "t").is_none());
}
