//! Configuration loading tests

use sanitizer_serving_gateway::config::{EngineKind, Settings};
use std::io::Write;

#[test]
fn load_without_files_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = dir.path().join("gateway.yaml");
    let engines = dir.path().join("engines.yaml");

    let settings = Settings::load_from_paths(gateway, Some(engines)).unwrap();

    assert_eq!(settings.server.port, 8080);
    assert!(!settings.rate_limit.enabled);
    assert_eq!(settings.engines.len(), EngineKind::all().len());
    assert!(settings.validate().is_ok());
}

#[test]
fn gateway_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = dir.path().join("gateway.yaml");

    let mut f = std::fs::File::create(&gateway).unwrap();
    writeln!(
        f,
        "server:\n  port: 9999\nrate_limit:\n  enabled: true\nlimits:\n  max_input_bytes: 512"
    )
    .unwrap();

    let settings = Settings::load_from_paths(gateway, None).unwrap();

    assert_eq!(settings.server.port, 9999);
    assert!(settings.rate_limit.enabled);
    assert_eq!(settings.limits.max_input_bytes, 512);
}

#[test]
fn engines_file_replaces_builtin_list() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = dir.path().join("gateway.yaml");
    let engines = dir.path().join("engines.yaml");

    let mut f = std::fs::File::create(&engines).unwrap();
    writeln!(
        f,
        "version: \"1\"\nengines:\n  - name: mastodon\n    kind: mastodon-strict\n  - name: strip\n    kind: strip\n    enabled: false"
    )
    .unwrap();

    let settings = Settings::load_from_paths(gateway, Some(engines)).unwrap();

    assert_eq!(settings.engines.len(), 2);
    assert_eq!(settings.engines[0].name, "mastodon");
    assert_eq!(settings.engines[0].kind, EngineKind::MastodonStrict);
    assert!(!settings.engines[1].enabled);
    assert_eq!(settings.get_enabled_engines().len(), 1);
}

#[test]
fn validate_rejects_bad_settings() {
    let mut settings = Settings::default();
    settings.server.port = 0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.limits.max_input_bytes = 0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.engines[0].name = String::new();
    assert!(settings.validate().is_err());
}
