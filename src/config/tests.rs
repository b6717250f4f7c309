//! Configuration tests
//!
//! Round-trip guards: every field written by `to_toml()` must parse back into
//! the same effective configuration. Adding a field without serializing it
//! makes `test_config_roundtrip_custom_values` fail.

use super::*;
use crate::clipboard::{LabelVisibility, TriggerShape, TriggerSize, TriggerVariant};
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str)
        .unwrap_or_else(|e| panic!("config should parse.\nTOML:\n{toml_str}\nError: {e}"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let resolved = Config::resolve(parse(&config.to_toml()), no_env);

    assert_eq!(resolved.theme, config.theme);
    assert_eq!(resolved.clipboard, config.clipboard);
    assert_eq!(resolved.components, config.components);
    assert_eq!(resolved.logging, config.logging);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.theme = "mocha".to_string();
    config.clipboard.reset_ms = 900;
    config.clipboard.label_visibility = LabelVisibility::ScreenReaderOnly;
    config.components.trigger_size = TriggerSize::Lg;
    config.components.trigger_variant = TriggerVariant::Ghost;
    config.components.accordion_multiple = true;
    config.components.pin_length = 4;
    config.components.pin_groups = vec![2, 2];
    config.components.pin_mask = true;
    config.components.numeric_step = 0.5;
    config.components.numeric_precision = 2;
    config.components.skeleton_rows = 5;
    config.components.progress_striped = false;
    config.components.hover_card_width = 40;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_dir = PathBuf::from("/tmp/kftray-ui logs");
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "gallery".to_string();

    let resolved = Config::resolve(parse(&config.to_toml()), no_env);

    assert_eq!(resolved.theme, "mocha");
    assert_eq!(resolved.clipboard, config.clipboard);
    assert_eq!(resolved.components, config.components);
    assert_eq!(resolved.logging, config.logging);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::resolve(parse(""), no_env);
    assert_eq!(config.theme, "auto");
    assert_eq!(config.copy_reset_after(), Duration::from_millis(1500));
    assert_eq!(config.components, ComponentDefaults::default());
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
theme = "auto"

[clipboard]
reset_ms = 3000

[logging]
file_dir = "/var/log/from-file"
"#,
    );
    let env: HashMap<&str, &str> = [
        ("KFTRAY_UI_THEME", "mocha"),
        ("KFTRAY_UI_COPY_RESET_MS", "250"),
        ("KFTRAY_UI_LOG_DIR", "/tmp/from-env"),
    ]
    .into_iter()
    .collect();

    let config = Config::resolve(file, |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.theme, "mocha");
    assert_eq!(config.clipboard.reset_ms, 250);
    assert_eq!(config.logging.file_dir, PathBuf::from("/tmp/from-env"));
}

#[test]
fn test_invalid_env_reset_is_ignored() {
    let file = parse("[clipboard]\nreset_ms = 3000\n");
    let config = Config::resolve(file, |k| {
        (k == "KFTRAY_UI_COPY_RESET_MS").then(|| "soon".to_string())
    });
    assert_eq!(config.clipboard.reset_ms, 3000);
}

#[test]
fn test_partial_components_section_keeps_other_defaults() {
    let file = parse("[components]\ntrigger_variant = \"solid\"\npin_length = 0\n");
    let config = Config::resolve(file, no_env);
    assert_eq!(config.components.trigger_variant, TriggerVariant::Solid);
    // Zero falls back to the default length
    assert_eq!(config.components.pin_length, 6);
    assert_eq!(config.components.trigger_size, TriggerSize::Sm);
}

#[test]
fn test_unknown_variant_is_a_parse_error() {
    let parsed: Result<FileConfig, _> = toml::from_str("[components]\ntrigger_size = \"huge\"\n");
    assert!(parsed.is_err());
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// File loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_read_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = Config::read_file_config(&dir.path().join("config.toml")).unwrap();
    assert!(file.theme.is_none());
    assert!(file.clipboard.is_none());
}

#[test]
fn test_read_broken_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = mocha\n").unwrap();
    assert!(matches!(
        Config::read_file_config(&path),
        Err(FileConfigError::Parse(_))
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Props builders
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_flow_into_props() {
    let mut defaults = ComponentDefaults::default();
    defaults.trigger_variant = TriggerVariant::Subtle;
    defaults.pin_groups = vec![4];
    defaults.numeric_step = 5.0;

    let trigger = defaults.trigger_props(TriggerShape::Link);
    assert_eq!(trigger.shape, TriggerShape::Link);
    assert_eq!(trigger.variant, TriggerVariant::Subtle);
    assert!(!trigger.disabled);

    assert_eq!(defaults.pin_props().groups, vec![4]);
    assert_eq!(defaults.numeric_props().step, 5.0);

    let clipboard = ClipboardConfig {
        label_visibility: LabelVisibility::IconOnly,
        ..Default::default()
    };
    assert_eq!(
        clipboard.indicator_props().visibility,
        LabelVisibility::IconOnly
    );
}
