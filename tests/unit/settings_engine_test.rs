//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, validation and reset.

use blablador::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use blablador::types::errors::SettingsError;
use blablador::types::settings::{Presentation, ShareTarget, ShellSettings, DEFAULT_START_URL};
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

/// Without a config file the shell still starts, on the default start page.
#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(
        settings,
        ShellSettings::default(),
        "Loading without a config file must return default settings"
    );
    assert_eq!(settings.general.start_url, DEFAULT_START_URL);
    assert_eq!(settings.webview.max_history_entries, 100);
    assert!(settings.voice.enabled);
}

/// After calling `set_value`, the change must be persisted to disk so that a
/// completely new SettingsEngine instance reading the same file sees the update.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("general.start_url", json!("http://localhost:7860"))
            .unwrap();
        assert_eq!(engine.get_settings().general.start_url, "http://localhost:7860");
    }

    let mut reloaded = engine_in_temp(&dir);
    let settings = reloaded.load().unwrap();
    assert_eq!(
        settings.general.start_url, "http://localhost:7860",
        "A fresh engine must see the value written by the previous one"
    );
}

#[test]
fn test_set_value_enum_fields() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine.set_value("general.presentation", json!("Compact")).unwrap();
    engine.set_value("share.target", json!("Email")).unwrap();

    assert_eq!(engine.get_settings().general.presentation, Presentation::Compact);
    assert_eq!(engine.get_settings().share.target, ShareTarget::Email);
}

/// A value of the wrong type is rejected and the in-memory settings keep
/// their previous value.
#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("voice.enabled", json!("yes please"));

    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert!(engine.get_settings().voice.enabled);
}

#[test]
fn test_set_value_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    assert!(matches!(
        engine.set_value("general.homepage", json!("x")),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("nonexistent.key", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(engine.set_value("", json!(1)), Err(SettingsError::InvalidKey(_))));
}

/// `reset()` restores every field to its default and writes the file.
#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_value("window.width", json!(640.0)).unwrap();
    engine.set_value("voice.enabled", json!(false)).unwrap();

    engine.reset().unwrap();

    assert_eq!(*engine.get_settings(), ShellSettings::default());
    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), ShellSettings::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("settings.json");
    let engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));

    engine.save().unwrap();

    assert!(path.exists());
    assert_eq!(engine.get_config_path(), path.to_string_lossy());
}

/// A section with only some of its keys keeps the user's values and fills
/// the rest from defaults instead of rejecting the whole file.
#[test]
fn test_partial_section_fills_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"voice":{"enabled":false},"window":{"width":640.0},"general":{"presentation":"Compact"}}"#,
    )
    .unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let settings = engine.load().unwrap();

    assert!(!settings.voice.enabled);
    assert_eq!(settings.voice.listen_addr, "127.0.0.1:47615");
    assert_eq!(settings.voice.max_requests_per_second, 200);
    assert_eq!(settings.window.width, 640.0);
    assert_eq!(settings.window.height, 800.0);
    assert_eq!(settings.general.presentation, Presentation::Compact);
    assert_eq!(settings.general.start_url, DEFAULT_START_URL);
}
