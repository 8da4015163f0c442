use super::*;
use std::collections::BTreeMap;
use tempfile::tempdir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::load(dir.path().join("altar.json")).unwrap();
    assert_eq!(store.get_settings(), AltarSettings::default());
    assert!(!dir.path().join("altar.json").exists());
}

#[test]
fn test_defaults() {
    let settings = AltarSettings::default();
    assert_eq!(settings.clean_cache_capacity, 1000);
    assert_eq!(settings.match_cache_capacity, 5000);
    assert_eq!(settings.max_text_chars, 2048);
    assert_eq!(settings.recent_unmatched_limit, 5);
    assert_eq!(settings.keywords.boss, vec!["boss".to_string()]);
    assert!(settings.weight_overrides.is_empty());
}

#[test]
fn test_save_then_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("altar.json");
    let store = SettingsStore::load(&path).unwrap();

    let mut settings = store.get_settings();
    settings.max_text_chars = 512;
    settings
        .weight_overrides
        .insert("Boss|Hits always Ignite".into(), 50);
    store.save_settings(settings.clone()).unwrap();

    let reloaded = SettingsStore::load(&path).unwrap();
    assert_eq!(reloaded.get_settings(), settings);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("altar.json");
    std::fs::write(&path, r#"{ "max_text_chars": 300 }"#).unwrap();

    let settings = SettingsStore::load(&path).unwrap().get_settings();
    assert_eq!(settings.max_text_chars, 300);
    assert_eq!(settings.match_cache_capacity, 5000);
}

#[test]
fn test_malformed_file_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("altar.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(SettingsStore::load(&path), Err(AltarError::Json(_))));
}

#[test]
fn test_invalid_settings_rejected() {
    let store = SettingsStore::in_memory(AltarSettings::default());
    let mut bad = store.get_settings();
    bad.weight_overrides = BTreeMap::from([("Boss|X".to_string(), -3)]);

    let err = store.save_settings(bad).unwrap_err();
    assert!(matches!(err, AltarError::Settings(_)));
    assert!(store.get_settings().weight_overrides.is_empty());
}

#[test]
fn test_update_applies_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("altar.json");
    let store = SettingsStore::load(&path).unwrap();

    let updated = store
        .update(|s| s.keywords.boss.push("Eater".into()))
        .unwrap();
    assert_eq!(updated.keywords.boss, vec!["boss".to_string(), "Eater".to_string()]);

    let on_disk: AltarSettings =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, updated);
}

#[test]
fn test_update_rejected_leaves_state() {
    let store = SettingsStore::in_memory(AltarSettings::default());
    assert!(store.update(|s| s.max_text_chars = 0).is_err());
    assert_eq!(store.get_settings().max_text_chars, 2048);
}
