use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_vars_applies_defaults() {
    let cfg = ClientConfig::from_vars(lookup(&[(PROJECT_ID_VAR, "pocketbook-dev")])).unwrap();
    assert_eq!(cfg.project_id, "pocketbook-dev");
    assert_eq!(cfg.database, DEFAULT_DATABASE);
    assert_eq!(cfg.default_theme, ThemePreference::Lofi);
    assert_eq!(cfg.theme_storage_key, DEFAULT_THEME_STORAGE_KEY);
}

#[test]
fn from_vars_parses_overrides() {
    let cfg = ClientConfig::from_vars(lookup(&[
        (PROJECT_ID_VAR, " pocketbook-prod "),
        (DATABASE_VAR, "eu"),
        (DEFAULT_THEME_VAR, "dracula"),
        (THEME_STORAGE_KEY_VAR, "pb-theme"),
    ]))
    .unwrap();

    assert_eq!(cfg.project_id, "pocketbook-prod");
    assert_eq!(cfg.database, "eu");
    assert_eq!(cfg.default_theme, ThemePreference::Dracula);
    assert_eq!(cfg.theme_storage_key, "pb-theme");
}

#[test]
fn from_vars_requires_project_id() {
    let err = ClientConfig::from_vars(lookup(&[])).unwrap_err();
    assert_eq!(err, ConfigError::Missing(PROJECT_ID_VAR));
}

#[test]
fn blank_project_id_counts_as_missing() {
    let err = ClientConfig::from_vars(lookup(&[(PROJECT_ID_VAR, "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing(PROJECT_ID_VAR));
}

#[test]
fn from_vars_rejects_unknown_default_theme() {
    let err = ClientConfig::from_vars(lookup(&[(PROJECT_ID_VAR, "p"), (DEFAULT_THEME_VAR, "neon")])).unwrap_err();
    assert!(err.to_string().contains(DEFAULT_THEME_VAR));
    assert!(err.to_string().contains("neon"));
}

#[test]
fn sync_settings_carry_theme_values() {
    let cfg = ClientConfig::from_vars(lookup(&[(PROJECT_ID_VAR, "p"), (DEFAULT_THEME_VAR, "dark")])).unwrap();
    let settings = cfg.sync_settings();
    assert_eq!(settings.default_theme, ThemePreference::Dark);
    assert_eq!(settings.theme_storage_key, DEFAULT_THEME_STORAGE_KEY);
}
