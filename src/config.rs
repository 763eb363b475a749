//! Client configuration.
//!
//! Natively the values come from environment variables; the browser build bakes
//! the same keys in at compile time and feeds them through [`ClientConfig::from_vars`].
//!
//! Required:
//! - `POCKETBOOK_FIREBASE_PROJECT_ID`
//!
//! Optional:
//! - `POCKETBOOK_FIRESTORE_DATABASE`: default `(default)`
//! - `POCKETBOOK_DEFAULT_THEME`: default `lofi`
//! - `POCKETBOOK_THEME_STORAGE_KEY`: default `theme`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;
use crate::sync::SyncSettings;
use crate::theme::ThemePreference;

pub const PROJECT_ID_VAR: &str = "POCKETBOOK_FIREBASE_PROJECT_ID";
pub const DATABASE_VAR: &str = "POCKETBOOK_FIRESTORE_DATABASE";
pub const DEFAULT_THEME_VAR: &str = "POCKETBOOK_DEFAULT_THEME";
pub const THEME_STORAGE_KEY_VAR: &str = "POCKETBOOK_THEME_STORAGE_KEY";

pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub project_id: String,
    pub database: String,
    pub default_theme: ThemePreference,
    pub theme_storage_key: String,
}

impl ClientConfig {
    /// Build config from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the project id is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the project id is missing or a value is invalid.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let project_id = read(PROJECT_ID_VAR).ok_or(ConfigError::Missing(PROJECT_ID_VAR))?;
        let database = read(DATABASE_VAR).unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
        let default_theme = match read(DEFAULT_THEME_VAR) {
            Some(raw) => raw
                .parse::<ThemePreference>()
                .map_err(|e| ConfigError::Invalid { key: DEFAULT_THEME_VAR, reason: e.to_string() })?,
            None => ThemePreference::default(),
        };
        let theme_storage_key = read(THEME_STORAGE_KEY_VAR).unwrap_or_else(|| DEFAULT_THEME_STORAGE_KEY.to_owned());

        Ok(Self { project_id, database, default_theme, theme_storage_key })
    }

    /// Theme-sync settings derived from this config.
    #[must_use]
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings { default_theme: self.default_theme, theme_storage_key: self.theme_storage_key.clone() }
    }
}
