//! Compile-time client configuration.
//!
//! The browser has no process environment, so the `POCKETBOOK_*` keys are baked
//! in when the bundle is built and handed to the core's config parser.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use pocketbook::ClientConfig;
use pocketbook::config::{DATABASE_VAR, DEFAULT_THEME_VAR, PROJECT_ID_VAR, THEME_STORAGE_KEY_VAR};
use pocketbook::error::ConfigError;

/// Value of a configuration key as captured at build time.
pub fn compiled_var(key: &str) -> Option<String> {
    let value = match key {
        PROJECT_ID_VAR => option_env!("POCKETBOOK_FIREBASE_PROJECT_ID"),
        DATABASE_VAR => option_env!("POCKETBOOK_FIRESTORE_DATABASE"),
        DEFAULT_THEME_VAR => option_env!("POCKETBOOK_DEFAULT_THEME"),
        THEME_STORAGE_KEY_VAR => option_env!("POCKETBOOK_THEME_STORAGE_KEY"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// Parse the build-time configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when no project id was compiled in.
pub fn load() -> Result<ClientConfig, ConfigError> {
    ClientConfig::from_vars(compiled_var)
}
