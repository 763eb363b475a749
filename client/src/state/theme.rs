//! Theme preference state and the user's entry point for changing it.

use leptos::prelude::*;
use pocketbook::{ThemeHandle, ThemePreference};

/// Current preference (written by the sync engine) plus the edit handle.
#[derive(Clone, Debug)]
pub struct ThemeState {
    pub preference: RwSignal<ThemePreference>,
    handle: ThemeHandle,
}

impl ThemeState {
    pub fn new(preference: RwSignal<ThemePreference>, handle: ThemeHandle) -> Self {
        Self { preference, handle }
    }

    /// Queue a theme change. The engine applies it and persists it.
    pub fn select(&self, preference: ThemePreference) {
        if let Err(err) = self.handle.select(preference) {
            log::warn!("theme change to {preference} dropped: {err}");
        }
    }
}
