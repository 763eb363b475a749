//! Host-platform seams: persistent key-value storage, the theme presentation
//! surface, and the wall clock.

use time::OffsetDateTime;

use crate::error::SyncError;
use crate::theme::Theme;

/// Local persistent key-value storage (browser `localStorage`).
pub trait LocalStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`SyncError::Storage`] if the platform refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), SyncError>;
}

/// Where the resolved theme is shown, plus the platform dark-mode signal.
pub trait ThemeSurface {
    /// Point-in-time read of the platform's dark-mode preference.
    fn prefers_dark(&self) -> bool;

    /// Present `theme` (sets the root `data-theme` attribute in the browser).
    fn apply(&self, theme: Theme);
}

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// UTC wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
