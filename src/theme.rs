//! Theme palette and resolution.
//!
//! The user picks a [`ThemePreference`]; the presentation layer only ever sees
//! a concrete [`Theme`]. The `system` sentinel is resolved against the
//! platform's dark-mode signal at the moment of resolution and is not tracked
//! afterwards.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// A concrete theme name applied to the document root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Lofi,
    Dark,
    Dracula,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lofi => "lofi",
            Self::Dark => "dark",
            Self::Dracula => "dracula",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user selected: a concrete theme or "follow the system".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Lofi,
    Dark,
    Dracula,
    System,
}

impl ThemePreference {
    /// Every selectable preference, in picker order.
    pub const ALL: [Self; 4] = [Self::Lofi, Self::Dark, Self::Dracula, Self::System];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lofi => "lofi",
            Self::Dark => "dark",
            Self::Dracula => "dracula",
            Self::System => "system",
        }
    }

    /// Human-readable label for pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lofi => "Lofi",
            Self::Dark => "Dark",
            Self::Dracula => "Dracula",
            Self::System => "System",
        }
    }

    /// Substitute the platform preference for `system`.
    ///
    /// A light platform maps to `lofi`, the palette's non-dark default.
    #[must_use]
    pub fn resolve(self, prefers_dark: bool) -> Theme {
        match self {
            Self::Lofi => Theme::Lofi,
            Self::Dark => Theme::Dark,
            Self::Dracula => Theme::Dracula,
            Self::System if prefers_dark => Theme::Dark,
            Self::System => Theme::Lofi,
        }
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lofi" => Ok(Self::Lofi),
            "dark" => Ok(Self::Dark),
            "dracula" => Ok(Self::Dracula),
            "system" => Ok(Self::System),
            other => Err(ThemeError::Invalid(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
