//! Theme presentation on the document root.
//!
//! Applies the resolved theme as a `data-theme` attribute on `<html>` and reads
//! the platform's dark-mode preference from the `prefers-color-scheme` media
//! query. Without a browser both are inert.

#[cfg(test)]
#[path = "theme_surface_test.rs"]
mod theme_surface_test;

use pocketbook::Theme;
use pocketbook::platform::ThemeSurface;

pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, Default)]
pub struct DomThemeSurface;

impl ThemeSurface for DomThemeSurface {
    fn prefers_dark(&self) -> bool {
        #[cfg(feature = "csr")]
        {
            let Some(window) = web_sys::window() else {
                return false;
            };
            match window.match_media(PREFERS_DARK_QUERY) {
                Ok(query) => query.is_some_and(|q| q.matches()),
                Err(err) => {
                    log::warn!("matchMedia failed: {err:?}");
                    false
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(unused_variables))]
    fn apply(&self, theme: Theme) {
        #[cfg(feature = "csr")]
        {
            let Some(root) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) else {
                log::warn!("no document root; theme {theme} not applied");
                return;
            };
            if let Err(err) = root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
                log::warn!("setting {THEME_ATTRIBUTE} failed: {err:?}");
            }
        }
    }
}
