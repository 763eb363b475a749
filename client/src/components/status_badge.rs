//! Budget-status badge and category glyph, driven by the lookup tables.

#[cfg(test)]
#[path = "status_badge_test.rs"]
mod status_badge_test;

use leptos::prelude::*;
use pocketbook::lookup::{Icon, icon_for_category, status_class, status_icon};

/// Markup referencing `icon` in the SVG sprite.
pub fn sprite_markup(icon: Icon) -> String {
    format!(r#"<use href="{}"></use>"#, icon.sprite_href())
}

/// Pill for a budget status label; unknown labels render neutral.
#[component]
pub fn StatusBadge(#[prop(into)] label: String) -> impl IntoView {
    let class = format!("badge gap-1 {}", status_class(&label));
    let icon = sprite_markup(status_icon(&label));
    view! {
        <span class=class>
            <svg class="h-4 w-4" aria-hidden="true" inner_html=icon></svg>
            {label}
        </span>
    }
}

/// Icon for a category display name; unknown names use the fallback icon.
#[component]
pub fn CategoryGlyph(#[prop(into)] name: String) -> impl IntoView {
    let icon = sprite_markup(icon_for_category(&name));
    view! { <svg class="h-5 w-5" role="img" aria-label=name inner_html=icon></svg> }
}
