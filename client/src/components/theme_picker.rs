//! Theme selector bound to the shared theme state.

use leptos::prelude::*;
use pocketbook::ThemePreference;

use crate::state::theme::ThemeState;

/// `<select>` over every theme preference. The current option follows the
/// engine-owned preference signal; a change is sent to the engine, which
/// applies and persists it.
#[component]
pub fn ThemePicker() -> impl IntoView {
    let theme = expect_context::<ThemeState>();
    let preference = theme.preference;

    let on_change = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        match raw.parse::<ThemePreference>() {
            Ok(next) => theme.select(next),
            Err(err) => log::warn!("ignoring theme option: {err}"),
        }
    };

    view! {
        <label class="form-control w-full max-w-xs">
            <span class="label-text">"Theme"</span>
            <select class="select select-bordered select-sm" on:change=on_change>
                {ThemePreference::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option value=option.as_str() selected=move || preference.get() == option>
                                {option.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
