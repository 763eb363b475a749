//! Header account label and the preferences dialog.

use leptos::prelude::*;

use crate::components::theme_picker::ThemePicker;
use crate::state::session::SessionState;
use crate::util::modal::{close_modal, show_modal};

pub const PREFERENCES_DIALOG: &str = "preferences-dialog";

#[component]
pub fn AccountStatus() -> impl IntoView {
    let session = expect_context::<SessionState>();

    let open = move |_| {
        if !show_modal(PREFERENCES_DIALOG) {
            log::debug!("preferences dialog not mounted");
        }
    };
    let close = move |_| {
        if !close_modal(PREFERENCES_DIALOG) {
            log::debug!("preferences dialog not mounted");
        }
    };

    view! {
        <div class="flex items-center gap-2">
            <span class="text-sm opacity-80">{move || session.label()}</span>
            <button class="btn btn-ghost btn-sm" on:click=open>"Preferences"</button>
        </div>
        <dialog id=PREFERENCES_DIALOG class="modal">
            <div class="modal-box space-y-4">
                <h3 class="text-lg font-bold">"Preferences"</h3>
                <ThemePicker/>
                <div class="modal-action">
                    <button class="btn" on:click=close>"Close"</button>
                </div>
            </div>
        </dialog>
    }
}
