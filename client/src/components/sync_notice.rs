//! Dismissible banner for background sync failures.

#[cfg(test)]
#[path = "sync_notice_test.rs"]
mod sync_notice_test;

use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use leptos::prelude::*;
use pocketbook::sync::Operation;
use pocketbook::SyncFailure;

/// Latest failure message, if not dismissed.
#[derive(Clone, Copy, Debug)]
pub struct NoticeState {
    pub message: RwSignal<Option<String>>,
}

impl NoticeState {
    pub fn new() -> Self {
        Self { message: RwSignal::new(None) }
    }
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::new()
    }
}

/// User-facing text for a failure.
pub fn failure_message(failure: &SyncFailure) -> String {
    let what = match failure.operation {
        Operation::ProvisionProfile => "Could not set up your profile",
        Operation::LoadTheme => "Could not load your saved theme",
        Operation::SaveTheme => "Could not save your theme",
        Operation::CacheTheme => "Could not remember your theme on this device",
    };
    format!("{what}: {}", failure.error)
}

/// Forward engine failures into the notice until the engine stops.
pub async fn relay_failures(mut failures: UnboundedReceiver<SyncFailure>, notice: NoticeState) {
    while let Some(failure) = failures.next().await {
        notice.message.set(Some(failure_message(&failure)));
    }
}

#[component]
pub fn SyncNotice() -> impl IntoView {
    let notice = expect_context::<NoticeState>();
    move || {
        notice.message.get().map(|message| {
            view! {
                <div role="alert" class="alert alert-warning m-4">
                    <span>{message}</span>
                    <button class="btn btn-xs" on:click=move |_| notice.message.set(None)>"Dismiss"</button>
                </div>
            }
        })
    }
}
