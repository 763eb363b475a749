//! Root application component.
//!
//! Builds the sync engine over browser adapters, starts it, connects the auth
//! provider and provides shared state to the component tree.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use pocketbook::firestore::FirestoreEndpoint;
use pocketbook::lookup::{BudgetStatus, CATEGORY_ICONS};
use pocketbook::memory::MemoryDocumentStore;
use pocketbook::platform::SystemClock;
use pocketbook::validation::Validator;
use pocketbook::{DocumentStore, SyncCells, SyncDeps, SyncEngine, SyncSettings};

use crate::components::account_status::AccountStatus;
use crate::components::status_badge::{CategoryGlyph, StatusBadge};
use crate::components::sync_notice::{NoticeState, SyncNotice, relay_failures};
use crate::config;
use crate::net::auth_bridge;
use crate::net::firestore::FirestoreStore;
use crate::state::session::SessionState;
use crate::state::signal_cell::SignalCell;
use crate::state::theme::ThemeState;
use crate::util::storage::BrowserLocalStore;
use crate::util::theme_surface::DomThemeSurface;

/// Firestore when a project is configured, otherwise an in-memory store.
fn document_store(session: SessionState) -> (SyncSettings, Rc<dyn DocumentStore>) {
    match config::load() {
        Ok(config) => {
            log::info!("using Firestore project {}", config.project_id);
            let store = FirestoreStore::new(FirestoreEndpoint::from_config(&config), session.cell());
            (config.sync_settings(), Rc::new(store))
        }
        Err(err) => {
            log::warn!("{err}; falling back to an in-memory document store");
            (SyncSettings::default(), Rc::new(MemoryDocumentStore::new()))
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionState::new();
    let notice = NoticeState::new();
    let (settings, documents) = document_store(session);
    let preference = RwSignal::new(settings.default_theme);

    let deps = SyncDeps {
        documents: Rc::clone(&documents),
        local: Rc::new(BrowserLocalStore),
        surface: Rc::new(DomThemeSurface),
        clock: Rc::new(SystemClock),
    };
    let cells = SyncCells { session: session.cell(), theme: Rc::new(SignalCell(preference)) };
    let (mut engine, feed, handle) = SyncEngine::new(deps, cells, settings);
    leptos::task::spawn_local(relay_failures(engine.failures(), notice));
    leptos::task::spawn_local(engine.run());

    // Held by the root owner so the provider stays subscribed for the page's life.
    let subscription = match auth_bridge::subscribe(feed) {
        Ok(subscription) => Some(subscription),
        Err(err) => {
            log::error!("auth provider unavailable: {err}");
            None
        }
    };
    StoredValue::new_local(subscription);

    provide_context(session);
    provide_context(notice);
    provide_context(ThemeState::new(preference, handle));
    // Existence checks for category and budget forms.
    provide_context(StoredValue::new_local(Validator::new(documents, session.cell())));

    let statuses = [BudgetStatus::OnTrack, BudgetStatus::AtLimit, BudgetStatus::OverBudget];

    view! {
        <Title text="Pocketbook"/>
        <div class="min-h-screen bg-base-200 text-base-content">
            <header class="navbar bg-base-100 shadow-sm px-4">
                <span class="flex-1 text-lg font-semibold">"Pocketbook"</span>
                <AccountStatus/>
            </header>
            <SyncNotice/>
            <main class="p-4 space-y-6">
                <section>
                    <h2 class="mb-2 font-semibold">"Budget status"</h2>
                    <div class="flex gap-2">
                        {statuses.into_iter().map(|status| view! { <StatusBadge label=status.label()/> }).collect_view()}
                    </div>
                </section>
                <section>
                    <h2 class="mb-2 font-semibold">"Categories"</h2>
                    <ul class="grid grid-cols-3 gap-2">
                        {CATEGORY_ICONS
                            .iter()
                            .map(|entry| {
                                view! {
                                    <li class="flex items-center gap-2">
                                        <CategoryGlyph name=entry.name/>
                                        <span>{entry.name}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </section>
            </main>
        </div>
    }
}
