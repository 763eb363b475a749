//! # pocketbook-client
//!
//! Leptos + WASM frontend for Pocketbook. Wires the platform-independent
//! `pocketbook` core to the browser: localStorage, the `data-theme` attribute,
//! the `prefers-color-scheme` media query, `<dialog>` elements, the hosted auth
//! provider and the Firestore REST API.
//!
//! Browser calls are compiled only with the `csr` feature. Without it every
//! adapter is an inert stand-in so the crate builds and tests natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
