//! # scheduler-console
//!
//! Leptos + WASM operator console for the distributed job scheduler.
//!
//! The core is the authenticated request pipeline (`net::client`), the
//! session store it reads and mutates (`state::session`), and the route
//! guard (`util::guard`). Pages and components are thin users of those.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install logging and the panic hook, then hydrate.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    leptos::mount::hydrate_body(app::App);
}
