//! # inkpress
//!
//! Leptos + WASM frontend for a small blog CMS backed by a Supabase-style
//! API: public reading pages, reader comments with moderation, and an
//! admin area gated by the account's role.
//!
//! This crate contains pages, components, application state (including
//! the session store that tracks sign-in state and role), and the HTTP
//! client for the backend's auth and row endpoints.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: attach to the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
