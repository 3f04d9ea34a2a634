//! # client
//!
//! Leptos + WASM frontend for the GECOS room-booking service.
//!
//! This crate contains pages, components, and reactive state. Session
//! lifecycle, request decoration, and route admission live in the `session`
//! crate; this crate supplies the browser halves of its seams (`gloo-net`
//! transport, `localStorage` persistence) and mirrors session changes into
//! Leptos signals.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
