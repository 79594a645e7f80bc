//! timetable-admin web client.
//!
//! Server-side rendering runs under the `ssr` feature; the browser bundle
//! hydrates under `hydrate` and owns the session.

#![allow(non_snake_case)]

pub mod app;
#[cfg(feature = "ssr")]
pub mod config;
pub mod guard;
pub mod pages;
pub mod session;
#[cfg(feature = "hydrate")]
pub mod storage;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
