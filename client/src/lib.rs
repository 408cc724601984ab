//! # givemap-client
//!
//! Leptos + WASM frontend for the givebox map.
//!
//! This crate contains the map page, its components, the browser gateway and
//! the Leptos session that drives the `givemap` view engine. The map widget is
//! Leaflet, bridged through `util::leaflet`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logger unavailable: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
