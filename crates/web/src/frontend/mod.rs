//! Leptos storefront (client-side rendered).

pub mod app;
pub mod browser;
pub mod context;
pub mod pages;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(app::App);
}
