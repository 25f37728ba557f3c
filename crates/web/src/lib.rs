//! `skincart-web`
//!
//! **Responsibility:** the storefront UI.
//!
//! - [`nav`] and [`forms`] hold the view-independent bits (menu, login
//!   notices, input parsing) and are tested natively.
//! - `frontend` is the Leptos app and its browser adapters; it only exists
//!   in wasm builds.

pub mod forms;
pub mod nav;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
