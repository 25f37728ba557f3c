//! `skincart-client`: typed wrappers around the SkinCart backend REST API.
//!
//! Every endpoint gets an explicit request/response struct; backend JSON is
//! validated at this boundary and nowhere else.

pub mod auth;
pub mod checkout;
pub mod config;
pub mod dto;
pub mod error;
pub mod http;
pub mod payment;

mod cart;
mod feedback;
mod orders;
mod products;
mod promotions;
mod quizzes;
mod routines;
mod users;

pub use checkout::{Checkout, CheckoutRedirect};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::ApiClient;
pub use payment::PaymentClient;
