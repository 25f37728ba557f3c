//! Payment route: turns `{totalAmount, orderID}` into a hosted checkout
//! session at the payment provider and returns its id.

pub mod app;
pub mod config;
pub mod errors;
pub mod provider;
