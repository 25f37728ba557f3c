mod account;
mod auth;
mod catalog;
mod checkout;
mod manager;
mod orders;
mod quiz;
mod staff;

pub use account::AccountPage;
pub use auth::{CallbackPage, LoginPage, SignUpPage};
pub use catalog::{CatalogPage, ProductPage};
pub use checkout::{CartPage, CheckoutPage, PaymentCancelPage, PaymentSuccessPage};
pub use manager::ManagerPage;
pub use orders::OrdersPage;
pub use quiz::QuizPage;
pub use staff::StaffPage;
