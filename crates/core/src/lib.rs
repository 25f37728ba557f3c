//! `skincart-core`: domain primitives shared by every SkinCart crate.
//!
//! This crate contains **pure domain** types (no HTTP, no storage, no UI).

pub mod cart;
pub mod error;
pub mod id;
pub mod identity;
pub mod order;
pub mod quiz;
pub mod role;
pub mod skin;

pub use cart::{CartLine, CartTotals, Discount};
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId, PromotionId, QuizId, RoutineId, UserId};
pub use identity::{Identity, SessionToken};
pub use order::OrderStatus;
pub use quiz::{QuizAnswer, QuizWizard, WizardOption, WizardQuestion, WizardStep};
pub use role::Role;
pub use skin::SkinType;
