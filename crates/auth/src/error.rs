use thiserror::Error;

use skincart_core::DomainError;

use crate::storage::StorageError;

/// Failure of an identity mutation (login, sign-up, logout, callback).
///
/// Every variant degrades to a visible message; none is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Input rejected locally before any network call.
    #[error("{0}")]
    Validation(String),

    /// The backend refused the credentials.
    #[error("invalid username or password")]
    Rejected,

    /// The backend could not be reached or answered unexpectedly.
    #[error("authentication service error: {0}")]
    Backend(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<DomainError> for AuthError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
