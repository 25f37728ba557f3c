use thiserror::Error;

use skincart_auth::AuthError;
use skincart_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    /// 401: missing or expired session token.
    #[error("not authorized; please sign in again")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("API error ({0}): {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Forbidden => Some(403),
            ClientError::NotFound => Some(404),
            ClientError::Api(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ClientError::Parse(value.to_string())
        } else {
            ClientError::Network(value.to_string())
        }
    }
}

impl From<ClientError> for AuthError {
    fn from(value: ClientError) -> Self {
        match value {
            ClientError::Unauthorized | ClientError::Forbidden => AuthError::Rejected,
            ClientError::Domain(e) => e.into(),
            ClientError::Api(400 | 409 | 422, body) => AuthError::Validation(body),
            other => AuthError::Backend(other.to_string()),
        }
    }
}
