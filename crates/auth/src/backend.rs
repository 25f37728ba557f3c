//! Backend seam for identity mutations.
//!
//! `skincart-client` implements this over HTTP; tests implement it in memory.

use async_trait::async_trait;
use serde::Serialize;

use skincart_core::{Identity, SessionToken};

use crate::error::AuthError;

/// Username/password pair for `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::validation("username is required"));
        }
        if password.is_empty() {
            return Err(AuthError::validation("password is required"));
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Registration payload for `POST /auth/signup`.
///
/// The confirmation is checked on construction and never sent.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl SignUp {
    pub fn new(username: &str, password: &str, confirmation: &str) -> Result<Self, AuthError> {
        let Credentials { username, password } = Credentials::new(username, password)?;
        if password != confirmation {
            return Err(AuthError::validation("passwords do not match"));
        }
        Ok(Self {
            username,
            password,
            full_name: None,
        })
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        self.full_name = (!full_name.trim().is_empty()).then_some(full_name);
        self
    }
}

impl core::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignUp")
            .field("username", &self.username)
            .field("password", &"***")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// What the backend hands back on any successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: SessionToken,
    pub identity: Identity,
}

#[async_trait(?Send)]
pub trait AuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError>;

    async fn sign_up(&self, request: &SignUp) -> Result<AuthGrant, AuthError>;

    /// Exchange a Google ID token obtained in-page for a backend session.
    async fn exchange_google_token(&self, id_token: &str) -> Result<AuthGrant, AuthError>;

    /// Absolute URL that starts the server-side Google OAuth dance.
    fn google_authorization_url(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_fields() {
        assert!(matches!(Credentials::new("  ", "pw"), Err(AuthError::Validation(_))));
        assert!(matches!(Credentials::new("ann", ""), Err(AuthError::Validation(_))));
        assert_eq!(Credentials::new(" ann ", "pw").unwrap().username, "ann");
    }

    #[test]
    fn sign_up_rejects_mismatched_confirmation() {
        let err = SignUp::new("ann", "secret1", "secret2").unwrap_err();
        assert_eq!(err, AuthError::Validation("passwords do not match".to_string()));
    }

    #[test]
    fn debug_never_shows_passwords() {
        let creds = Credentials::new("ann", "hunter2").unwrap();
        assert!(!format!("{creds:?}").contains("hunter2"));
        let sign_up = SignUp::new("ann", "hunter2", "hunter2").unwrap();
        assert!(!format!("{sign_up:?}").contains("hunter2"));
    }

    #[test]
    fn sign_up_serializes_without_confirmation() {
        let body = SignUp::new("ann", "pw", "pw").unwrap().with_full_name("Ann Lee");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["fullName"], "Ann Lee");
        assert!(json.get("confirmation").is_none());
    }
}
