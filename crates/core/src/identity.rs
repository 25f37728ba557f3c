//! The authenticated user as the client sees it.

use serde::{Deserialize, Serialize};

use crate::{Role, SkinType, UserId};

/// Profile of the logged-in user held client-side.
///
/// `id` is absent when the identity was assembled from an OAuth redirect,
/// which only carries email, display name and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub id: Option<UserId>,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub skin_type: Option<SkinType>,
    #[serde(default)]
    pub loyalty_points: u32,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            display_name: display_name.into(),
            email: email.into(),
            role,
            skin_type: None,
            loyalty_points: 0,
            avatar_url: None,
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_staff_or_manager(&self) -> bool {
        matches!(self.role, Role::Staff | Role::Manager)
    }
}

/// Opaque bearer credential issued by the backend.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_json_uses_camel_case_and_defaults() {
        let json = r#"{"displayName":"Mai","role":"STAFF"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.display_name, "Mai");
        assert_eq!(identity.role, Role::Staff);
        assert_eq!(identity.loyalty_points, 0);
        assert!(identity.id.is_none());

        let out = serde_json::to_value(&identity).unwrap();
        assert!(out.get("loyaltyPoints").is_some());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret-jwt");
        assert_eq!(format!("{token:?}"), "SessionToken(***)");
    }
}
