//! `AuthBackend` over HTTP.

use async_trait::async_trait;

use skincart_auth::{AuthBackend, AuthError, AuthGrant, Credentials, SignUp};
use skincart_core::SessionToken;

use crate::dto::{AuthResponse, GoogleTokenRequest};
use crate::error::ClientError;
use crate::http::ApiClient;

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const GOOGLE_TOKEN_PATH: &str = "/auth/login/token/google";
pub const GOOGLE_AUTHORIZATION_PATH: &str = "/oauth2/authorization/google";

impl From<AuthResponse> for AuthGrant {
    fn from(value: AuthResponse) -> Self {
        AuthGrant {
            token: SessionToken::new(value.jwt_token),
            identity: value.user.into(),
        }
    }
}

fn into_grant(result: Result<AuthResponse, ClientError>) -> Result<AuthGrant, AuthError> {
    let resp = result.map_err(AuthError::from)?;
    if resp.jwt_token.trim().is_empty() {
        return Err(AuthError::backend("backend returned an empty session token"));
    }
    Ok(resp.into())
}

#[async_trait(?Send)]
impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        into_grant(self.post_json(LOGIN_PATH, credentials).await)
    }

    async fn sign_up(&self, request: &SignUp) -> Result<AuthGrant, AuthError> {
        into_grant(self.post_json(SIGNUP_PATH, request).await)
    }

    async fn exchange_google_token(&self, id_token: &str) -> Result<AuthGrant, AuthError> {
        let body = GoogleTokenRequest { token: id_token };
        into_grant(self.post_json(GOOGLE_TOKEN_PATH, &body).await)
    }

    fn google_authorization_url(&self) -> String {
        self.config().api(GOOGLE_AUTHORIZATION_PATH)
    }
}
