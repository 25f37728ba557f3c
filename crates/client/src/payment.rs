//! Client for the payment route served by `skincart-api`.

use crate::config::ClientConfig;
use crate::dto::{CheckoutSessionRequest, CheckoutSessionResponse};
use crate::error::ClientError;
use crate::http::{check_status, segment};

pub const CHECKOUT_SESSION_PATH: &str = "/api/checkout-session";

#[derive(Debug, Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PaymentClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSessionResponse, ClientError> {
        let resp = self
            .http
            .post(self.config.payment(CHECKOUT_SESSION_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(order = %request.order_id, "checkout session request failed: {e}");
                ClientError::Network(e.to_string())
            })?;

        let resp = check_status(resp).await?;
        let session: CheckoutSessionResponse = resp.json().await?;
        if session.id.trim().is_empty() {
            return Err(ClientError::Parse("empty checkout session id".to_string()));
        }
        Ok(session)
    }

    /// Provider page for `session_id`.
    pub fn hosted_checkout_url(&self, session_id: &str) -> String {
        format!("{}/{}", self.config.hosted_checkout_url, segment(session_id))
    }
}
