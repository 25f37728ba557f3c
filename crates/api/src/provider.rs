//! Hosted checkout provider seam and its HTTP implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ServerConfig;
use crate::errors::PaymentError;

/// What we ask the provider for: one payment of `amount` for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionParams {
    /// Minor units.
    pub amount: u64,
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<ProviderSession, PaymentError>;
}

/// Stripe-compatible `POST /v1/checkout/sessions` client.
#[derive(Debug, Clone)]
pub struct HostedCheckoutProvider {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
    currency: String,
    success_url: String,
    cancel_url: String,
}

impl HostedCheckoutProvider {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.provider_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            currency: config.currency.clone(),
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
        }
    }

    fn form(&self, params: &CheckoutSessionParams) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
            ("client_reference_id", params.order_id.clone()),
            ("metadata[orderID]", params.order_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", self.currency.clone()),
            ("line_items[0][price_data][unit_amount]", params.amount.to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                format!("Order {}", params.order_id),
            ),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

#[async_trait]
impl PaymentProvider for HostedCheckoutProvider {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<ProviderSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.base_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&self.form(params))
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let session: ProviderSession = resp
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;
        tracing::info!(order = %params.order_id, session = %session.id, "checkout session created");
        Ok(session)
    }
}
