//! Server configuration from the environment.

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4242";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.stripe.com";
pub const DEFAULT_CURRENCY: &str = "usd";
pub const DEFAULT_SUCCESS_URL: &str = "http://localhost:3000/payment/success";
pub const DEFAULT_CANCEL_URL: &str = "http://localhost:3000/payment/cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub provider_url: String,
    pub secret_key: String,
    pub currency: String,
    /// Fixed pages the provider sends the shopper back to.
    pub success_url: String,
    pub cancel_url: String,
    /// `None` allows any origin.
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            secret_key: "sk_test_dev".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            success_url: DEFAULT_SUCCESS_URL.to_string(),
            cancel_url: DEFAULT_CANCEL_URL.to_string(),
            allowed_origin: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, default: String| std::env::var(name).unwrap_or(default);

        let secret_key = std::env::var("PAYMENT_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("PAYMENT_SECRET_KEY not set; using insecure dev default");
            defaults.secret_key.clone()
        });

        Self {
            bind_addr: var("SKINCART_BIND_ADDR", defaults.bind_addr),
            provider_url: var("PAYMENT_PROVIDER_URL", defaults.provider_url)
                .trim_end_matches('/')
                .to_string(),
            secret_key,
            currency: var("PAYMENT_CURRENCY", defaults.currency).to_ascii_lowercase(),
            success_url: var("CHECKOUT_SUCCESS_URL", defaults.success_url),
            cancel_url: var("CHECKOUT_CANCEL_URL", defaults.cancel_url),
            allowed_origin: std::env::var("SKINCART_ALLOWED_ORIGIN").ok(),
        }
    }
}
