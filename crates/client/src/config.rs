//! Client configuration.
//!
//! Natively the values come from the environment at startup; in the wasm
//! bundle there is no environment, so the same variables are read at
//! compile time.

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAYMENT_URL: &str = "http://localhost:4242";
pub const DEFAULT_HOSTED_CHECKOUT_URL: &str = "https://checkout.stripe.com/c/pay";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend REST API base URL.
    pub api_url: String,
    /// Base URL of the server exposing `/api/checkout-session`.
    pub payment_url: String,
    /// Provider page the browser is sent to; the session id is appended.
    pub hosted_checkout_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
            hosted_checkout_url: DEFAULT_HOSTED_CHECKOUT_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: trim_base(api_url.into()),
            ..Self::default()
        }
    }

    pub fn with_payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = trim_base(url.into());
        self
    }

    pub fn with_hosted_checkout_url(mut self, url: impl Into<String>) -> Self {
        self.hosted_checkout_url = trim_base(url.into());
        self
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| {
                tracing::info!("{name} not set; using {default}");
                default.to_string()
            })
        };

        Self::new(var("SKINCART_API_URL", DEFAULT_API_URL))
            .with_payment_url(var("SKINCART_PAYMENT_URL", DEFAULT_PAYMENT_URL))
            .with_hosted_checkout_url(var(
                "SKINCART_HOSTED_CHECKOUT_URL",
                DEFAULT_HOSTED_CHECKOUT_URL,
            ))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::new(option_env!("SKINCART_API_URL").unwrap_or(DEFAULT_API_URL))
            .with_payment_url(option_env!("SKINCART_PAYMENT_URL").unwrap_or(DEFAULT_PAYMENT_URL))
            .with_hosted_checkout_url(
                option_env!("SKINCART_HOSTED_CHECKOUT_URL").unwrap_or(DEFAULT_HOSTED_CHECKOUT_URL),
            )
    }

    pub fn api(&self, path: &str) -> String {
        join(&self.api_url, path)
    }

    pub fn payment(&self, path: &str) -> String {
        join(&self.payment_url, path)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_double_slashes() {
        let cfg = ClientConfig::new("http://api.test/");
        assert_eq!(cfg.api("/auth/login"), "http://api.test/auth/login");
        assert_eq!(cfg.api("products"), "http://api.test/products");
    }

    #[test]
    fn defaults_point_at_local_services() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.payment("/api/checkout-session"), "http://localhost:4242/api/checkout-session");
    }
}
