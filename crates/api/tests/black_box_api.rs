use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use skincart_api::config::ServerConfig;
use skincart_api::errors::PaymentError;
use skincart_api::provider::{CheckoutSessionParams, PaymentProvider, ProviderSession};

#[derive(Default)]
struct RecordingProvider {
    calls: Mutex<Vec<CheckoutSessionParams>>,
    fail: bool,
}

#[async_trait]
impl PaymentProvider for RecordingProvider {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<ProviderSession, PaymentError> {
        self.calls.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(PaymentError::Provider {
                status: 401,
                message: "bad key".to_string(),
            });
        }
        Ok(ProviderSession {
            id: format!("cs_{}", params.order_id),
            url: None,
        })
    }
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(provider: Arc<RecordingProvider>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = skincart_api::app::build_app(provider, &ServerConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_ok() {
    let server = TestServer::spawn(Arc::new(RecordingProvider::default())).await;
    let res = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn creates_session_and_returns_its_id() {
    let provider = Arc::new(RecordingProvider::default());
    let server = TestServer::spawn(provider.clone()).await;

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout-session"))
        .json(&json!({"totalAmount": 4599, "orderID": "o-1"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"id": "cs_o-1"}));

    let calls = provider.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![CheckoutSessionParams {
            amount: 4599,
            order_id: "o-1".to_string()
        }]
    );
}

#[tokio::test]
async fn rejects_zero_amount_and_blank_order_without_calling_provider() {
    let provider = Arc::new(RecordingProvider::default());
    let server = TestServer::spawn(provider.clone()).await;
    let client = reqwest::Client::new();

    for body in [
        json!({"totalAmount": 0, "orderID": "o-1"}),
        json!({"totalAmount": 100, "orderID": "   "}),
    ] {
        let res = client
            .post(server.url("/api/checkout-session"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: serde_json::Value = res.json().await.unwrap();
        assert_eq!(err["error"], "validation_error");
    }

    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let server = TestServer::spawn(Arc::new(RecordingProvider::default())).await;

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout-session"))
        .json(&json!({"totalAmount": -5}))
        .send()
        .await
        .unwrap();

    assert!(res.status().is_client_error());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn non_json_body_gets_json_error() {
    let provider = Arc::new(RecordingProvider::default());
    let server = TestServer::spawn(provider.clone()).await;

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout-session"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_content_type_gets_json_error() {
    let server = TestServer::spawn(Arc::new(RecordingProvider::default())).await;

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout-session"))
        .body(r#"{"totalAmount": 100, "orderID": "o-1"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() {
    let provider = Arc::new(RecordingProvider {
        fail: true,
        ..RecordingProvider::default()
    });
    let server = TestServer::spawn(provider).await;

    let res = reqwest::Client::new()
        .post(server.url("/api/checkout-session"))
        .json(&json!({"totalAmount": 100, "orderID": "o-9"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "provider_error");
}
