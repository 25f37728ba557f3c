use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::PaymentError;
use crate::provider::{CheckoutSessionParams, PaymentProvider};

pub const CHECKOUT_SESSION_PATH: &str = "/api/checkout-session";

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn PaymentProvider>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Minor units.
    #[serde(rename = "totalAmount")]
    pub total_amount: u64,
    #[serde(rename = "orderID")]
    pub order_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
}

pub fn build_app(provider: Arc<dyn PaymentProvider>, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::GET])
        .allow_headers([header::CONTENT_TYPE]);
    let cors = match config
        .allowed_origin
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok())
    {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(CHECKOUT_SESSION_PATH, post(create_checkout_session))
        .with_state(AppState { provider })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}

pub async fn create_checkout_session(
    State(state): State<AppState>,
    body: Result<Json<CheckoutSessionRequest>, JsonRejection>,
) -> Result<Json<CheckoutSessionResponse>, PaymentError> {
    let Json(body) = body?;
    let order_id = body.order_id.trim();
    if order_id.is_empty() {
        return Err(PaymentError::Validation("orderID is required".to_string()));
    }
    if body.total_amount == 0 {
        return Err(PaymentError::Validation("totalAmount must be greater than zero".to_string()));
    }

    let params = CheckoutSessionParams {
        amount: body.total_amount,
        order_id: order_id.to_string(),
    };
    let session = state.provider.create_checkout_session(&params).await?;

    Ok(Json(CheckoutSessionResponse { id: session.id }))
}
