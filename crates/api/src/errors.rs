use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("{0}")]
    Validation(String),

    /// Body rejected before it reached the handler (bad JSON, missing field).
    #[error("invalid request body: {message}")]
    InvalidBody { status: u16, message: String },

    #[error("payment provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("payment provider unreachable: {0}")]
    Network(String),

    #[error("unexpected provider response: {0}")]
    Parse(String),
}

impl From<JsonRejection> for PaymentError {
    fn from(rejection: JsonRejection) -> Self {
        PaymentError::InvalidBody {
            status: rejection.status().as_u16(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PaymentError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
            PaymentError::InvalidBody { status, message } => json_error(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
                "invalid_request",
                message,
            ),
            other => {
                tracing::error!("checkout session failed: {other}");
                json_error(StatusCode::BAD_GATEWAY, "provider_error", other.to_string())
            }
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
