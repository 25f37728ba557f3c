//! Thin JSON-over-HTTP wrapper: build URL, attach bearer token, send,
//! map the status, decode. No retries.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use skincart_core::SessionToken;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    token: Option<SessionToken>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: None,
        }
    }

    /// Same client, authenticating as `token` (or anonymously for `None`).
    pub fn authed(&self, token: Option<SessionToken>) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            token,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let req = self.http.get(self.config.api(path));
        self.send_json(req).await
    }

    pub(crate) async fn get_json_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.http.get(self.config.api(path)).query(query);
        self.send_json(req).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.post(self.config.api(path)).json(body);
        self.send_json(req).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.put(self.config.api(path)).json(body);
        self.send_json(req).await
    }

    /// POST without a body, expecting JSON back.
    pub(crate) async fn post_empty<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let req = self.http.post(self.config.api(path));
        self.send_json(req).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let req = self.http.delete(self.config.api(path));
        self.send(req).await.map(|_| ())
    }

    async fn send_json<T>(&self, req: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let resp = self.send(req).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("unexpected response shape: {e}");
            ClientError::Parse(e.to_string())
        })
    }

    async fn send(&self, mut req: RequestBuilder) -> Result<Response, ClientError> {
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("request failed: {e}");
            ClientError::Network(e.to_string())
        })?;

        check_status(resp).await
    }
}

/// Map non-success statuses to typed errors, keeping the body for `Api`.
pub(crate) async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().path().to_string();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %url, "backend returned an error");

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        other => ClientError::Api(other.as_u16(), error_message(&body)),
    })
}

/// Prefer the backend's `{"message": ...}` field when there is one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Percent-encode one path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(error_message(r#"{"error":"x","message":"email taken"}"#), "email taken");
        assert_eq!(error_message("plain failure"), "plain failure");
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
