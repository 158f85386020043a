//! Upstream HTTP client adapter.
//!
//! Issues exactly one outbound request per call and reports the upstream
//! status and body as data. Only transport failures (timeouts, connection
//! errors) become [`ProxyError`]s; upstream 4xx/5xx responses are returned
//! verbatim to the caller.

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::{Client, Method};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Header carrying the static service credential.
pub const BOT_API_KEY_HEADER: &str = "X-Bot-API-Key";

/// How an outbound request authenticates against upstream.
#[derive(Debug, Clone)]
pub enum UpstreamAuth {
    /// Service-level call: only the `X-Bot-API-Key` credential.
    Service,
    /// User-level call: forwarded bearer token, plus the service
    /// credential when one is configured.
    Bearer(String),
}

/// An upstream reply, passed through to the client unmodified.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl UpstreamResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.body)).into_response()
    }
}

/// Client for the Kettik REST API. Cheap to clone; the inner
/// `reqwest::Client` pools connections internally.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Whether the service credential is set.
    pub fn is_configured(&self) -> bool {
        !self.config.bot_api_key.expose_secret().is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Issue one request to `base_url + path` and return whatever upstream
    /// answered. `query` is forwarded as-is when present.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        auth: &UpstreamAuth,
        body: Option<&serde_json::Value>,
        query: Option<&str>,
    ) -> Result<UpstreamResponse, ProxyError> {
        let url = match query {
            Some(q) => format!("{}{}?{}", self.config.base_url, path, q),
            None => format!("{}{}", self.config.base_url, path),
        };

        let mut request = self.http.request(method.clone(), &url);

        if self.is_configured() {
            request = request.header(BOT_API_KEY_HEADER, self.config.bot_api_key.expose_secret());
        }
        if let UpstreamAuth::Bearer(token) = auth {
            request = request.bearer_auth(token);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;

        tracing::debug!(%method, path, status, "upstream response");

        Ok(UpstreamResponse {
            status,
            body: parse_body(&text),
        })
    }

    pub async fn get(&self, path: &str, auth: &UpstreamAuth) -> Result<UpstreamResponse, ProxyError> {
        self.send(Method::GET, path, auth, None, None).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        auth: &UpstreamAuth,
        body: &serde_json::Value,
    ) -> Result<UpstreamResponse, ProxyError> {
        self.send(Method::POST, path, auth, Some(body), None).await
    }
}

fn map_transport_error(err: reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        tracing::warn!(error = %err, "upstream request timed out");
        ProxyError::UpstreamTimeout
    } else {
        tracing::warn!(error = %err, "upstream transport failure");
        ProxyError::UpstreamUnreachable(err.without_url().to_string())
    }
}

/// Upstream bodies are passed through as JSON; anything that does not
/// parse is wrapped as `{"raw": <text>}`.
fn parse_body(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}
