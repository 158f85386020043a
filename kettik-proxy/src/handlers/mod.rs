//! HTTP handlers. Each public endpoint validates its input, builds the
//! outbound headers, makes at most one upstream call (the verification
//! check walks the fallback list), and passes the upstream reply through
//! verbatim.

pub mod auth;
pub mod crm;
pub mod payments;
pub mod users;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::error::ProxyError;
use crate::AppState;

/// Fail fast when the service credential is missing. Checked before any
/// outbound call on service-authenticated endpoints.
pub(crate) fn ensure_service_key(state: &AppState) -> Result<(), ProxyError> {
    if state.upstream.is_configured() {
        Ok(())
    } else {
        Err(ProxyError::Config("BOT_API_KEY is not configured".into()))
    }
}

/// Health check endpoint. Never calls upstream.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": state.config.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "time": chrono::Utc::now().to_rfc3339(),
        "upstream": state.upstream.base_url(),
        "service_key_loaded": state.upstream.is_configured(),
    }))
}
