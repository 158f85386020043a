//! Verification endpoints, authenticated with the service credential.

use axum::extract::State;
use serde_json::json;

use crate::dtos::{CheckVerificationRequest, CreateVerificationRequest};
use crate::error::ProxyError;
use crate::extractors::ValidatedJson;
use crate::handlers::ensure_service_key;
use crate::services::{UpstreamAuth, UpstreamResponse};
use crate::AppState;

pub const CREATE_VERIFICATION_PATH: &str = "/auth/bot/create-verification/";

/// POST /auth/bot/create-verification/
///
/// Asks upstream to send a verification code to the given phone. When the
/// request carries no chat_id, the configured dev default is substituted.
pub async fn create_verification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateVerificationRequest>,
) -> Result<UpstreamResponse, ProxyError> {
    let chat_id = payload
        .chat_id
        .or(state.config.upstream.dev_chat_id)
        .ok_or_else(|| {
            ProxyError::Validation("chat_id is required (or set KETTIK_DEV_CHAT_ID)".into())
        })?;
    ensure_service_key(&state)?;

    tracing::info!("forwarding verification creation");

    let body = json!({
        "phone_number": payload.phone_number,
        "chat_id": chat_id,
    });

    state
        .upstream
        .post_json(CREATE_VERIFICATION_PATH, &UpstreamAuth::Service, &body)
        .await
}

/// POST /auth/bot/check/
///
/// Checks a verification code via the fallback prober: the candidate paths
/// are tried in order and the first 200 wins; on exhaustion the last
/// attempt's reply is returned.
pub async fn check_verification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CheckVerificationRequest>,
) -> Result<UpstreamResponse, ProxyError> {
    ensure_service_key(&state)?;

    let body = json!({
        "phone_number": payload.phone_number,
        "code": payload.code,
    });

    let outcome = state.prober.probe(&state.upstream, &body).await?;
    Ok(outcome.into_inner())
}
