//! Payment passthrough endpoints (balance topup and saved cards).

use axum::extract::{Path, State};
use reqwest::Method;

use crate::dtos::TopupRequest;
use crate::error::ProxyError;
use crate::extractors::{BearerToken, ValidatedJson};
use crate::services::{UpstreamAuth, UpstreamResponse};
use crate::AppState;

/// POST /payments/topup/
pub async fn topup(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ValidatedJson(payload): ValidatedJson<TopupRequest>,
) -> Result<UpstreamResponse, ProxyError> {
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::new)?;

    state
        .upstream
        .post_json("/payments/topup/", &UpstreamAuth::Bearer(token), &body)
        .await
}

/// GET /payments/methods/
pub async fn payment_methods(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .get("/payments/methods/", &UpstreamAuth::Bearer(token))
        .await
}

/// POST /payments/methods/add_card/
///
/// Card capture happens upstream (3-DS redirect); the proxy only relays.
pub async fn add_card(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .send(
            Method::POST,
            "/payments/methods/add_card/",
            &UpstreamAuth::Bearer(token),
            None,
            None,
        )
        .await
}

/// POST /payments/methods/:id/set_default/
pub async fn set_default_card(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(card_id): Path<i64>,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .send(
            Method::POST,
            &format!("/payments/methods/{}/set_default/", card_id),
            &UpstreamAuth::Bearer(token),
            None,
            None,
        )
        .await
}

/// POST /payments/methods/:id/deactivate/
pub async fn deactivate_card(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(card_id): Path<i64>,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .send(
            Method::POST,
            &format!("/payments/methods/{}/deactivate/", card_id),
            &UpstreamAuth::Bearer(token),
            None,
            None,
        )
        .await
}
