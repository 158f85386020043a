//! User-scoped passthrough endpoints. All of them forward the caller's
//! bearer token and return upstream's reply untouched.

use axum::extract::State;
use reqwest::Method;

use crate::dtos::UpdateProfileRequest;
use crate::error::ProxyError;
use crate::extractors::{BearerToken, ValidatedJson};
use crate::services::{UpstreamAuth, UpstreamResponse};
use crate::AppState;

/// GET /proxy/users/me/ -> upstream /users/me/
pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .get("/users/me/", &UpstreamAuth::Bearer(token))
        .await
}

/// PATCH /users/update_profile/
///
/// Fields the client did not send are dropped before forwarding, so a
/// partial update stays partial upstream.
pub async fn update_profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Result<UpstreamResponse, ProxyError> {
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::new)?;

    state
        .upstream
        .send(
            Method::PATCH,
            "/users/update_profile/",
            &UpstreamAuth::Bearer(token),
            Some(&body),
            None,
        )
        .await
}

/// GET /users/balance/
pub async fn balance(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .get("/users/balance/", &UpstreamAuth::Bearer(token))
        .await
}
