//! CRM listing passthroughs. The inbound query string (filters, paging)
//! is forwarded to upstream unchanged.

use axum::extract::{RawQuery, State};
use reqwest::Method;

use crate::error::ProxyError;
use crate::extractors::BearerToken;
use crate::services::{UpstreamAuth, UpstreamResponse};
use crate::AppState;

/// GET /users/
pub async fn list_users(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .send(
            Method::GET,
            "/users/",
            &UpstreamAuth::Bearer(token),
            None,
            query.as_deref(),
        )
        .await
}

/// GET /rentals/
pub async fn list_rentals(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<UpstreamResponse, ProxyError> {
    state
        .upstream
        .send(
            Method::GET,
            "/rentals/",
            &UpstreamAuth::Bearer(token),
            None,
            query.as_deref(),
        )
        .await
}
