use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dtos::ErrorResponse;

/// Errors produced by the proxy itself. Upstream application errors
/// (non-2xx responses with a body) are not represented here; they are
/// passed through verbatim as [`crate::services::UpstreamResponse`].
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Config(String),

    #[error("upstream request timed out")]
    UpstreamTimeout,

    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ProxyError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        ProxyError::Validation(message)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProxyError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ProxyError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ProxyError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ProxyError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "upstream request timed out".to_string(),
            ),
            ProxyError::UpstreamUnreachable(msg) => {
                (StatusCode::BAD_GATEWAY, format!("upstream unreachable: {}", msg))
            }
            // Internal faults surface as a generic 500; details stay in the logs.
            ProxyError::Internal(err) => {
                tracing::error!(error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
