pub mod config;
pub mod dtos;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod startup;

use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{FallbackProber, UpstreamClient};

/// Shared application state. Built once at startup and cloned into each
/// handler; there is no cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    pub prober: FallbackProber,
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.allowed_origins);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Verification (service credential)
        .route(
            "/auth/bot/create-verification/",
            post(handlers::auth::create_verification),
        )
        .route("/auth/bot/check/", post(handlers::auth::check_verification))
        // User-scoped passthroughs (forwarded bearer token)
        .route("/proxy/users/me/", get(handlers::users::me))
        .route(
            "/users/update_profile/",
            patch(handlers::users::update_profile),
        )
        .route("/users/balance/", get(handlers::users::balance))
        .route("/payments/topup/", post(handlers::payments::topup))
        .route(
            "/payments/methods/",
            get(handlers::payments::payment_methods),
        )
        .route(
            "/payments/methods/add_card/",
            post(handlers::payments::add_card),
        )
        .route(
            "/payments/methods/:id/set_default/",
            post(handlers::payments::set_default_card),
        )
        .route(
            "/payments/methods/:id/deactivate/",
            post(handlers::payments::deactivate_card),
        )
        // CRM listings
        .route("/users/", get(handlers::crm::list_users))
        .route("/rentals/", get(handlers::crm::list_rentals))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
}
