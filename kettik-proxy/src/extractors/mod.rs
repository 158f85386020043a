use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ProxyError;

/// Raw bearer token lifted from the inbound `Authorization` header,
/// forwarded upstream unmodified. The proxy never validates the token
/// itself; that is upstream's job.
pub struct BearerToken(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ProxyError::Unauthorized("Authorization: Bearer <token> header is required".into())
            })?;

        // Scheme matching is case-insensitive, like the clients we inherit.
        let token = match header.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
                token
            }
            _ => {
                return Err(ProxyError::Unauthorized(
                    "Authorization: Bearer <token> header is required".into(),
                ))
            }
        };

        Ok(BearerToken(token.to_string()))
    }
}

/// JSON body extractor that runs `validator` rules before the handler sees
/// the payload. Both parse and validation failures answer 400 so the
/// handler never goes outbound with a bad payload.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ProxyError::Validation(format!("Json parse error: {}", e)))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
