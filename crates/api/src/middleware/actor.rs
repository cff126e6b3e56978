//! Acting identity for audited requests.
//!
//! Session handling is outside this service; the gateway in front of it
//! forwards the authenticated administrator in the `X-Actor` header.

use axum::{extract::FromRequestParts, http::request::Parts};

use labstock_shared::AppError;

use crate::error::ApiError;

/// Header carrying the acting administrator.
pub const ACTOR_HEADER: &str = "x-actor";

/// Longest accepted actor name, matching the audit column.
const MAX_ACTOR_LEN: usize = 255;

/// Extractor for the acting administrator.
///
/// ```ignore
/// async fn handler(actor: Actor) -> impl IntoResponse {
///     let name = actor.name();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub String);

impl Actor {
    /// Returns the actor's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    fn from_header(value: Option<&str>) -> Result<Self, AppError> {
        let name = value.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::Unauthorized(
                "X-Actor header is required".to_string(),
            ));
        }
        if name.len() > MAX_ACTOR_LEN {
            return Err(AppError::Validation(format!(
                "X-Actor must be at most {MAX_ACTOR_LEN} bytes"
            )));
        }
        Ok(Self(name.to_string()))
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|h| h.to_str().ok());
        Ok(Self::from_header(value)?)
    }
}
