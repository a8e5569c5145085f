use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{error::AppError, models::UserId};

/// Header set by the authenticating gateway
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller, as asserted by the upstream gateway
///
/// Only used to pick whose history to read. Rejects with 401 when the header
/// is missing or not a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing caller identity".to_string()))?;

        raw.to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .map(CallerId)
            .ok_or_else(|| AppError::Unauthorized("Malformed caller identity".to_string()))
    }
}
