use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Identity decoded from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

/// Pulls the token out of `Authorization: Bearer <token>`.
/// The error is a log-only reason.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or("missing authorization header")?
        .to_str()
        .map_err(|_| "authorization header is not valid text")?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or("authorization scheme is not bearer")?
        .trim();

    if token.is_empty() {
        return Err("empty bearer token");
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).map_err(|reason| {
            warn!(reason, "rejected request");
            ApiError::Unauthorized
        })?;

        let claims = JwtKeys::from_ref(state).verify(token).map_err(|e| {
            warn!(reason = %e, "rejected token");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser {
            user_id: claims.user_id,
            email: claims.email,
        })
    }
}
