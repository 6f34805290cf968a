use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use service_core::error::AppError;

use crate::services::TokenError;
use crate::startup::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Extraction is the verification gate: it parses and validates the token
/// against the server secret and rejects with 401 otherwise. The token's
/// subject is trusted for the request lifetime; the user record is not
/// re-fetched here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let claims = match token {
            Some(token) => state.jwt.verify(token),
            None => Err(TokenError::Missing),
        }
        .map_err(|kind| {
            // The kind stays internal; callers get a uniform 401.
            tracing::debug!(kind = %kind, "rejected bearer token");
            AppError::Unauthorized(anyhow::anyhow!("Missing or invalid authentication token"))
        })?;

        tracing::Span::current().record("user_id", claims.sub.as_str());

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
