//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, authenticates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use streamgate_core::error::AppError;
use streamgate_service::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pulls the raw token out of an `Authorization: Bearer ...` header.
pub(crate) fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        // Signature check plus session-table lookup; a revoked session
        // fails here no matter how fresh the token is.
        let identity = state.token_service.authenticate(token).await?;

        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .unwrap_or("unknown")
            .trim()
            .to_string();

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let ctx = RequestContext::new(
            identity.user_id,
            identity.session_id,
            identity.role,
            identity.username,
            identity.permissions,
            ip_address,
            user_agent,
        );

        Ok(AuthUser(ctx))
    }
}
