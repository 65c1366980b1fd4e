//! Auth handlers — login and identity.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use streamgate_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let ip = client_ip(&headers);
    let device_info = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let result = state
        .token_service
        .login(&req.username, &req.password, &ip, device_info)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        user: UserResponse::from(&result.user),
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(serde_json::json!({
        "id": auth.user_id,
        "username": auth.username,
        "role": auth.role.to_string(),
        "permissions": auth.permissions,
    })))
}

/// Best-effort client IP from proxy headers.
pub(crate) fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_defaults_when_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}
