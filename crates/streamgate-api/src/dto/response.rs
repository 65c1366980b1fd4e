//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use streamgate_entity::login_session::LoginSession;
use streamgate_entity::user::User;

/// Generic success envelope for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Webhook reply envelope the engine expects: `code` 0 allows,
/// anything else denies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// 0 = allow, 1 = deny.
    pub code: i32,
    /// Denial reason, present only on deny.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    /// Allow reply.
    pub fn allow() -> Self {
        Self {
            code: 0,
            error: None,
        }
    }

    /// Deny reply with a machine-readable reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            code: 1,
            error: Some(reason.into()),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Role name.
    pub role: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed bearer token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: UserResponse,
}

/// One login session in the session-management view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSessionResponse {
    /// Session ID.
    pub id: Uuid,
    /// Device description captured at login.
    pub device_info: Option<String>,
    /// IP address captured at login.
    pub ip_address: String,
    /// Login time.
    pub created_at: DateTime<Utc>,
    /// Last authenticated request.
    pub last_activity: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
    /// Whether this is the session making the request.
    pub current: bool,
}

impl LoginSessionResponse {
    /// Builds the view for one session, marking the caller's own.
    pub fn from_session(session: &LoginSession, current_session_id: Uuid) -> Self {
        Self {
            id: session.id,
            device_info: session.device_info.clone(),
            ip_address: session.ip_address.clone(),
            created_at: session.created_at,
            last_activity: session.last_activity,
            expires_at: session.expires_at,
            current: session.id == current_session_id,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status string.
    pub status: String,
    /// Whether the database answered.
    pub database: bool,
    /// Whether the engine answered.
    pub engine: bool,
    /// Engine version, when reachable.
    pub engine_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_allow_omits_error_field() {
        let json = serde_json::to_string(&WebhookResponse::allow()).unwrap();
        assert_eq!(json, r#"{"code":0}"#);
    }

    #[test]
    fn test_webhook_deny_carries_reason() {
        let json = serde_json::to_string(&WebhookResponse::deny("stream is disabled")).unwrap();
        assert_eq!(json, r#"{"code":1,"error":"stream is disabled"}"#);
    }
}
