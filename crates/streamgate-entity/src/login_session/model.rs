//! Login session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One authenticated user's login, independent of the signed token's own
/// validity window.
///
/// Only a one-way hash of the issued token is stored; the raw bearer
/// token never touches the database. A session leaves the active state by
/// explicit revocation, by expiry, or by eviction when the per-user cap
/// is exceeded (recorded as a revocation).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoginSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the issued bearer token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// Client-reported device description.
    pub device_info: Option<String>,
    /// IP address from which the session was created.
    pub ip_address: String,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// Last authenticated request on this session.
    pub last_activity: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// When the session was revoked, if it was.
    pub revoked_at: Option<DateTime<Utc>>,
    /// Why the session was revoked.
    pub revoked_reason: Option<String>,
}

impl LoginSession {
    /// Check whether the session is still active (not revoked, not expired).
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none() && self.expires_at > Utc::now()
    }

    /// Check whether the session has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Data required to create a new login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoginSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the issued token.
    pub token_hash: String,
    /// Client-reported device description.
    pub device_info: Option<String>,
    /// IP address of the client.
    pub ip_address: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_in: Duration) -> LoginSession {
        LoginSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "deadbeef".to_string(),
            device_info: None,
            ip_address: "192.0.2.1".to_string(),
            created_at: Utc::now(),
            last_activity: Utc::now(),
            expires_at: Utc::now() + expires_in,
            revoked_at: None,
            revoked_reason: None,
        }
    }

    #[test]
    fn test_active_until_revoked() {
        let mut s = session(Duration::hours(24));
        assert!(s.is_active());

        s.revoked_at = Some(Utc::now());
        assert!(!s.is_active());
        assert!(s.is_revoked());
    }

    #[test]
    fn test_expired_session_is_not_active() {
        let s = session(Duration::hours(-1));
        assert!(s.is_expired());
        assert!(!s.is_active());
    }
}
