//! Publish session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One open-to-closed publishing connection.
///
/// A row is created when admission accepts a publish attempt and closed
/// (ended_at set) by the unpublish webhook, a bulk stream disable, or an
/// operator kick. At most one row per client_id may be open at a time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublishSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// The stream being published to.
    pub stream_id: Uuid,
    /// Engine-assigned client identifier for this connection.
    pub client_id: String,
    /// Publisher's IP address.
    pub ip_address: String,
    /// Protocol the publisher connected with, as reported by the engine.
    pub protocol: String,
    /// When the session was admitted.
    pub started_at: DateTime<Utc>,
    /// When the session ended. `None` while the publisher is live.
    pub ended_at: Option<DateTime<Utc>>,
    /// Total bytes received over the session, as last reported.
    pub bytes_received: i64,
}

impl PublishSession {
    /// Check whether the session is still open.
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Data required to open a new publish session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePublishSession {
    /// The stream being published to.
    pub stream_id: Uuid,
    /// Engine-assigned client identifier.
    pub client_id: String,
    /// Publisher's IP address.
    pub ip_address: String,
    /// Protocol the publisher connected with.
    pub protocol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_open() {
        let mut session = PublishSession {
            id: Uuid::new_v4(),
            stream_id: Uuid::new_v4(),
            client_id: "client-1".to_string(),
            ip_address: "10.0.0.5".to_string(),
            protocol: "rtmp".to_string(),
            started_at: Utc::now(),
            ended_at: None,
            bytes_received: 0,
        };
        assert!(session.is_open());

        session.ended_at = Some(Utc::now());
        assert!(!session.is_open());
    }
}
