//! Stream entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::protocol::StreamProtocol;

/// A configured ingest stream.
///
/// Stream records are owned by the administrative CRUD surface; the
/// admission path only ever reads them. A stream is retired by soft
/// delete so that historical publish sessions keep a valid reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stream {
    /// Unique stream identifier.
    pub id: Uuid,
    /// Unique human-readable name.
    pub name: String,
    /// Unique secret presented by the publisher.
    #[serde(skip_serializing)]
    pub stream_key: String,
    /// Allowed ingest protocol.
    pub protocol: StreamProtocol,
    /// Whether publishing to this stream is currently enabled.
    pub is_active: bool,
    /// Maximum accepted bitrate in kbps, if limited.
    pub max_bitrate_kbps: Option<i32>,
    /// When the stream was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Who soft-deleted the stream.
    pub deleted_by: Option<Uuid>,
    /// Why the stream was soft-deleted.
    pub deleted_reason: Option<String>,
    /// When the stream was created.
    pub created_at: DateTime<Utc>,
    /// When the stream was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Stream {
    /// Check whether the stream has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> Stream {
        Stream {
            id: Uuid::new_v4(),
            name: "studio-a".to_string(),
            stream_key: "abc".to_string(),
            protocol: StreamProtocol::Rtmp,
            is_active: true,
            max_bitrate_kbps: Some(6000),
            deleted_at: None,
            deleted_by: None,
            deleted_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_deleted() {
        let mut s = stream();
        assert!(!s.is_deleted());

        s.deleted_at = Some(Utc::now());
        assert!(s.is_deleted());
    }
}
