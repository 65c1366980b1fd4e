//! Stream key validation against stored stream records.

use std::sync::Arc;

use tracing::debug;

use streamgate_core::result::AppResult;
use streamgate_database::repositories::stream::StreamRepository;
use streamgate_entity::stream::Stream;

/// Why a presented stream key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No stream record carries this key.
    UnknownKey,
    /// The stream exists but publishing is disabled.
    Disabled,
    /// The stream has been soft-deleted.
    Deleted,
}

impl RejectReason {
    /// Machine-readable denial message returned to the engine.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownKey => "stream key not found",
            Self::Disabled => "stream is disabled",
            Self::Deleted => "stream has been deleted",
        }
    }
}

/// Outcome of validating a presented stream key.
#[derive(Debug, Clone)]
pub enum KeyValidation {
    /// The key maps to a publishable stream.
    Valid(Stream),
    /// The key was rejected.
    Rejected(RejectReason),
}

/// Checks presented stream keys against stored stream records.
///
/// Read-only: validation never mutates anything.
#[derive(Debug, Clone)]
pub struct StreamKeyValidator {
    stream_repo: Arc<StreamRepository>,
}

impl StreamKeyValidator {
    /// Creates a new validator.
    pub fn new(stream_repo: Arc<StreamRepository>) -> Self {
        Self { stream_repo }
    }

    /// Validates a presented stream key.
    pub async fn validate(&self, stream_key: &str) -> AppResult<KeyValidation> {
        let record = self.stream_repo.find_by_key(stream_key).await?;
        let validation = classify(record);

        if let KeyValidation::Rejected(reason) = &validation {
            debug!(reason = reason.message(), "Stream key rejected");
        }

        Ok(validation)
    }
}

/// Classifies a fetched stream record.
///
/// Checks run in order: unknown key, then disabled, then soft-deleted.
fn classify(record: Option<Stream>) -> KeyValidation {
    let Some(stream) = record else {
        return KeyValidation::Rejected(RejectReason::UnknownKey);
    };

    if !stream.is_active {
        return KeyValidation::Rejected(RejectReason::Disabled);
    }
    if stream.is_deleted() {
        return KeyValidation::Rejected(RejectReason::Deleted);
    }

    KeyValidation::Valid(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use streamgate_entity::stream::StreamProtocol;
    use uuid::Uuid;

    fn stream() -> Stream {
        Stream {
            id: Uuid::new_v4(),
            name: "studio-a".to_string(),
            stream_key: "abc".to_string(),
            protocol: StreamProtocol::Rtmp,
            is_active: true,
            max_bitrate_kbps: None,
            deleted_at: None,
            deleted_by: None,
            deleted_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_unknown_key() {
        let KeyValidation::Rejected(reason) = classify(None) else {
            panic!("expected rejection");
        };
        assert_eq!(reason, RejectReason::UnknownKey);
        assert_eq!(reason.message(), "stream key not found");
    }

    #[test]
    fn test_disabled_stream() {
        let mut s = stream();
        s.is_active = false;

        let KeyValidation::Rejected(reason) = classify(Some(s)) else {
            panic!("expected rejection");
        };
        assert_eq!(reason, RejectReason::Disabled);
    }

    #[test]
    fn test_soft_deleted_stream_reports_deleted_not_unknown() {
        let mut s = stream();
        s.deleted_at = Some(Utc::now());

        let KeyValidation::Rejected(reason) = classify(Some(s)) else {
            panic!("expected rejection");
        };
        assert_eq!(reason, RejectReason::Deleted);
        assert_eq!(reason.message(), "stream has been deleted");
    }

    #[test]
    fn test_valid_key() {
        assert!(matches!(classify(Some(stream())), KeyValidation::Valid(_)));
    }
}
