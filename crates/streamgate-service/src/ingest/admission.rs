//! Publish admission control.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use streamgate_core::config::ingest::IngestConfig;
use streamgate_core::result::AppResult;
use streamgate_database::repositories::publish_session::PublishSessionRepository;
use streamgate_entity::publish_session::CreatePublishSession;

use super::validator::{KeyValidation, StreamKeyValidator};

/// Outcome of a publish admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// The publish is admitted. `session_id` is `None` when the session
    /// row could not be written; the grant still stands.
    Allowed {
        /// The opened publish session, when bookkeeping succeeded.
        session_id: Option<Uuid>,
    },
    /// The publish is denied.
    Denied {
        /// Machine-readable denial reason.
        reason: String,
    },
}

/// Decides whether a publish attempt may proceed and keeps the
/// publish-session bookkeeping.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    validator: Arc<StreamKeyValidator>,
    publish_repo: Arc<PublishSessionRepository>,
    config: IngestConfig,
}

impl AdmissionController {
    /// Creates a new admission controller.
    pub fn new(
        validator: Arc<StreamKeyValidator>,
        publish_repo: Arc<PublishSessionRepository>,
        config: IngestConfig,
    ) -> Self {
        Self {
            validator,
            publish_repo,
            config,
        }
    }

    /// Authorizes a publish attempt.
    ///
    /// 1. Validate the stream key; deny with the validator's reason.
    /// 2. Check the global open-session count against the configured
    ///    maximum; deny with a capacity reason when at or above it.
    /// 3. Open a publish session row.
    ///
    /// The count check and the insert are not one transaction: two
    /// publishes racing for the last slot can both pass the check and
    /// briefly exceed the cap. Accepted for a single-node plane with a
    /// low event rate.
    ///
    /// A failed insert after the grant is logged and does NOT turn into
    /// a denial: the media path stays available even when bookkeeping
    /// is not.
    pub async fn authorize_publish(
        &self,
        stream_key: &str,
        client_id: &str,
        ip_address: &str,
        protocol: &str,
    ) -> AppResult<AdmissionDecision> {
        let stream = match self.validator.validate(stream_key).await? {
            KeyValidation::Valid(stream) => stream,
            KeyValidation::Rejected(reason) => {
                info!(
                    client_id,
                    ip = ip_address,
                    reason = reason.message(),
                    "Publish denied"
                );
                return Ok(AdmissionDecision::Denied {
                    reason: reason.message().to_string(),
                });
            }
        };

        let open = self.publish_repo.count_open().await?;
        if at_capacity(open, self.config.max_concurrent_streams) {
            warn!(
                client_id,
                open_sessions = open,
                max = self.config.max_concurrent_streams,
                "Publish denied: concurrent stream limit reached"
            );
            return Ok(AdmissionDecision::Denied {
                reason: "maximum concurrent streams reached".to_string(),
            });
        }

        let session_id = match self
            .publish_repo
            .create(&CreatePublishSession {
                stream_id: stream.id,
                client_id: client_id.to_string(),
                ip_address: ip_address.to_string(),
                protocol: protocol.to_string(),
            })
            .await
        {
            Ok(session) => {
                info!(
                    client_id,
                    session_id = %session.id,
                    stream_id = %stream.id,
                    protocol,
                    "Publish admitted"
                );
                Some(session.id)
            }
            Err(e) => {
                error!(
                    client_id,
                    stream_id = %stream.id,
                    error = %e,
                    "Publish admitted but session record could not be written"
                );
                None
            }
        };

        Ok(AdmissionDecision::Allowed { session_id })
    }

    /// Closes the open session for a client on unpublish.
    ///
    /// Idempotent: a second call, or a call for a client with no open
    /// session, is a no-op. Returns whether a session was closed.
    pub async fn revoke_unpublish(
        &self,
        client_id: &str,
        bytes_received: Option<i64>,
    ) -> AppResult<bool> {
        let closed = self
            .publish_repo
            .close_by_client(client_id, bytes_received)
            .await?;

        if closed > 0 {
            info!(client_id, "Publish session closed");
        } else {
            debug!(client_id, "Unpublish for client with no open session");
        }

        Ok(closed > 0)
    }

    /// Closes all open sessions for a stream (stream disabled or
    /// deleted). Returns the number closed.
    pub async fn revoke_by_stream(&self, stream_id: Uuid) -> AppResult<u64> {
        let closed = self.publish_repo.close_all_by_stream(stream_id).await?;
        if closed > 0 {
            info!(stream_id = %stream_id, closed, "Closed all sessions for stream");
        }
        Ok(closed)
    }
}

/// Whether the open-session count has reached the configured maximum.
fn at_capacity(open_count: i64, max_concurrent: u32) -> bool {
    open_count >= max_concurrent as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_capacity() {
        assert!(!at_capacity(0, 3));
        assert!(!at_capacity(2, 3));
        assert!(at_capacity(3, 3));
        assert!(at_capacity(4, 3));
    }

    #[test]
    fn test_zero_limit_denies_everything() {
        assert!(at_capacity(0, 0));
    }
}
