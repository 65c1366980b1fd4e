//! Retention sweeps for terminal session rows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};

use streamgate_core::config::ingest::IngestConfig;
use streamgate_core::config::session::SessionConfig;
use streamgate_database::repositories::login_session::LoginSessionRepository;
use streamgate_database::repositories::publish_session::PublishSessionRepository;

/// Deletes terminal session rows past their retention windows.
#[derive(Debug)]
pub struct RetentionSweeper {
    /// Publish session repository.
    publish_repo: Arc<PublishSessionRepository>,
    /// Login session repository.
    login_repo: Arc<LoginSessionRepository>,
    /// Publish-session retention settings.
    ingest_config: IngestConfig,
    /// Login-session retention settings.
    session_config: SessionConfig,
}

impl RetentionSweeper {
    /// Create a new retention sweeper.
    pub fn new(
        publish_repo: Arc<PublishSessionRepository>,
        login_repo: Arc<LoginSessionRepository>,
        ingest_config: IngestConfig,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            publish_repo,
            login_repo,
            ingest_config,
            session_config,
        }
    }

    /// Delete ended publish sessions past the retention window.
    pub async fn sweep_publish_sessions(&self) -> u64 {
        let cutoff = Utc::now() - Duration::days(self.ingest_config.retention_days as i64);

        match self.publish_repo.delete_ended_before(cutoff).await {
            Ok(removed) => {
                if removed > 0 {
                    info!(removed, "Swept ended publish sessions");
                }
                removed
            }
            Err(e) => {
                error!(error = %e, "Publish session sweep failed");
                0
            }
        }
    }

    /// Delete revoked/expired login sessions past the retention window.
    pub async fn sweep_login_sessions(&self) -> u64 {
        let cutoff = Utc::now() - Duration::days(self.session_config.retention_days as i64);

        match self.login_repo.delete_terminal_before(cutoff).await {
            Ok(removed) => {
                if removed > 0 {
                    info!(removed, "Swept terminal login sessions");
                }
                removed
            }
            Err(e) => {
                error!(error = %e, "Login session sweep failed");
                0
            }
        }
    }
}
