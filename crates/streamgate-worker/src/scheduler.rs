//! Cron scheduler for the retention sweeps.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use streamgate_core::error::AppError;

use crate::jobs::retention::RetentionSweeper;

/// Cron-based scheduler owning the retention sweeps.
///
/// Constructed and started by the process's top-level composition;
/// stopped through [`RetentionScheduler::shutdown`] on process exit.
pub struct RetentionScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// The sweeper shared by all scheduled jobs.
    sweeper: Arc<RetentionSweeper>,
}

impl std::fmt::Debug for RetentionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetentionScheduler").finish()
    }
}

impl RetentionScheduler {
    /// Create a new scheduler.
    pub async fn new(sweeper: Arc<RetentionSweeper>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, sweeper })
    }

    /// Register all retention sweeps.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_publish_sweep().await?;
        self.register_login_sweep().await?;

        tracing::info!("Retention sweeps registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Retention scheduler started");
        Ok(())
    }

    /// Shut down the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Retention scheduler shut down");
        Ok(())
    }

    /// Publish-session sweep — hourly.
    async fn register_publish_sweep(&self) -> Result<(), AppError> {
        let sweeper = Arc::clone(&self.sweeper);
        let job = CronJob::new_async("0 10 * * * *", move |_uuid, _lock| {
            let sweeper = Arc::clone(&sweeper);
            Box::pin(async move {
                sweeper.sweep_publish_sessions().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create publish sweep: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add publish sweep: {e}")))?;

        tracing::info!("Registered: publish session sweep (hourly)");
        Ok(())
    }

    /// Login-session sweep — hourly.
    async fn register_login_sweep(&self) -> Result<(), AppError> {
        let sweeper = Arc::clone(&self.sweeper);
        let job = CronJob::new_async("0 40 * * * *", move |_uuid, _lock| {
            let sweeper = Arc::clone(&sweeper);
            Box::pin(async move {
                sweeper.sweep_login_sessions().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create login sweep: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add login sweep: {e}")))?;

        tracing::info!("Registered: login session sweep (hourly)");
        Ok(())
    }
}
