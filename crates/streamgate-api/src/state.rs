//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use streamgate_auth::TokenService;
use streamgate_core::config::AppConfig;
use streamgate_database::repositories::publish_session::PublishSessionRepository;
use streamgate_database::repositories::stream::StreamRepository;
use streamgate_engine::MediaEngineClient;
use streamgate_service::{AdmissionController, SessionReconciler};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Media engine client.
    pub engine: Arc<dyn MediaEngineClient>,
    /// Token issuance and authentication.
    pub token_service: Arc<TokenService>,
    /// Publish admission control.
    pub admission: Arc<AdmissionController>,
    /// Active-session reconciliation.
    pub reconciler: Arc<SessionReconciler>,
    /// Publish session repository (kick lookups).
    pub publish_repo: Arc<PublishSessionRepository>,
    /// Stream repository (bulk-close lookups).
    pub stream_repo: Arc<StreamRepository>,
}
