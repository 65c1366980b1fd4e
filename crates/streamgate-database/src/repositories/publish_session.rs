//! Publish session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use streamgate_core::error::{AppError, ErrorKind};
use streamgate_core::result::AppResult;
use streamgate_entity::publish_session::{CreatePublishSession, PublishSession};

/// An open publish session joined with its stream's key and name,
/// as needed by the reconciliation view.
#[derive(Debug, Clone, FromRow)]
pub struct OpenPublishRow {
    /// Session ID.
    pub id: Uuid,
    /// Stream ID.
    pub stream_id: Uuid,
    /// Engine-assigned client ID.
    pub client_id: String,
    /// Publisher IP address.
    pub ip_address: String,
    /// Protocol reported at admission.
    pub protocol: String,
    /// When the session was admitted.
    pub started_at: DateTime<Utc>,
    /// Bytes received as last recorded.
    pub bytes_received: i64,
    /// The stream's publish key (engine join key).
    pub stream_key: String,
    /// The stream's human-readable name.
    pub stream_name: String,
}

/// Repository for publish session CRUD and query operations.
#[derive(Debug, Clone)]
pub struct PublishSessionRepository {
    pool: PgPool,
}

impl PublishSessionRepository {
    /// Create a new publish session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new publish session.
    pub async fn create(&self, data: &CreatePublishSession) -> AppResult<PublishSession> {
        sqlx::query_as::<_, PublishSession>(
            "INSERT INTO publish_sessions (stream_id, client_id, ip_address, protocol) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.stream_id)
        .bind(&data.client_id)
        .bind(&data.ip_address)
        .bind(&data.protocol)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create publish session", e)
        })
    }

    /// Find a publish session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PublishSession>> {
        sqlx::query_as::<_, PublishSession>("SELECT * FROM publish_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find publish session", e)
            })
    }

    /// Count open publish sessions across all streams.
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM publish_sessions WHERE ended_at IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count open sessions", e)
                })?;
        Ok(count)
    }

    /// List all open publish sessions joined with their stream's key and
    /// name, newest first.
    pub async fn find_open_joined(&self) -> AppResult<Vec<OpenPublishRow>> {
        sqlx::query_as::<_, OpenPublishRow>(
            "SELECT p.id, p.stream_id, p.client_id, p.ip_address, p.protocol, \
                    p.started_at, p.bytes_received, \
                    s.stream_key AS stream_key, s.name AS stream_name \
             FROM publish_sessions p \
             JOIN streams s ON s.id = p.stream_id \
             WHERE p.ended_at IS NULL \
             ORDER BY p.started_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list open sessions", e)
        })
    }

    /// Close the open session for a client.
    ///
    /// A `None` byte count leaves the last recorded value in place.
    /// Returns the number of rows closed (0 or 1); closing an already
    /// closed or unknown client is a no-op.
    pub async fn close_by_client(
        &self,
        client_id: &str,
        bytes_received: Option<i64>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE publish_sessions \
             SET ended_at = NOW(), bytes_received = COALESCE($2, bytes_received) \
             WHERE client_id = $1 AND ended_at IS NULL",
        )
        .bind(client_id)
        .bind(bytes_received)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to close publish session", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Close all open sessions for a stream. Returns the number closed.
    pub async fn close_all_by_stream(&self, stream_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE publish_sessions SET ended_at = NOW() \
             WHERE stream_id = $1 AND ended_at IS NULL",
        )
        .bind(stream_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to close stream sessions", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Delete ended sessions older than the given cutoff.
    pub async fn delete_ended_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM publish_sessions WHERE ended_at IS NOT NULL AND ended_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete ended sessions", e)
        })?;

        Ok(result.rows_affected())
    }
}
