//! Stream repository implementation.
//!
//! Stream rows are written by the administrative CRUD surface; the
//! admission path only reads them, so this repository is query-only.

use sqlx::PgPool;
use uuid::Uuid;

use streamgate_core::error::{AppError, ErrorKind};
use streamgate_core::result::AppResult;
use streamgate_entity::stream::Stream;

/// Repository for stream lookup operations.
#[derive(Debug, Clone)]
pub struct StreamRepository {
    pool: PgPool,
}

impl StreamRepository {
    /// Create a new stream repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a stream by its publish key.
    ///
    /// Soft-deleted rows are returned too: the caller distinguishes
    /// "deleted" from "unknown" when building the denial reason.
    pub async fn find_by_key(&self, stream_key: &str) -> AppResult<Option<Stream>> {
        sqlx::query_as::<_, Stream>("SELECT * FROM streams WHERE stream_key = $1")
            .bind(stream_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find stream by key", e)
            })
    }

    /// Find a stream by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Stream>> {
        sqlx::query_as::<_, Stream>("SELECT * FROM streams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find stream", e))
    }
}
