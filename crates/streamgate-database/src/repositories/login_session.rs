//! Login session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use streamgate_core::error::{AppError, ErrorKind};
use streamgate_core::result::AppResult;
use streamgate_entity::login_session::{CreateLoginSession, LoginSession};

/// Repository for login session CRUD and query operations.
#[derive(Debug, Clone)]
pub struct LoginSessionRepository {
    pool: PgPool,
}

impl LoginSessionRepository {
    /// Create a new login session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new login session.
    pub async fn create(&self, data: &CreateLoginSession) -> AppResult<LoginSession> {
        sqlx::query_as::<_, LoginSession>(
            "INSERT INTO login_sessions (user_id, token_hash, device_info, ip_address, expires_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token_hash)
        .bind(&data.device_info)
        .bind(&data.ip_address)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create login session", e)
        })
    }

    /// Find a login session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LoginSession>> {
        sqlx::query_as::<_, LoginSession>("SELECT * FROM login_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find login session", e)
            })
    }

    /// Find a login session by token hash.
    ///
    /// Revoked and expired rows are returned too; the caller inspects the
    /// session state to produce a precise authentication error.
    pub async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<LoginSession>> {
        sqlx::query_as::<_, LoginSession>("SELECT * FROM login_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    /// List all active (unrevoked, unexpired) sessions for a user,
    /// newest first.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<LoginSession>> {
        sqlx::query_as::<_, LoginSession>(
            "SELECT * FROM login_sessions \
             WHERE user_id = $1 AND revoked_at IS NULL AND expires_at > NOW() \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active sessions", e)
        })
    }

    /// Count active sessions for a user.
    pub async fn count_active_by_user(&self, user_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM login_sessions \
             WHERE user_id = $1 AND revoked_at IS NULL AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active sessions", e)
        })?;
        Ok(count)
    }

    /// Find the oldest-created active session for a user (eviction target
    /// when the per-user cap is reached).
    pub async fn find_oldest_active_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<LoginSession>> {
        sqlx::query_as::<_, LoginSession>(
            "SELECT * FROM login_sessions \
             WHERE user_id = $1 AND revoked_at IS NULL AND expires_at > NOW() \
             ORDER BY created_at ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find oldest session", e)
        })
    }

    /// Update the last-activity timestamp.
    pub async fn touch_activity(&self, session_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE login_sessions SET last_activity = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last activity", e)
            })?;
        Ok(())
    }

    /// Revoke a session. Returns the number of rows revoked (0 when the
    /// session was already revoked or does not exist).
    pub async fn revoke(&self, session_id: Uuid, reason: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE login_sessions SET revoked_at = NOW(), revoked_reason = $2 \
             WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(session_id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke session", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Revoke every active session of a user except the one with the
    /// given token hash. Returns the number revoked.
    pub async fn revoke_all_except(
        &self,
        user_id: Uuid,
        keep_token_hash: &str,
        reason: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE login_sessions SET revoked_at = NOW(), revoked_reason = $3 \
             WHERE user_id = $1 AND token_hash <> $2 \
             AND revoked_at IS NULL AND expires_at > NOW()",
        )
        .bind(user_id)
        .bind(keep_token_hash)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user sessions", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Delete revoked or expired sessions past the retention cutoff.
    /// Rows still in the active state are never touched.
    pub async fn delete_terminal_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM login_sessions \
             WHERE (revoked_at IS NOT NULL AND revoked_at < $1) \
                OR (expires_at < $1)",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete old sessions", e)
        })?;

        Ok(result.rows_affected())
    }
}
