//! Login-session storage operations wrapping the database repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use streamgate_core::error::AppError;
use streamgate_database::repositories::login_session::LoginSessionRepository;
use streamgate_entity::login_session::{CreateLoginSession, LoginSession};

/// Abstracts login-session persistence operations.
#[derive(Debug, Clone)]
pub struct LoginSessionStore {
    /// Login session database repository.
    repo: Arc<LoginSessionRepository>,
}

impl LoginSessionStore {
    /// Creates a new login-session store.
    pub fn new(repo: Arc<LoginSessionRepository>) -> Self {
        Self { repo }
    }

    /// Creates a new session record in the database.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        device_info: Option<String>,
        ip_address: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<LoginSession, AppError> {
        self.repo
            .create(&CreateLoginSession {
                user_id,
                token_hash: token_hash.to_string(),
                device_info,
                ip_address: ip_address.to_string(),
                expires_at,
            })
            .await
    }

    /// Finds a session by ID.
    pub async fn find_by_id(&self, session_id: Uuid) -> Result<Option<LoginSession>, AppError> {
        self.repo.find_by_id(session_id).await
    }

    /// Finds a session by the hash of its token, regardless of state.
    pub async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<LoginSession>, AppError> {
        self.repo.find_by_token_hash(token_hash).await
    }

    /// Counts active (unrevoked, unexpired) sessions for a user.
    pub async fn count_active_by_user(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.repo.count_active_by_user(user_id).await
    }

    /// Finds all active sessions for a user, newest first.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<LoginSession>, AppError> {
        self.repo.find_active_by_user(user_id).await
    }

    /// Finds the oldest-created active session for a user.
    pub async fn find_oldest_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<LoginSession>, AppError> {
        self.repo.find_oldest_active_by_user(user_id).await
    }

    /// Updates a session's last-activity timestamp.
    pub async fn touch_activity(&self, session_id: Uuid) -> Result<(), AppError> {
        self.repo.touch_activity(session_id).await
    }

    /// Revokes a session. Returns whether a row changed state.
    pub async fn revoke(&self, session_id: Uuid, reason: &str) -> Result<bool, AppError> {
        Ok(self.repo.revoke(session_id, reason).await? > 0)
    }

    /// Revokes every active session of a user except the one holding the
    /// given token hash. Returns the number revoked.
    pub async fn revoke_all_except(
        &self,
        user_id: Uuid,
        keep_token_hash: &str,
        reason: &str,
    ) -> Result<u64, AppError> {
        self.repo
            .revoke_all_except(user_id, keep_token_hash, reason)
            .await
    }
}
