//! Token service — login, authenticate, and revocation flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use streamgate_core::config::session::SessionConfig;
use streamgate_core::error::AppError;
use streamgate_database::repositories::user::UserRepository;
use streamgate_entity::login_session::LoginSession;
use streamgate_entity::user::{User, UserRole};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::token_hash::hash_token;

use super::store::LoginSessionStore;

/// Revocation reason recorded when the per-user cap forces out a session.
const EVICTED_REASON: &str = "evicted: session limit reached";

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// The signed bearer token. This is the only time the raw token is
    /// visible; only its hash is stored.
    pub token: String,
    /// When the token and its session expire.
    pub expires_at: DateTime<Utc>,
    /// Created session.
    pub session: LoginSession,
    /// The authenticated user.
    pub user: User,
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuthenticatedUser {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The login session backing this request.
    pub session_id: Uuid,
    /// Username.
    pub username: String,
    /// Current role.
    pub role: UserRole,
    /// Permissions derived from the role.
    pub permissions: Vec<String>,
}

/// Issues tokens and authenticates requests against the session table.
///
/// A token is only accepted while its login session is alive: signature
/// and expiry are checked first, then the session row (found by the
/// token's hash) must exist, be unrevoked and unexpired, and belong to a
/// user who is still active.
#[derive(Clone)]
pub struct TokenService {
    /// Token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token decoder.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session persistence.
    session_store: Arc<LoginSessionStore>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Session configuration.
    session_config: SessionConfig,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("session_config", &self.session_config)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_store: Arc<LoginSessionStore>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_store,
            user_repo,
            password_hasher,
            session_config,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Find the user and check account state
    /// 2. Verify the password
    /// 3. Enforce the per-user session cap, evicting the oldest session
    ///    if the user is already at the limit
    /// 4. Issue the token and persist its session keyed by token hash
    ///
    /// Unknown users, wrong passwords, and disabled/deleted accounts all
    /// fail with the same message so the login endpoint does not reveal
    /// which accounts exist.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip_address: &str,
        device_info: Option<String>,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !user.can_authenticate() {
            warn!(user_id = %user.id, "Login attempt for disabled or deleted account");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        self.enforce_session_cap(&user).await?;

        let issued = self.jwt_encoder.issue(&user)?;
        let token_hash = hash_token(&issued.token);

        let session = self
            .session_store
            .create_session(
                user.id,
                &token_hash,
                device_info,
                ip_address,
                issued.expires_at,
            )
            .await?;

        // Best-effort stamp; login already succeeded.
        let _ = self.user_repo.update_last_login(user.id, Utc::now()).await;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            "Login successful"
        );

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            session,
            user,
        })
    }

    /// Authenticates a bearer token.
    ///
    /// Layer one: signature and expiry of the token itself. Layer two:
    /// the login session found by the token's hash must exist, be
    /// unrevoked and unexpired, and its user must still be active. A
    /// cryptographically valid token with a dead session is rejected;
    /// that is what makes revocation effective before token expiry.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let _claims = self.jwt_decoder.decode_token(token)?;

        let session = self
            .session_store
            .find_by_token_hash(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::unauthorized("Session not found"))?;

        if session.is_revoked() {
            return Err(AppError::unauthorized("Session has been revoked"));
        }
        if session.is_expired() {
            return Err(AppError::unauthorized("Session has expired"));
        }

        // The role is re-read from the user row, not trusted from the
        // token: role changes apply to existing sessions.
        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        if !user.can_authenticate() {
            return Err(AppError::forbidden("Account is disabled"));
        }

        if let Err(e) = self.session_store.touch_activity(session.id).await {
            warn!(session_id = %session.id, error = %e, "Failed to update session activity");
        }

        Ok(AuthenticatedUser {
            user_id: user.id,
            session_id: session.id,
            username: user.username,
            role: user.role,
            permissions: user
                .role
                .permissions()
                .iter()
                .map(|p| p.to_string())
                .collect(),
        })
    }

    /// Revokes a session, but only if it belongs to the requesting user.
    ///
    /// A session owned by someone else reports not-found, the same as a
    /// session that does not exist.
    pub async fn revoke(
        &self,
        session_id: Uuid,
        requesting_user_id: Uuid,
    ) -> Result<(), AppError> {
        let session = self
            .session_store
            .find_by_id(session_id)
            .await?
            .filter(|s| s.user_id == requesting_user_id)
            .ok_or_else(|| AppError::not_found("Session not found"))?;

        if session.is_revoked() {
            return Err(AppError::conflict("Session is already revoked"));
        }

        self.session_store
            .revoke(session_id, "revoked by user")
            .await?;

        info!(
            session_id = %session_id,
            user_id = %requesting_user_id,
            "Login session revoked"
        );
        Ok(())
    }

    /// Revokes all of a user's active sessions except the one holding
    /// the given token. Returns the number revoked.
    pub async fn revoke_all_except(
        &self,
        user_id: Uuid,
        keep_token: &str,
    ) -> Result<u64, AppError> {
        let revoked = self
            .session_store
            .revoke_all_except(user_id, &hash_token(keep_token), "revoked by user")
            .await?;

        info!(user_id = %user_id, revoked, "Revoked other login sessions");
        Ok(revoked)
    }

    /// Lists a user's active sessions, newest first.
    pub async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<LoginSession>, AppError> {
        self.session_store.find_active_by_user(user_id).await
    }

    /// Revokes the oldest active session when the user is at the cap.
    ///
    /// Eviction is oldest-created-first, not least-recently-used: the
    /// longest-lived login makes room, regardless of how recently it was
    /// used.
    async fn enforce_session_cap(&self, user: &User) -> Result<(), AppError> {
        let max = self.session_config.max_per_user as i64;
        let active = self.session_store.count_active_by_user(user.id).await?;

        if active < max {
            return Ok(());
        }

        let oldest = self
            .session_store
            .find_oldest_by_user(user.id)
            .await?
            .ok_or_else(|| AppError::internal("No session found to evict despite reaching cap"))?;

        self.session_store.revoke(oldest.id, EVICTED_REASON).await?;

        info!(
            user_id = %user.id,
            evicted_session = %oldest.id,
            active_sessions = active,
            "Evicted oldest login session to make room"
        );
        Ok(())
    }
}
