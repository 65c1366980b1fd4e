//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered control-plane user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// When the user was soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check whether the user has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check whether the user may authenticate right now.
    pub fn can_authenticate(&self) -> bool {
        self.is_active && !self.is_deleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "ops".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: UserRole::Operator,
            is_active: true,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_can_authenticate() {
        let mut u = user();
        assert!(u.can_authenticate());

        u.is_active = false;
        assert!(!u.can_authenticate());

        u.is_active = true;
        u.deleted_at = Some(Utc::now());
        assert!(!u.can_authenticate());
    }
}
