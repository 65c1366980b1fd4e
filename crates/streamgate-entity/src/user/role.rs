//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on the control plane.
///
/// Roles are ordered by privilege level: Admin > Operator > Viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrator: manage streams, users, and configuration.
    Admin,
    /// Can view and kick live sessions, manage own login sessions.
    Operator,
    /// Read-only access to the session views.
    Viewer,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Operator => 2,
            Self::Viewer => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Permissions granted by this role.
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Admin => &[
                "sessions:read",
                "sessions:kick",
                "streams:write",
                "users:write",
                "config:write",
            ],
            Self::Operator => &["sessions:read", "sessions:kick"],
            Self::Viewer => &["sessions:read"],
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = streamgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "operator" => Ok(Self::Operator),
            "viewer" => Ok(Self::Viewer),
            _ => Err(streamgate_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, operator, viewer"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Viewer));
        assert!(UserRole::Operator.has_at_least(&UserRole::Operator));
        assert!(!UserRole::Viewer.has_at_least(&UserRole::Operator));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("OPERATOR".parse::<UserRole>().unwrap(), UserRole::Operator);
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_viewer_cannot_kick() {
        assert!(!UserRole::Viewer.permissions().contains(&"sessions:kick"));
        assert!(UserRole::Operator.permissions().contains(&"sessions:kick"));
    }
}
