//! Login-session management configuration.

use serde::{Deserialize, Serialize};

/// Login-session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum concurrent unrevoked, unexpired login sessions per user.
    /// When a login would exceed this, the oldest session is revoked to
    /// make room.
    #[serde(default = "default_max_per_user")]
    pub max_per_user: u32,
    /// Days to keep revoked/expired login sessions before the retention
    /// sweep deletes them.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_per_user: default_max_per_user(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_max_per_user() -> u32 {
    5
}

fn default_retention_days() -> u32 {
    30
}
