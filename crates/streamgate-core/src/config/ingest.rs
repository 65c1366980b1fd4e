//! Publish admission configuration.

use serde::{Deserialize, Serialize};

/// Publish admission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum simultaneously open publish sessions across all streams.
    /// A publish attempt at or above this count is denied.
    #[serde(default = "default_max_concurrent_streams")]
    pub max_concurrent_streams: u32,
    /// Days to keep ended publish sessions before the retention sweep
    /// deletes them.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_concurrent_streams: default_max_concurrent_streams(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_max_concurrent_streams() -> u32 {
    10
}

fn default_retention_days() -> u32 {
    30
}
