//! External media engine configuration.

use serde::{Deserialize, Serialize};

/// External media engine API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the engine's query/control API,
    /// e.g. `http://127.0.0.1:1985/api/v1`.
    pub api_url: String,
    /// Per-request timeout in seconds. A timed-out call is treated as
    /// "engine unreachable" and degrades to empty data.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    5
}
