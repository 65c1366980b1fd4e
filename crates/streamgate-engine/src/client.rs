//! The media engine client trait.

use async_trait::async_trait;

use crate::types::{EngineHealth, EngineStream};

/// Query/control interface to the external media engine.
///
/// Implementations never fail loudly: an unreachable engine yields an
/// empty listing, a failed kick yields `false`, and the health probe
/// reports unhealthy. Callers treat missing data as "no live data", not
/// as an error.
#[async_trait]
pub trait MediaEngineClient: Send + Sync {
    /// List currently live streams with their metrics.
    async fn live_streams(&self) -> Vec<EngineStream>;

    /// Disconnect a client. Returns whether the engine acknowledged.
    async fn kick(&self, client_id: &str) -> bool;

    /// Probe engine health and version.
    async fn health(&self) -> EngineHealth;
}
