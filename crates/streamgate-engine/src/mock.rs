//! In-memory mock engine for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::MediaEngineClient;
use crate::types::{EngineHealth, EngineStream};

/// Mock media engine with settable state and kick recording.
///
/// Exported for use by downstream crates' tests, which need to exercise
/// reconciliation and kick flows without a running engine.
#[derive(Debug)]
pub struct MockMediaEngineClient {
    streams: Mutex<Vec<EngineStream>>,
    kicked: Mutex<Vec<String>>,
    kick_succeeds: Mutex<bool>,
    healthy: Mutex<bool>,
}

impl MockMediaEngineClient {
    /// Create a healthy mock with no live streams.
    pub fn new() -> Self {
        Self {
            streams: Mutex::new(Vec::new()),
            kicked: Mutex::new(Vec::new()),
            kick_succeeds: Mutex::new(true),
            healthy: Mutex::new(true),
        }
    }

    /// Replace the live-stream list.
    pub fn set_streams(&self, streams: Vec<EngineStream>) {
        *self.streams.lock().unwrap() = streams;
    }

    /// Control whether kicks are acknowledged.
    pub fn set_kick_succeeds(&self, succeeds: bool) {
        *self.kick_succeeds.lock().unwrap() = succeeds;
    }

    /// Control the health probe result.
    pub fn set_healthy(&self, healthy: bool) {
        *self.healthy.lock().unwrap() = healthy;
    }

    /// Client IDs kicked so far, in order.
    pub fn kicked_clients(&self) -> Vec<String> {
        self.kicked.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaEngineClient for MockMediaEngineClient {
    async fn live_streams(&self) -> Vec<EngineStream> {
        if !*self.healthy.lock().unwrap() {
            return Vec::new();
        }
        self.streams.lock().unwrap().clone()
    }

    async fn kick(&self, client_id: &str) -> bool {
        self.kicked.lock().unwrap().push(client_id.to_string());
        *self.kick_succeeds.lock().unwrap()
    }

    async fn health(&self) -> EngineHealth {
        if *self.healthy.lock().unwrap() {
            EngineHealth {
                healthy: true,
                version: Some("mock".to_string()),
            }
        } else {
            EngineHealth::unreachable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_kicks() {
        let mock = MockMediaEngineClient::new();
        assert!(mock.kick("a").await);

        mock.set_kick_succeeds(false);
        assert!(!mock.kick("b").await);

        assert_eq!(mock.kicked_clients(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_unhealthy_mock_reports_empty() {
        let mock = MockMediaEngineClient::new();
        mock.set_streams(vec![EngineStream {
            name: "abc".to_string(),
            clients: 1,
            bytes_in: 0,
            bytes_out: 0,
            kbps: Default::default(),
            video: None,
            audio: None,
        }]);
        mock.set_healthy(false);

        assert!(mock.live_streams().await.is_empty());
        assert!(!mock.health().await.healthy);
    }
}
