//! HTTP implementation of the media engine client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use streamgate_core::config::engine::EngineConfig;
use streamgate_core::error::AppError;

use crate::client::MediaEngineClient;
use crate::types::{EngineHealth, EngineStream, StreamsEnvelope, VersionsEnvelope};

/// Media engine client speaking the engine's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpMediaEngineClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMediaEngineClient {
    /// Create a client from engine configuration. The configured request
    /// timeout bounds every call so a stalled engine cannot stall the
    /// control plane.
    pub fn new(config: &EngineConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Option<T> {
        let url = self.url(path);
        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "Media engine unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "Media engine returned error status");
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to decode media engine response");
                None
            }
        }
    }
}

#[async_trait]
impl MediaEngineClient for HttpMediaEngineClient {
    async fn live_streams(&self) -> Vec<EngineStream> {
        self.get_json::<StreamsEnvelope>("/streams/")
            .await
            .map(|env| env.streams)
            .unwrap_or_default()
    }

    async fn kick(&self, client_id: &str) -> bool {
        let url = self.url(&format!("/clients/{client_id}"));
        match self.http.delete(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(url = %url, status = %response.status(), "Engine refused client kick");
                false
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to kick client");
                false
            }
        }
    }

    async fn health(&self) -> EngineHealth {
        match self.get_json::<VersionsEnvelope>("/versions").await {
            Some(env) => EngineHealth {
                healthy: true,
                version: env.version,
            },
            None => EngineHealth::unreachable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> HttpMediaEngineClient {
        // 192.0.2.0/24 is TEST-NET-1, guaranteed non-routable.
        HttpMediaEngineClient::new(&EngineConfig {
            api_url: "http://192.0.2.1:1985/api/v1/".to_string(),
            request_timeout_seconds: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = unreachable_client();
        assert_eq!(
            client.url("/streams/"),
            "http://192.0.2.1:1985/api/v1/streams/"
        );
    }

    #[tokio::test]
    async fn test_unreachable_engine_degrades() {
        let client = unreachable_client();
        assert!(client.live_streams().await.is_empty());
        assert!(!client.kick("client-1").await);

        let health = client.health().await;
        assert!(!health.healthy);
        assert!(health.version.is_none());
    }
}
