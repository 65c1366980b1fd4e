//! Request DTOs: login payload and engine webhook events.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password (verified against the stored Argon2 hash).
    pub password: String,
}

/// Body of `POST /hooks/on_publish`.
///
/// The engine posts more fields than the control plane needs; unknown
/// fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishEvent {
    /// Engine-assigned client identifier.
    pub client_id: String,
    /// Publisher IP address.
    #[serde(default)]
    pub ip: String,
    /// The presented stream key (engine-side stream name).
    pub stream: String,
    /// Ingest protocol reported by the engine.
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

/// Body of `POST /hooks/on_unpublish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpublishEvent {
    /// Engine-assigned client identifier.
    pub client_id: String,
    /// The stream name, unused for the close but logged.
    #[serde(default)]
    pub stream: String,
    /// Final byte counter, when the engine reports one.
    #[serde(default)]
    pub bytes_received: Option<i64>,
}

fn default_protocol() -> String {
    "rtmp".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_event_ignores_extra_fields() {
        let event: PublishEvent = serde_json::from_str(
            r#"{"client_id":"c1","ip":"10.0.0.5","stream":"abc","vhost":"default","app":"live"}"#,
        )
        .unwrap();
        assert_eq!(event.client_id, "c1");
        assert_eq!(event.stream, "abc");
        assert_eq!(event.protocol, "rtmp");
    }

    #[test]
    fn test_unpublish_event_bytes_optional() {
        let event: UnpublishEvent =
            serde_json::from_str(r#"{"client_id":"c1"}"#).unwrap();
        assert!(event.bytes_received.is_none());
    }
}
