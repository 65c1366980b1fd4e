//! Wire types for the media engine API.

use serde::{Deserialize, Serialize};

/// A live stream as reported by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStream {
    /// Engine-side stream name. May carry a transport suffix
    /// (e.g. `key.flv`, `key?vhost=...`) that the reconciler strips.
    pub name: String,
    /// Connected client count (publisher + players).
    #[serde(default)]
    pub clients: i64,
    /// Total bytes received by the engine for this stream.
    #[serde(default)]
    pub bytes_in: i64,
    /// Total bytes sent by the engine for this stream.
    #[serde(default)]
    pub bytes_out: i64,
    /// Rolling bitrate counters.
    #[serde(default)]
    pub kbps: EngineKbps,
    /// Video track metadata, when the engine has probed it.
    #[serde(default)]
    pub video: Option<EngineVideo>,
    /// Audio track metadata, when the engine has probed it.
    #[serde(default)]
    pub audio: Option<EngineAudio>,
}

/// Rolling bitrate counters for a live stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineKbps {
    /// Receive bitrate over the last 30 seconds, in kbps.
    #[serde(default)]
    pub recv_30s: i64,
    /// Send bitrate over the last 30 seconds, in kbps.
    #[serde(default)]
    pub send_30s: i64,
}

/// Video track metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineVideo {
    /// Codec name, e.g. `H264`.
    pub codec: String,
    /// Frame width in pixels.
    #[serde(default)]
    pub width: Option<i32>,
    /// Frame height in pixels.
    #[serde(default)]
    pub height: Option<i32>,
}

/// Audio track metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineAudio {
    /// Codec name, e.g. `AAC`.
    pub codec: String,
    /// Sample rate in Hz.
    #[serde(default)]
    pub sample_rate: Option<i32>,
}

/// Engine health probe result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineHealth {
    /// Whether the engine answered the probe.
    pub healthy: bool,
    /// Engine version string, when reachable.
    pub version: Option<String>,
}

impl EngineHealth {
    /// Health value reported when the engine cannot be reached.
    pub fn unreachable() -> Self {
        Self {
            healthy: false,
            version: None,
        }
    }
}

/// Envelope of `GET /streams/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamsEnvelope {
    /// Live streams.
    #[serde(default)]
    pub streams: Vec<EngineStream>,
}

/// Envelope of `GET /versions`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionsEnvelope {
    /// Engine version string.
    pub version: Option<String>,
}
