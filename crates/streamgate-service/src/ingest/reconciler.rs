//! Reconciliation of open publish sessions against the engine's live list.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use streamgate_core::result::AppResult;
use streamgate_database::repositories::publish_session::{
    OpenPublishRow, PublishSessionRepository,
};
use streamgate_engine::client::MediaEngineClient;
use streamgate_engine::types::EngineStream;

/// Live metrics for an active session, sourced from the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveMetrics {
    /// Receive bitrate over the last 30 seconds, in kbps.
    pub bitrate_kbps: i64,
    /// Connected client count (publisher + players).
    pub clients: i64,
    /// Total bytes the engine has received for this stream.
    pub bytes_in: i64,
    /// Video codec, when probed.
    pub video_codec: Option<String>,
    /// Audio codec, when probed.
    pub audio_codec: Option<String>,
}

/// One active publish session as shown to the UI: store identity merged
/// with engine metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    /// Publish session ID.
    pub session_id: Uuid,
    /// The stream being published.
    pub stream_id: Uuid,
    /// The stream's human-readable name.
    pub stream_name: String,
    /// Engine-assigned client ID.
    pub client_id: String,
    /// Publisher IP address.
    pub ip_address: String,
    /// Protocol reported at admission.
    pub protocol: String,
    /// When the session was admitted.
    pub started_at: DateTime<Utc>,
    /// Bytes received as last recorded in the store.
    pub bytes_received: i64,
    /// Live metrics from the engine; `None` when the engine has no
    /// matching entry (or is unreachable).
    pub metrics: Option<LiveMetrics>,
}

/// Merges the session store's open records with the engine's live list
/// into one consistent view.
///
/// The store is authoritative for *which* sessions exist; the engine is
/// authoritative for live metrics. The view is computed fresh on every
/// call, with no caching layer, so its cost is bounded by the engine's
/// timeout-capped response latency.
#[derive(Clone)]
pub struct SessionReconciler {
    publish_repo: Arc<PublishSessionRepository>,
    engine: Arc<dyn MediaEngineClient>,
}

impl std::fmt::Debug for SessionReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionReconciler").finish()
    }
}

impl SessionReconciler {
    /// Creates a new reconciler.
    pub fn new(
        publish_repo: Arc<PublishSessionRepository>,
        engine: Arc<dyn MediaEngineClient>,
    ) -> Self {
        Self {
            publish_repo,
            engine,
        }
    }

    /// Lists all active sessions with their live metrics.
    ///
    /// An engine-reported live stream with no matching open session is
    /// dropped: the unpublish webhook can land before the engine's own
    /// listing catches up, and the store wins that race. An open session
    /// the engine does not report appears with metrics omitted.
    pub async fn list_active(&self) -> AppResult<Vec<ActiveSession>> {
        let open = self.publish_repo.find_open_joined().await?;
        let live = self.engine.live_streams().await;
        let live_count = live.len();

        let view = merge(open, live);

        let matched = view.iter().filter(|s| s.metrics.is_some()).count();
        if live_count > matched {
            debug!(
                engine_only = live_count - matched,
                "Dropped engine-reported streams with no open session"
            );
        }

        Ok(view)
    }
}

/// Strips any transport suffix from an engine-reported stream name.
///
/// Engines report container/transport decorations such as `key.flv` or
/// `key?vhost=x`; the join key against `stream_key` is everything before
/// the first `.` or `?`.
fn normalize_engine_name(name: &str) -> &str {
    let end = name
        .find(['.', '?'])
        .unwrap_or(name.len());
    &name[..end]
}

/// Merges open session rows with the engine's live list.
fn merge(open: Vec<OpenPublishRow>, live: Vec<EngineStream>) -> Vec<ActiveSession> {
    let mut by_key: HashMap<&str, &EngineStream> = HashMap::new();
    for stream in &live {
        by_key.entry(normalize_engine_name(&stream.name)).or_insert(stream);
    }

    open.into_iter()
        .map(|row| {
            let metrics = by_key.get(row.stream_key.as_str()).map(|e| LiveMetrics {
                bitrate_kbps: e.kbps.recv_30s,
                clients: e.clients,
                bytes_in: e.bytes_in,
                video_codec: e.video.as_ref().map(|v| v.codec.clone()),
                audio_codec: e.audio.as_ref().map(|a| a.codec.clone()),
            });

            ActiveSession {
                session_id: row.id,
                stream_id: row.stream_id,
                stream_name: row.stream_name,
                client_id: row.client_id,
                ip_address: row.ip_address,
                protocol: row.protocol,
                started_at: row.started_at,
                bytes_received: row.bytes_received,
                metrics,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamgate_engine::types::{EngineKbps, EngineVideo};

    fn open_row(stream_key: &str, client_id: &str) -> OpenPublishRow {
        OpenPublishRow {
            id: Uuid::new_v4(),
            stream_id: Uuid::new_v4(),
            client_id: client_id.to_string(),
            ip_address: "10.0.0.5".to_string(),
            protocol: "rtmp".to_string(),
            started_at: Utc::now(),
            bytes_received: 1024,
            stream_key: stream_key.to_string(),
            stream_name: format!("stream-{stream_key}"),
        }
    }

    fn engine_stream(name: &str, recv_kbps: i64) -> EngineStream {
        EngineStream {
            name: name.to_string(),
            clients: 3,
            bytes_in: 9000,
            bytes_out: 4500,
            kbps: EngineKbps {
                recv_30s: recv_kbps,
                send_30s: 0,
            },
            video: Some(EngineVideo {
                codec: "H264".to_string(),
                width: Some(1920),
                height: Some(1080),
            }),
            audio: None,
        }
    }

    #[test]
    fn test_normalize_engine_name() {
        assert_eq!(normalize_engine_name("abc"), "abc");
        assert_eq!(normalize_engine_name("abc.flv"), "abc");
        assert_eq!(normalize_engine_name("abc?vhost=x"), "abc");
        assert_eq!(normalize_engine_name("abc.m3u8?token=1"), "abc");
        assert_eq!(normalize_engine_name(""), "");
    }

    #[test]
    fn test_matched_session_carries_metrics() {
        let view = merge(
            vec![open_row("abc", "client-1")],
            vec![engine_stream("abc.flv", 4500)],
        );

        assert_eq!(view.len(), 1);
        let metrics = view[0].metrics.as_ref().expect("metrics");
        assert_eq!(metrics.bitrate_kbps, 4500);
        assert_eq!(metrics.video_codec.as_deref(), Some("H264"));
    }

    #[test]
    fn test_store_only_session_kept_without_metrics() {
        let view = merge(vec![open_row("abc", "client-1")], vec![]);

        assert_eq!(view.len(), 1);
        assert!(view[0].metrics.is_none());
    }

    #[test]
    fn test_engine_only_stream_dropped() {
        // Unpublish webhook already closed the session; the engine's
        // listing is behind. The entry must not resurface in the view.
        let view = merge(vec![], vec![engine_stream("ghost", 2000)]);
        assert!(view.is_empty());
    }

    #[test]
    fn test_mixed_view() {
        let view = merge(
            vec![open_row("abc", "client-1"), open_row("def", "client-2")],
            vec![engine_stream("def", 3000), engine_stream("ghost", 1)],
        );

        assert_eq!(view.len(), 2);
        let by_key: HashMap<_, _> = view
            .iter()
            .map(|s| (s.client_id.as_str(), s.metrics.is_some()))
            .collect();
        assert_eq!(by_key["client-1"], false);
        assert_eq!(by_key["client-2"], true);
    }
}
