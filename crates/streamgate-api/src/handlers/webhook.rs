//! Engine webhook handlers.
//!
//! The engine calls these on publish/unpublish/play/stop events and
//! expects the `{code: 0|1}` envelope back. A non-JSON-shaped failure
//! here would wedge the engine's callback loop, so every path answers
//! with the envelope — including internal errors, which deny.

use axum::Json;
use axum::extract::State;
use tracing::{error, info};

use streamgate_service::AdmissionDecision;

use crate::dto::request::{PublishEvent, UnpublishEvent};
use crate::dto::response::WebhookResponse;
use crate::state::AppState;

/// POST /hooks/on_publish
///
/// Admission decision for a new publish attempt.
pub async fn on_publish(
    State(state): State<AppState>,
    Json(event): Json<PublishEvent>,
) -> Json<WebhookResponse> {
    let decision = state
        .admission
        .authorize_publish(&event.stream, &event.client_id, &event.ip, &event.protocol)
        .await;

    match decision {
        Ok(AdmissionDecision::Allowed { .. }) => Json(WebhookResponse::allow()),
        Ok(AdmissionDecision::Denied { reason }) => Json(WebhookResponse::deny(reason)),
        Err(e) => {
            error!(client_id = %event.client_id, error = %e, "Admission check failed");
            Json(WebhookResponse::deny("internal error"))
        }
    }
}

/// POST /hooks/on_unpublish
///
/// Best-effort close of the client's open session; always answers
/// `{code: 0}` since there is nothing for the engine to retry.
pub async fn on_unpublish(
    State(state): State<AppState>,
    Json(event): Json<UnpublishEvent>,
) -> Json<WebhookResponse> {
    if let Err(e) = state
        .admission
        .revoke_unpublish(&event.client_id, event.bytes_received)
        .await
    {
        error!(client_id = %event.client_id, error = %e, "Failed to close publish session");
    }

    Json(WebhookResponse::allow())
}

/// POST /hooks/on_play
///
/// Playback needs no admission logic; acknowledged for completeness.
pub async fn on_play() -> Json<WebhookResponse> {
    info!("Play event acknowledged");
    Json(WebhookResponse::allow())
}

/// POST /hooks/on_stop
pub async fn on_stop() -> Json<WebhookResponse> {
    Json(WebhookResponse::allow())
}
