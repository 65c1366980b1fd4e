//! Health probe.

use axum::Json;
use axum::extract::State;

use streamgate_database::connection;
use streamgate_engine::MediaEngineClient;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Reports database and engine reachability. An unreachable engine
/// degrades the report; it never fails the request.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = connection::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    let engine = state.engine.health().await;

    let status = if database && engine.healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        engine: engine.healthy,
        engine_version: engine.version,
    })
}
