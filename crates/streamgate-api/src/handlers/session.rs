//! Session handlers: the reconciled publish-session view, operator
//! kicks, and login-session management.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use tracing::{info, warn};
use uuid::Uuid;

use streamgate_core::error::AppError;
use streamgate_engine::MediaEngineClient;
use streamgate_service::ActiveSession;

use crate::dto::response::{ApiResponse, LoginSessionResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/sessions
///
/// The reconciled active-session view: store records merged with live
/// engine metrics. Computed fresh on every call.
pub async fn list_active(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ActiveSession>>>, AppError> {
    let sessions = state.reconciler.list_active().await?;
    Ok(Json(ApiResponse::ok(sessions)))
}

/// DELETE /api/sessions/{id}
///
/// Kicks a publisher: disconnect at the engine, then close the session
/// record. The engine kick is best-effort; an unreachable engine does
/// not leave the record open.
pub async fn kick(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !auth.can_kick() {
        return Err(AppError::forbidden("Kicking sessions requires operator access"));
    }

    let session = state
        .publish_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Publish session not found"))?;

    if !session.is_open() {
        return Err(AppError::conflict("Publish session is already closed"));
    }

    if !state.engine.kick(&session.client_id).await {
        warn!(
            session_id = %id,
            client_id = %session.client_id,
            "Engine did not acknowledge kick; closing session record anyway"
        );
    }

    state
        .admission
        .revoke_unpublish(&session.client_id, None)
        .await?;

    info!(
        session_id = %id,
        client_id = %session.client_id,
        kicked_by = %auth.user_id,
        "Publish session kicked"
    );

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Session kicked".to_string(),
    })))
}

/// DELETE /api/streams/{id}/sessions
///
/// Closes every open publish session of one stream. Called after the
/// administrative surface disables or deletes the stream; the engine
/// drops the publishers itself when its config reloads, so only the
/// bookkeeping is closed here.
pub async fn close_stream_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !auth.can_kick() {
        return Err(AppError::forbidden(
            "Closing stream sessions requires operator access",
        ));
    }

    let stream = state
        .stream_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Stream not found"))?;

    let closed = state.admission.revoke_by_stream(stream.id).await?;

    info!(
        stream_id = %stream.id,
        closed,
        closed_by = %auth.user_id,
        "Closed open sessions for stream"
    );

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Closed {closed} open sessions"),
    })))
}

/// GET /api/sessions/user-sessions
///
/// The caller's active login sessions, newest first.
pub async fn list_user_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<LoginSessionResponse>>>, AppError> {
    let sessions = state.token_service.list_sessions(auth.user_id).await?;

    let view = sessions
        .iter()
        .map(|s| LoginSessionResponse::from_session(s, auth.session_id))
        .collect();

    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/sessions/user-sessions/{id}
///
/// Revokes one of the caller's own login sessions. The next
/// authenticate on that session's token fails, regardless of the
/// token's remaining signed lifetime.
pub async fn revoke_user_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.token_service.revoke(id, auth.user_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Session revoked".to_string(),
    })))
}

/// DELETE /api/sessions/user-sessions
///
/// Revokes all of the caller's other login sessions, keeping the one
/// making this request.
pub async fn revoke_other_user_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    let revoked = state
        .token_service
        .revoke_all_except(auth.user_id, token)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Revoked {revoked} other sessions"),
    })))
}
