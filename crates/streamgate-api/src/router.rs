//! Route definitions for the StreamGate HTTP API.
//!
//! Engine-facing webhooks live under `/hooks`; the authenticated
//! control-plane API lives under `/api`. The webhook endpoints carry no
//! bearer auth — the engine is a trusted collaborator on the private
//! network.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(session_routes())
        .merge(health_routes());

    Router::new()
        .nest("/hooks", webhook_routes())
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Engine event callbacks.
fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/on_publish", post(handlers::webhook::on_publish))
        .route("/on_unpublish", post(handlers::webhook::on_unpublish))
        .route("/on_play", post(handlers::webhook::on_play))
        .route("/on_stop", post(handlers::webhook::on_stop))
}

/// Auth endpoints: login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Publish-session view/kick and login-session management.
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(handlers::session::list_active))
        .route("/sessions/{id}", delete(handlers::session::kick))
        .route(
            "/sessions/user-sessions",
            get(handlers::session::list_user_sessions)
                .delete(handlers::session::revoke_other_user_sessions),
        )
        .route(
            "/sessions/user-sessions/{id}",
            delete(handlers::session::revoke_user_session),
        )
        .route(
            "/streams/{id}/sessions",
            delete(handlers::session::close_stream_sessions),
        )
}

/// Health probe.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
