//! StreamGate Server — management plane for a live-video ingest service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use streamgate_core::config::AppConfig;
use streamgate_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("STREAMGATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StreamGate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = streamgate_database::connection::create_pool(&config.database).await?;
    streamgate_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(streamgate_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let stream_repo = Arc::new(
        streamgate_database::repositories::stream::StreamRepository::new(db_pool.clone()),
    );
    let publish_repo = Arc::new(
        streamgate_database::repositories::publish_session::PublishSessionRepository::new(
            db_pool.clone(),
        ),
    );
    let login_repo = Arc::new(
        streamgate_database::repositories::login_session::LoginSessionRepository::new(
            db_pool.clone(),
        ),
    );

    // ── Step 3: Media engine client ──────────────────────────────
    tracing::info!(api_url = %config.engine.api_url, "Initializing media engine client");
    let engine: Arc<dyn streamgate_engine::MediaEngineClient> =
        Arc::new(streamgate_engine::HttpMediaEngineClient::new(&config.engine)?);

    // ── Step 4: Auth stack ───────────────────────────────────────
    let jwt_encoder = Arc::new(streamgate_auth::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(streamgate_auth::JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(streamgate_auth::PasswordHasher::new());
    let session_store = Arc::new(streamgate_auth::LoginSessionStore::new(Arc::clone(
        &login_repo,
    )));
    let token_service = Arc::new(streamgate_auth::TokenService::new(
        jwt_encoder,
        jwt_decoder,
        session_store,
        Arc::clone(&user_repo),
        password_hasher,
        config.session.clone(),
    ));

    // ── Step 5: Ingest services ──────────────────────────────────
    let validator = Arc::new(streamgate_service::StreamKeyValidator::new(Arc::clone(
        &stream_repo,
    )));
    let admission = Arc::new(streamgate_service::AdmissionController::new(
        validator,
        Arc::clone(&publish_repo),
        config.ingest.clone(),
    ));
    let reconciler = Arc::new(streamgate_service::SessionReconciler::new(
        Arc::clone(&publish_repo),
        Arc::clone(&engine),
    ));

    // ── Step 6: Retention worker ─────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let sweeper = Arc::new(streamgate_worker::RetentionSweeper::new(
            Arc::clone(&publish_repo),
            Arc::clone(&login_repo),
            config.ingest.clone(),
            config.session.clone(),
        ));

        let scheduler = streamgate_worker::RetentionScheduler::new(sweeper).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Retention worker disabled");
        None
    };

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = streamgate_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        engine,
        token_service,
        admission,
        reconciler,
        publish_repo,
        stream_repo,
    };

    let app = streamgate_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("StreamGate listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 8: Stop background tasks ────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    tracing::info!("StreamGate shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
