//! NetGate Server — campus Wi-Fi admission portal backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use netgate_auth::{
    AdmissionEngine, ControllerCredentialIssuer, CredentialIssuer, GoogleTokenVerifier,
    MockCredentialIssuer, PgSessionStore, SessionStore,
};
use netgate_core::config::AppConfig;
use netgate_core::config::controller::IssuerProvider;
use netgate_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("NETGATE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
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
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting NetGate v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = netgate_database::DatabasePool::connect(&config.database).await?;
    netgate_database::migration::run_migrations(db_pool.pool()).await?;

    // ── Step 2: Session store ────────────────────────────────────
    let store: Arc<dyn SessionStore> = Arc::new(PgSessionStore::new(db_pool.pool().clone()));

    // ── Step 3: Identity verifier ────────────────────────────────
    let verifier = Arc::new(GoogleTokenVerifier::new(config.identity.clone())?);

    // ── Step 4: Credential issuer ────────────────────────────────
    tracing::info!(provider = %config.controller.provider, "Initializing credential issuer");
    let issuer: Arc<dyn CredentialIssuer> = match config.controller.provider {
        IssuerProvider::Http => Arc::new(ControllerCredentialIssuer::new(
            config.controller.clone(),
            config.session.session_minutes,
        )?),
        IssuerProvider::Mock => Arc::new(MockCredentialIssuer::new()),
    };

    // ── Step 5: Admission engine ─────────────────────────────────
    let engine = Arc::new(AdmissionEngine::new(
        verifier,
        issuer,
        Arc::clone(&store),
        &config.session,
    ));

    // ── Step 6: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = netgate_api::AppState::new(Arc::new(config), engine, store);
    let app = netgate_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("NetGate server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    tracing::info!("NetGate server shut down gracefully");
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
