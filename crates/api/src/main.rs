use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inotebook_api::background::ledger_purge;
use inotebook_api::config::ServerConfig;
use inotebook_api::router::build_app_router;
use inotebook_api::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inotebook_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!(error = %message, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    // --- Configuration ---
    let config = ServerConfig::from_env().map_err(|e| format!("Invalid configuration: {e}"))?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = inotebook_db::create_pool(&config.database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;
    tracing::info!("Database connection pool created");

    inotebook_db::health_check(&pool)
        .await
        .map_err(|e| format!("Database health check failed: {e}"))?;
    tracing::info!("Database health check passed");

    inotebook_db::run_migrations(&pool)
        .await
        .map_err(|e| format!("Failed to run database migrations: {e}"))?;
    tracing::info!("Database migrations applied");

    // --- App state ---
    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .map_err(|e| format!("Invalid HOST address '{}': {e}", config.host))?,
        config.port,
    );
    let purge_every = Duration::from_secs(config.ledger_purge_interval_secs);

    let state =
        AppState::postgres(config.clone(), pool).map_err(|e| format!("State setup failed: {e}"))?;

    // --- Ledger purge ---
    let purge_cancel = CancellationToken::new();
    let purge_handle = tokio::spawn(ledger_purge::run(
        state.tokens.ledger().clone(),
        purge_every,
        purge_cancel.clone(),
    ));

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {addr}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    purge_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), purge_handle).await;
    tracing::info!("Ledger purge job stopped");

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
///
/// If a handler cannot be installed that signal is simply never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
