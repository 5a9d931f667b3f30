//! Server startup and shutdown handling

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{create_app, AppState};
use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::recorder::{EventRecorder, LogStore};

/// Build the handler state from resolved configuration.
///
/// Fails if the log file cannot be opened for appending.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let store = LogStore::open(&config.log_path)?;
    Ok(AppState::new(
        TokenVerifier::new(&config.secret),
        EventRecorder::new(store),
    ))
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn run(config: AppConfig) -> Result<()> {
    let app = create_app(build_state(&config)?);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
