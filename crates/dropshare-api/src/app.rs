//! Application builder and server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;
use dropshare_core::traits::ObjectStorage;
use dropshare_database::{DynShareStore, open_share_store};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the application over already-connected backends.
pub fn build_app(
    config: AppConfig,
    storage: Arc<dyn ObjectStorage>,
    store: DynShareStore,
) -> Router {
    build_router(AppState::new(config, storage, store))
}

/// Connects the configured backends and serves until Ctrl+C or SIGTERM.
///
/// After the signal, in-flight requests get `server.shutdown_grace_seconds`
/// to finish.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting DropShare server");

    let storage = dropshare_storage::connect(&config.storage).await?;
    let store = open_share_store(&config.database).await?;

    let addr = config.server.bind_addr();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(config, storage, store);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "DropShare server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                info!("Shutdown signal received, draining connections");
                let _ = shutdown_tx.send(true);
            })
            .await
    });

    // Resolves on the signal, or with an error once the server is gone.
    let _ = shutdown_rx.wait_for(|stopping| *stopping).await;

    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => return Err(AppError::internal(format!("Server error: {e}"))),
        Ok(Err(e)) => return Err(AppError::internal(format!("Server task failed: {e}"))),
        Err(_) => warn!(
            grace_seconds = grace.as_secs(),
            "Requests still in flight after the grace period"
        ),
    }

    info!("DropShare server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
