//! Server start command.

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;

/// Execute the serve command
pub async fn execute(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        addr = %config.server.bind_addr(),
        database = ?config.database.provider,
        storage = ?config.storage.provider,
        "Starting server from CLI"
    );
    dropshare_api::run_server(config).await
}
