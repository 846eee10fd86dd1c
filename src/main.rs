//! DropShare server: password-protected, expiring file sharing links.
//!
//! Loads configuration, sets up logging and hands over to the API crate.

use tracing_subscriber::{EnvFilter, fmt};

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = ?config.database.provider,
        storage = ?config.storage.provider,
        bucket = %config.storage.bucket,
        "Starting DropShare"
    );

    if let Err(e) = dropshare_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `DROPSHARE_CONFIG` (default `config/default`),
/// the `DROPSHARE_ENV` overlay and `DROPSHARE__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let base =
        std::env::var("DROPSHARE_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    let env = std::env::var("DROPSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(base.trim_end_matches(".toml"), &env)
}

/// Initialize tracing from the logging section; `RUST_LOG` wins if set.
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
