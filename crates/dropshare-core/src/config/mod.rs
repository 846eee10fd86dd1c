//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so an empty file (or no
//! file at all) yields a runnable development configuration.

pub mod app;
pub mod database;
pub mod logging;
pub mod share;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, DatabaseProvider, MIGRATED_TABLE};
pub use self::logging::LoggingConfig;
pub use self::share::ShareConfig;
pub use self::storage::{LocalStorageConfig, S3StorageConfig, StorageConfig, StorageProviderKind};

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DROPSHARE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay +
/// `DROPSHARE__*` environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Metadata store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Share link settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `base` (a path without extension) with the `env` overlay
    /// next to it and environment variables prefixed with `DROPSHARE__`.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let overlay = match base.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{env}"),
            None => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.provider == DatabaseProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        if self.database.provider == DatabaseProvider::Postgres
            && self.database.run_migrations
            && self.database.table != MIGRATED_TABLE
        {
            return Err(AppError::configuration(format!(
                "database.table = {:?} is not created by the migrations; \
                 create it yourself and set database.run_migrations = false",
                self.database.table
            )));
        }
        if self.storage.bucket.is_empty() {
            return Err(AppError::configuration("storage.bucket must not be empty"));
        }
        crate::types::ExpiryChoice::try_from(self.share.default_expiry_days)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_runnable() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.provider, DatabaseProvider::Memory);
        assert_eq!(config.storage.bucket, "uploads");
        assert_eq!(config.share.default_expiry_days, 3);
        assert_eq!(config.storage.max_upload_size_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn test_postgres_without_url_is_rejected() {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Postgres;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_table_needs_migrations_off() {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Postgres;
        config.database.url = "postgres://localhost/dropshare".into();
        config.database.table = "shares".into();
        assert!(config.validate().is_err());

        config.database.run_migrations = false;
        assert!(config.validate().is_ok());

        config.database.table = MIGRATED_TABLE.into();
        config.database.run_migrations = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_default_expiry_is_rejected() {
        let mut config = AppConfig::default();
        config.share.default_expiry_days = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config = AppConfig::load_from("does/not/exist/default", "test").unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
