//! Database migration command.

use dropshare_core::config::{AppConfig, DatabaseProvider};
use dropshare_core::error::AppError;
use dropshare_database::DatabasePool;
use dropshare_database::migration::run_migrations;

use crate::output;

/// Execute the migrate command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider != DatabaseProvider::Postgres {
        output::print_warning("Database provider is not postgres; nothing to migrate");
        return Ok(());
    }

    let db = DatabasePool::connect(&config.database).await?;
    let result = run_migrations(db.pool()).await;
    db.close().await;
    result?;

    output::print_success("Migrations applied");
    Ok(())
}
