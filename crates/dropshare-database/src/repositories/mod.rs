//! Share record repositories.

pub mod memory;
pub mod share;

use std::sync::Arc;

use tracing::info;

use dropshare_core::config::{DatabaseConfig, DatabaseProvider};
use dropshare_core::result::AppResult;
use dropshare_core::traits::RecordStore;
use dropshare_core::types::ShareId;
use dropshare_entity::share::{NewShareRecord, ShareRecord};

pub use memory::MemoryShareRepository;
pub use share::PgShareRepository;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

/// Shared handle to whichever share store is configured.
pub type DynShareStore = Arc<dyn RecordStore<ShareRecord, NewShareRecord, ShareId>>;

/// Open the configured share store, applying migrations when asked to.
pub async fn open_share_store(config: &DatabaseConfig) -> AppResult<DynShareStore> {
    match config.provider {
        DatabaseProvider::Memory => {
            info!("Using in-memory share store; records are lost on restart");
            Ok(Arc::new(MemoryShareRepository::new()))
        }
        DatabaseProvider::Postgres => {
            let db = DatabasePool::connect(config).await?;
            if config.run_migrations {
                run_migrations(db.pool()).await?;
            }
            let repo = PgShareRepository::new(db.pool().clone(), &config.table)?;
            Ok(Arc::new(repo))
        }
    }
}
