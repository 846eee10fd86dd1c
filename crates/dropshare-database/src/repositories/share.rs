//! PostgreSQL share repository.

use async_trait::async_trait;
use sqlx::PgPool;

use dropshare_core::error::{AppError, ErrorKind};
use dropshare_core::result::AppResult;
use dropshare_core::traits::RecordStore;
use dropshare_core::types::ShareId;
use dropshare_entity::share::{NewShareRecord, ShareRecord};

const COLUMNS: &str = "id, name, size, url, password, expiry, created_at";

/// Share records in a PostgreSQL table.
#[derive(Debug, Clone)]
pub struct PgShareRepository {
    pool: PgPool,
    table: String,
}

impl PgShareRepository {
    /// Create a repository over `table`.
    ///
    /// The table name is interpolated into SQL, so only plain identifiers
    /// are accepted.
    pub fn new(pool: PgPool, table: &str) -> AppResult<Self> {
        if !is_identifier(table) {
            return Err(AppError::configuration(format!(
                "Invalid table name: {table:?}"
            )));
        }
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl RecordStore<ShareRecord, NewShareRecord, ShareId> for PgShareRepository {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Health check failed: {e}"), e)
            })
    }

    async fn insert(&self, record: &NewShareRecord) -> AppResult<ShareRecord> {
        let sql = format!(
            "INSERT INTO {} (id, name, size, url, password, expiry) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}",
            self.table
        );
        sqlx::query_as::<_, ShareRecord>(&sql)
            .bind(ShareId::generate())
            .bind(&record.name)
            .bind(record.size)
            .bind(&record.url)
            .bind(&record.password)
            .bind(record.expiry)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to save share: {e}"),
                    e,
                )
            })
    }

    async fn find_by_id(&self, id: &ShareId) -> AppResult<Option<ShareRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", self.table);
        sqlx::query_as::<_, ShareRecord>(&sql)
            .bind(*id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to find share: {e}"), e)
            })
    }
}
