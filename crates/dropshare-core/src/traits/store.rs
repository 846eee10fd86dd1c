//! Record store trait for metadata backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Insert-and-lookup store for metadata records.
///
/// This trait is generic over the record, its insert payload and its
/// identifier so it can live in `dropshare-core` without knowing about
/// the entity crate. The store is the sole source of identifiers: the
/// insert payload carries none, and the returned record carries the one
/// the store generated.
#[async_trait]
pub trait RecordStore<Record, NewRecord, Id>: Send + Sync + std::fmt::Debug + 'static
where
    Record: Send + Sync + 'static,
    NewRecord: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Return the provider type name (e.g. "postgres", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a record and return it with its generated identifier.
    async fn insert(&self, record: &NewRecord) -> AppResult<Record>;

    /// Find a record by its identifier.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Record>>;
}
