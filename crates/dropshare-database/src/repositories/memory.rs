//! In-memory share repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use dropshare_core::result::AppResult;
use dropshare_core::traits::RecordStore;
use dropshare_core::types::ShareId;
use dropshare_entity::share::{NewShareRecord, ShareRecord};

/// Share records in a process-local map. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareRepository {
    records: Arc<RwLock<HashMap<ShareId, ShareRecord>>>,
}

impl MemoryShareRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a fully-formed record, e.g. one already past its expiry.
    pub async fn seed(&self, record: ShareRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no record is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore<ShareRecord, NewShareRecord, ShareId> for MemoryShareRepository {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn insert(&self, record: &NewShareRecord) -> AppResult<ShareRecord> {
        let stored = ShareRecord {
            id: ShareId::generate(),
            name: record.name.clone(),
            size: record.size,
            url: record.url.clone(),
            password: record.password.clone(),
            expiry: record.expiry,
            created_at: Utc::now(),
        };
        self.records.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &ShareId) -> AppResult<Option<ShareRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn payload(name: &str) -> NewShareRecord {
        NewShareRecord {
            name: name.to_string(),
            size: 3,
            url: format!("memory://uploads/1_{name}"),
            password: Some("pw".into()),
            expiry: Utc::now() + Duration::days(3),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let repo = MemoryShareRepository::new();
        let a = repo.insert(&payload("a.txt")).await.unwrap();
        let b = repo.insert(&payload("a.txt")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_find_returns_stored_fields() {
        let repo = MemoryShareRepository::new();
        let new = payload("report.pdf");
        let saved = repo.insert(&new).await.unwrap();

        let found = repo.find_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(found.name, "report.pdf");
        assert_eq!(found.url, new.url);
        assert_eq!(found.password.as_deref(), Some("pw"));
        assert_eq!(found.expiry, new.expiry);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let repo = MemoryShareRepository::new();
        assert!(repo.find_by_id(&ShareId::generate()).await.unwrap().is_none());
    }
}
