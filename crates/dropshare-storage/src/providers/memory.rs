//! In-memory storage provider.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::traits::storage::ObjectStorage;
use dropshare_entity::share::key::encode_segment;

use super::check_key;

/// Keeps objects in a shared map. Clones see the same objects.
#[derive(Debug, Clone)]
pub struct MemoryStorageProvider {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryStorageProvider {
    /// Create an empty provider for `bucket`.
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether no object is stored.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, _content_type: Option<&str>) -> AppResult<()> {
        check_key(key)?;
        let mut objects = self.objects.write().await;
        if objects.contains_key(key) {
            return Err(AppError::already_exists(format!("The resource already exists: {key}")));
        }
        objects.insert(key.to_string(), data);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, encode_segment(key))
    }

    async fn download(&self, key: &str) -> AppResult<Bytes> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Object not found: {key}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropshare_entity::share::key::key_from_url;

    #[tokio::test]
    async fn test_url_leads_back_to_object() {
        let provider = MemoryStorageProvider::new("uploads");
        provider
            .upload("9_two words.txt", Bytes::from("x"), None)
            .await
            .unwrap();

        let url = provider.public_url("9_two words.txt");
        let key = key_from_url(&url).unwrap();
        assert_eq!(provider.download(&key).await.unwrap(), Bytes::from("x"));
    }

    #[tokio::test]
    async fn test_clones_share_objects() {
        let provider = MemoryStorageProvider::new("uploads");
        let clone = provider.clone();
        provider.upload("a", Bytes::from("1"), None).await.unwrap();
        assert_eq!(clone.keys().await, vec!["a".to_string()]);
        let err = clone.upload("a", Bytes::new(), None).await.unwrap_err();
        assert!(err.is_already_exists());
    }
}
