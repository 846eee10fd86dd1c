//! Object storage trait for pluggable byte storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading object contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for object storage backends.
///
/// Every provider is bound to a single bucket at construction time, so
/// operations only take the object key. Implementations exist for the
/// local filesystem, S3-compatible stores and process memory; the trait is
/// defined here and implemented in `dropshare-storage`.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "local", "s3").
    fn provider_type(&self) -> &str;

    /// The bucket this provider writes into.
    fn bucket(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key`. Fails if the key already exists.
    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// The URL under which the object at `key` is addressed.
    fn public_url(&self, key: &str) -> String;

    /// Fetch the full contents of the object at `key`.
    async fn download(&self, key: &str) -> AppResult<Bytes>;

    /// Fetch the object at `key` as a stream.
    ///
    /// The default implementation buffers via [`ObjectStorage::download`].
    async fn download_stream(&self, key: &str) -> AppResult<ByteStream> {
        let data = self.download(key).await?;
        Ok(Box::pin(futures::stream::once(async move {
            Ok::<_, std::io::Error>(data)
        })))
    }
}
