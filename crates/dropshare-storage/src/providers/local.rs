//! Local filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use dropshare_core::error::{AppError, ErrorKind};
use dropshare_core::result::AppResult;
use dropshare_core::traits::storage::{ByteStream, ObjectStorage};
use dropshare_entity::share::key::encode_segment;

use super::check_key;

/// Stores each object as a file in `<root>/<bucket>/`.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Bucket directory.
    dir: PathBuf,
    /// Bucket name.
    bucket: String,
    /// URL prefix for object URLs, bucket included.
    public_base: String,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root_path`, creating the bucket directory.
    ///
    /// An empty `public_base_url` produces `file://` URLs pointing at the
    /// bucket directory.
    pub async fn new(root_path: &str, bucket: &str, public_base_url: &str) -> AppResult<Self> {
        let dir = PathBuf::from(root_path).join(bucket);
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create bucket directory {}: {e}", dir.display()),
                e,
            )
        })?;

        let public_base = if public_base_url.is_empty() {
            format!("file://{}", dir.display())
        } else {
            public_base_url.trim_end_matches('/').to_string()
        };

        Ok(Self {
            dir,
            bucket: bucket.to_string(),
            public_base,
        })
    }

    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.dir.is_dir())
    }

    async fn upload(&self, key: &str, data: Bytes, _content_type: Option<&str>) -> AppResult<()> {
        let path = self.resolve(key)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    AppError::already_exists(format!("The resource already exists: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create object {key}: {e}"),
                        e,
                    )
                }
            })?;

        file.write_all(&data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write object {key}: {e}"), e)
        })?;
        file.flush()
            .await
            .map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to flush object {key}: {e}"), e)
        })?;

        debug!(key, bytes = data.len(), "Stored object");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, encode_segment(key))
    }

    async fn download(&self, key: &str) -> AppResult<Bytes> {
        let path = self.resolve(key)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read object {key}: {e}"), e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn download_stream(&self, key: &str) -> AppResult<ByteStream> {
        let path = self.resolve(key)?;
        let file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to open object {key}: {e}"), e)
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn provider(dir: &tempfile::TempDir) -> LocalStorageProvider {
        LocalStorageProvider::new(dir.path().to_str().unwrap(), "uploads", "")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_then_download() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let data = Bytes::from("hello world");
        provider.upload("1_hello.txt", data.clone(), None).await.unwrap();

        assert!(dir.path().join("uploads/1_hello.txt").is_file());
        assert_eq!(provider.download("1_hello.txt").await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_duplicate_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        provider.upload("k", Bytes::from("a"), None).await.unwrap();
        let err = provider.upload("k", Bytes::from("b"), None).await.unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(provider.download("k").await.unwrap(), Bytes::from("a"));
    }

    #[tokio::test]
    async fn test_io_errors_carry_their_cause() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let longest = "k".repeat(255);
        provider.upload(&longest, Bytes::from("a"), None).await.unwrap();

        let too_long = "k".repeat(300);
        let err = provider.upload(&too_long, Bytes::from("a"), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.message.contains("os error"), "{}", err.message);
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;
        assert!(provider.download("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_the_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;
        for key in ["..", "a/b", "..\\x", ""] {
            let err = provider.upload(key, Bytes::new(), None).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "key {key:?}");
        }
    }

    #[tokio::test]
    async fn test_stream_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;
        provider.upload("s", Bytes::from("streamed"), None).await.unwrap();

        let mut stream = provider.download_stream("s").await.unwrap();
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(collected, b"streamed");
    }

    #[tokio::test]
    async fn test_public_url_encodes_key() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(
            dir.path().to_str().unwrap(),
            "uploads",
            "https://cdn.example/uploads/",
        )
        .await
        .unwrap();
        assert_eq!(
            provider.public_url("1_a b.txt"),
            "https://cdn.example/uploads/1_a%20b.txt"
        );
    }
}
