//! Fetching share files from object storage.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};

use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::traits::ObjectStorage;
use dropshare_core::traits::storage::ByteStream;
use dropshare_entity::share::FileItem;

use super::selection::DownloadSelection;
use super::sink::FileSink;
use crate::share::AccessPage;

/// One file a batch could not deliver.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Position in the share.
    pub index: usize,
    /// File name.
    pub name: String,
    /// What went wrong.
    pub error: AppError,
}

/// Outcome of a batch download.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Names saved, in order.
    pub saved: Vec<String>,
    /// Files that failed; the batch carried on past each.
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every requested file was saved.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Pulls share files out of object storage.
#[derive(Debug, Clone)]
pub struct DownloadService {
    storage: Arc<dyn ObjectStorage>,
    batch_delay: Duration,
}

impl DownloadService {
    /// Creates a new download service pausing `batch_delay` between batch items.
    pub fn new(storage: Arc<dyn ObjectStorage>, batch_delay: Duration) -> Self {
        Self {
            storage,
            batch_delay,
        }
    }

    fn key_of(item: &FileItem) -> AppResult<String> {
        item.object_key().ok_or_else(|| {
            AppError::not_found(format!("No object key in URL for {}", item.name))
        })
    }

    /// Full contents of one item.
    pub async fn fetch(&self, item: &FileItem) -> AppResult<Bytes> {
        let key = Self::key_of(item)?;
        self.storage.download(&key).await
    }

    /// Contents of one item as a stream.
    pub async fn fetch_stream(&self, item: &FileItem) -> AppResult<ByteStream> {
        let key = Self::key_of(item)?;
        self.storage.download_stream(&key).await
    }

    /// Fetch one item and hand it to `sink` under its original name.
    pub async fn download(&self, item: &FileItem, sink: &dyn FileSink) -> AppResult<()> {
        let data = self.fetch(item).await?;
        sink.save(&item.name, data).await
    }

    /// Download `indices` of `items` one after another.
    ///
    /// A failed item is recorded and skipped. Consecutive items are
    /// separated by the configured delay.
    pub async fn download_batch(
        &self,
        items: &[FileItem],
        indices: &[usize],
        sink: &dyn FileSink,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for (position, &index) in indices.iter().enumerate() {
            if position > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            let result = match items.get(index) {
                Some(item) => self.download(item, sink).await.map(|()| item.name.clone()),
                None => Err(AppError::not_found(format!("No file at index {index}"))),
            };

            match result {
                Ok(name) => report.saved.push(name),
                Err(error) => {
                    let name = items
                        .get(index)
                        .map(|i| i.name.clone())
                        .unwrap_or_default();
                    warn!(index, name = %name, error = %error, "Download failed");
                    report.failed.push(BatchFailure { index, name, error });
                }
            }
        }

        info!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            "Batch download finished"
        );
        report
    }

    /// Download the selected files of a granted page.
    pub async fn download_selected(
        &self,
        page: &AccessPage,
        selection: &DownloadSelection,
        sink: &dyn FileSink,
    ) -> AppResult<BatchReport> {
        let files = page.require_granted()?;
        if !selection.can_download() {
            return Err(AppError::validation("Select at least one file to download"));
        }
        Ok(self
            .download_batch(&files, &selection.indices(), sink)
            .await)
    }
}
