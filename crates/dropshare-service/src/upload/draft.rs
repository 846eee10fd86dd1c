//! The local selection a user builds before generating a link.

use std::path::Path;

use bytes::Bytes;

use dropshare_core::error::{AppError, ErrorKind};
use dropshare_core::result::AppResult;
use dropshare_core::types::ExpiryChoice;

/// A file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// Original file name, kept for the download.
    pub name: String,
    /// MIME type passed to storage, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl PendingFile {
    /// Create a pending file, guessing its content type from the name.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first()
            .map(|m| m.essence_str().to_string());
        Self {
            name,
            content_type,
            data: data.into(),
        }
    }

    /// Override the guessed content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AppError::validation(format!("Not a file path: {}", path.display()))
            })?;
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Cannot read {}: {e}", path.display()),
                e,
            )
        })?;
        Ok(Self::new(name, data))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Ordered list of files plus the password and expiry to apply.
///
/// Editable until it is handed to
/// [`UploadService::generate`](super::UploadService::generate), which
/// consumes it on success and returns it on failure.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    files: Vec<PendingFile>,
    password: String,
    expiry: ExpiryChoice,
}

impl UploadDraft {
    /// Empty draft with the default expiry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty draft starting from `expiry`.
    pub fn with_expiry(expiry: ExpiryChoice) -> Self {
        Self {
            expiry,
            ..Self::default()
        }
    }

    /// Append a file to the selection.
    pub fn add(&mut self, file: PendingFile) {
        self.files.push(file);
    }

    /// Remove the file at `index`. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<PendingFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Set the password; empty means a public share.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Set the link lifetime.
    pub fn set_expiry(&mut self, expiry: ExpiryChoice) {
        self.expiry = expiry;
    }

    /// Selected files, in upload order.
    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    /// Current password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Current expiry choice.
    pub fn expiry(&self) -> ExpiryChoice {
        self.expiry
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Combined size of the selection in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(PendingFile::size).sum()
    }
}
