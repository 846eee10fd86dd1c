//! Link generation: upload every file, then record the share.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use dropshare_core::config::{ShareConfig, StorageConfig};
use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::traits::ObjectStorage;
use dropshare_database::DynShareStore;
use dropshare_entity::share::key::object_key;
use dropshare_entity::share::{FileItem, NewShareRecord, ShareLink, format_size_mb};

use super::draft::{PendingFile, UploadDraft};
use super::progress::UploadProgress;
use crate::share::LinkService;

/// Keys tried per file before a taken-key conflict is reported.
const KEY_ATTEMPTS: usize = 1_000;

/// A failed generation. The draft comes back untouched for a retry.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct UploadFailure {
    /// What went wrong, with the backend message as-is.
    pub error: AppError,
    /// The draft that was submitted.
    pub draft: UploadDraft,
}

impl From<UploadFailure> for AppError {
    fn from(failure: UploadFailure) -> Self {
        failure.error
    }
}

/// Limits checked before any byte is uploaded.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    /// Largest accepted single file in bytes.
    pub max_file_size: u64,
    /// Refuse to generate a link without a password.
    pub require_password: bool,
}

impl UploadPolicy {
    /// Build the policy from configuration.
    pub fn from_config(storage: &StorageConfig, share: &ShareConfig) -> Self {
        Self {
            max_file_size: storage.max_upload_size_bytes,
            require_password: share.require_password,
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: 52_428_800,
            require_password: false,
        }
    }
}

/// Uploads a draft's files one by one and issues the share link.
#[derive(Debug, Clone)]
pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
    store: DynShareStore,
    links: Arc<LinkService>,
    policy: UploadPolicy,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        store: DynShareStore,
        links: Arc<LinkService>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            storage,
            store,
            links,
            policy,
        }
    }

    /// The limits this service enforces.
    pub fn policy(&self) -> UploadPolicy {
        self.policy
    }

    /// Generate a link for `draft`.
    pub async fn generate(&self, draft: UploadDraft) -> Result<ShareLink, UploadFailure> {
        let (progress, _watcher) = watch::channel(UploadProgress::start(draft.len()));
        self.generate_with_progress(draft, &progress).await
    }

    /// Generate a link for `draft`, publishing progress after each file.
    ///
    /// Files are uploaded in order. The first failure stops the sequence;
    /// objects already stored stay where they are and no record is written.
    pub async fn generate_with_progress(
        &self,
        draft: UploadDraft,
        progress: &watch::Sender<UploadProgress>,
    ) -> Result<ShareLink, UploadFailure> {
        match self.run(&draft, progress).await {
            Ok(link) => Ok(link),
            Err(error) => {
                warn!(error = %error, files = draft.len(), "Link generation failed");
                Err(UploadFailure { error, draft })
            }
        }
    }

    async fn run(
        &self,
        draft: &UploadDraft,
        progress: &watch::Sender<UploadProgress>,
    ) -> AppResult<ShareLink> {
        self.validate(draft)?;

        let total = draft.len();
        progress.send_replace(UploadProgress::start(total));
        info!(
            files = total,
            bytes = draft.total_size(),
            expiry_days = draft.expiry().days(),
            "Starting upload"
        );

        let mut used_keys = HashSet::with_capacity(total);
        let mut items = Vec::with_capacity(total);

        for (index, file) in draft.files().iter().enumerate() {
            let key = self.store_object(file, &mut used_keys).await?;
            let url = self.storage.public_url(&key);
            debug!(key = %key, index, size = file.size(), "Uploaded file");
            items.push(FileItem::new(&file.name, file.size(), url));

            progress.send_replace(UploadProgress {
                completed: index + 1,
                total,
            });
        }

        let expiry = draft.expiry().expires_at(Utc::now());
        let new_record =
            NewShareRecord::for_files(items, Some(draft.password().to_string()), expiry)?;
        let record = self.store.insert(&new_record).await?;

        info!(
            share_id = %record.id,
            name = %record.name,
            protected = record.is_password_protected(),
            expiry = %record.expiry,
            "Share created"
        );

        Ok(self.links.issue(&record, draft.expiry()))
    }

    /// Upload one file under a fresh key and return the key.
    ///
    /// A key already used in this generation, or already present in the
    /// bucket, moves the timestamp forward by one millisecond.
    async fn store_object(
        &self,
        file: &PendingFile,
        used_keys: &mut HashSet<String>,
    ) -> AppResult<String> {
        let mut at = Utc::now();
        let mut attempts = 0;
        loop {
            let key = object_key(&file.name, at);
            at += Duration::milliseconds(1);
            if !used_keys.insert(key.clone()) {
                continue;
            }

            attempts += 1;
            match self
                .storage
                .upload(&key, file.data.clone(), file.content_type.as_deref())
                .await
            {
                Ok(()) => return Ok(key),
                Err(e) if e.is_already_exists() && attempts < KEY_ATTEMPTS => {
                    debug!(key = %key, "Key taken, trying the next millisecond");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn validate(&self, draft: &UploadDraft) -> AppResult<()> {
        if draft.is_empty() {
            return Err(AppError::validation("Select at least one file to share"));
        }

        if let Some(file) = draft
            .files()
            .iter()
            .find(|f| f.size() > self.policy.max_file_size)
        {
            return Err(AppError::validation(format!(
                "{} ({}) exceeds the {} upload limit",
                file.name,
                format_size_mb(file.size()),
                format_size_mb(self.policy.max_file_size)
            )));
        }

        if self.policy.require_password && draft.password().is_empty() {
            return Err(AppError::validation(
                "A password is required to generate a link",
            ));
        }

        Ok(())
    }
}
