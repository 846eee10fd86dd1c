//! Share record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dropshare_core::types::ShareId;

use super::files::{FileItem, ShareUrl};

/// A persisted share: the files it references, its optional password and
/// its absolute expiry.
///
/// Records are never updated after insertion. There is no revocation and no
/// download counter.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareRecord {
    /// Store-generated identifier.
    pub id: ShareId,
    /// Display label: the file name, or `"<n> files"` for bundles.
    pub name: String,
    /// Total size of all files in bytes.
    pub size: i64,
    /// Encoded [`ShareUrl`]: a direct object URL or a JSON list of files.
    pub url: String,
    /// Plaintext password; `None` or empty means the share is public.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// When the link stops working.
    pub expiry: DateTime<Utc>,
    /// When the record was inserted.
    pub created_at: DateTime<Utc>,
}

impl ShareRecord {
    /// Whether the link is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }

    /// Whether visitors must submit a password.
    pub fn is_password_protected(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Exact string comparison against the stored password.
    ///
    /// Public shares accept any candidate.
    pub fn password_matches(&self, candidate: &str) -> bool {
        match self.password.as_deref() {
            Some(stored) if !stored.is_empty() => stored == candidate,
            _ => true,
        }
    }

    /// Decoded form of the `url` column.
    pub fn share_url(&self) -> ShareUrl {
        ShareUrl::decode(&self.url)
    }

    /// The downloadable files of this share, in upload order.
    ///
    /// Records written before multi-file support hold a bare URL; those
    /// yield one item carrying the record's own name and size.
    pub fn files(&self) -> Vec<FileItem> {
        self.share_url()
            .into_items(&self.name, u64::try_from(self.size).unwrap_or(0))
    }
}

/// Insert payload for a share record. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareRecord {
    /// Display label.
    pub name: String,
    /// Total size in bytes.
    pub size: i64,
    /// Encoded [`ShareUrl`].
    pub url: String,
    /// Plaintext password, `None` for a public share.
    pub password: Option<String>,
    /// Absolute expiry.
    pub expiry: DateTime<Utc>,
}

impl NewShareRecord {
    /// Build the insert payload for a set of uploaded files.
    ///
    /// One file keeps its own name and a direct URL; several files get a
    /// count label and a serialized list.
    pub fn for_files(
        items: Vec<FileItem>,
        password: Option<String>,
        expiry: DateTime<Utc>,
    ) -> Result<Self, dropshare_core::AppError> {
        let name = match items.as_slice() {
            [single] => single.name.clone(),
            many => format!("{} files", many.len()),
        };
        let total: u64 = items.iter().map(|f| f.size).sum();
        let url = ShareUrl::from_items(items).encode()?;

        Ok(Self {
            name,
            size: i64::try_from(total).unwrap_or(i64::MAX),
            url,
            password: password.filter(|p| !p.is_empty()),
            expiry,
        })
    }
}
