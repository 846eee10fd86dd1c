//! Downloadable items of a share and the encoding of the `url` column.

use serde::{Deserialize, Serialize};

use dropshare_core::error::AppError;

use super::key;

/// One downloadable object within a share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    /// Original file name, used when saving the download.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Object URL in storage.
    pub url: String,
}

impl FileItem {
    /// Create a new file item.
    pub fn new(name: impl Into<String>, size: u64, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            url: url.into(),
        }
    }

    /// Storage key of this item, taken from the last path segment of its URL.
    pub fn object_key(&self) -> Option<String> {
        key::key_from_url(&self.url)
    }

    /// Human-readable size, e.g. `"1.50 MB"`.
    pub fn size_label(&self) -> String {
        format_size_mb(self.size)
    }
}

/// Format a byte count as megabytes with two decimals.
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Structured form of the `url` column.
///
/// The column is a single text field: a bare URL for one file, or a JSON
/// array of [`FileItem`]s for several. Existing rows of both shapes stay
/// readable, so the encoding is kept and only ever handled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareUrl {
    /// One object addressed directly.
    Direct(String),
    /// Several objects, in upload order.
    Bundle(Vec<FileItem>),
}

impl ShareUrl {
    /// Pick the shape for a set of uploaded items.
    pub fn from_items(mut items: Vec<FileItem>) -> Self {
        if items.len() == 1 {
            let only = items.remove(0);
            Self::Direct(only.url)
        } else {
            Self::Bundle(items)
        }
    }

    /// Decode a stored column value.
    ///
    /// A JSON list of items wins; anything else is taken as a bare URL.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Vec<FileItem>>(raw) {
            Ok(items) => Self::Bundle(items),
            Err(_) => Self::Direct(raw.to_string()),
        }
    }

    /// Encode for storage in the text column.
    pub fn encode(&self) -> Result<String, AppError> {
        match self {
            Self::Direct(url) => Ok(url.clone()),
            Self::Bundle(items) => Ok(serde_json::to_string(items)?),
        }
    }

    /// Expand into items. A direct URL borrows the record-level name and size.
    pub fn into_items(self, name: &str, size: u64) -> Vec<FileItem> {
        match self {
            Self::Direct(url) => vec![FileItem::new(name, size, url)],
            Self::Bundle(items) => items,
        }
    }
}
