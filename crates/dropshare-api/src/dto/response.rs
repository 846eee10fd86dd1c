//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropshare_core::types::ExpiryChoice;
use dropshare_entity::share::format_size_mb;
use dropshare_service::{AccessPage, AccessState};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Reachability of one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    /// Provider type, e.g. `"postgres"` or `"local"`.
    pub provider: String,
    /// Whether the last check succeeded.
    pub healthy: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Object storage status.
    pub storage: BackendHealth,
    /// Metadata store status.
    pub database: BackendHealth,
}

/// One entry of the expiry dropdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryOption {
    /// Lifetime in days.
    pub days: u32,
    /// Display label.
    pub label: String,
}

impl From<ExpiryChoice> for ExpiryOption {
    fn from(choice: ExpiryChoice) -> Self {
        Self {
            days: choice.days(),
            label: choice.label(),
        }
    }
}

/// What the upload form offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOptionsResponse {
    /// Selectable lifetimes.
    pub expiry_choices: Vec<ExpiryOption>,
    /// Preselected lifetime in days.
    pub default_expiry_days: u32,
    /// Per-file size limit in bytes.
    pub max_file_size_bytes: u64,
    /// Per-file size limit for display.
    pub max_file_size_label: String,
    /// Whether generating a link needs a password.
    pub require_password: bool,
}

/// A downloadable file on a granted access page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Position within the share.
    pub index: usize,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Size for display, e.g. `"1.50 MB"`.
    pub size_label: String,
    /// Gated download endpoint.
    pub download_path: String,
}

/// The access page as a visitor sees it.
///
/// Share details are only filled in once access is granted.
#[derive(Debug, Clone, Serialize)]
pub struct AccessPageResponse {
    /// Link identifier as requested.
    pub id: String,
    /// Page state plus its message, if any.
    #[serde(flatten)]
    pub state: AccessState,
    /// Display label of the share.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Total size for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_label: Option<String>,
    /// Remaining-lifetime notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_notice: Option<String>,
    /// Absolute expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Downloadable files.
    pub files: Vec<FileEntry>,
    /// Whether the page offers per-file selection and "select all".
    pub multi_select: bool,
}

impl AccessPageResponse {
    /// Render `page` as of `now`.
    pub fn from_page(page: &AccessPage, now: DateTime<Utc>) -> Self {
        let granted = page.is_granted().then(|| page.record()).flatten();

        let files: Vec<FileEntry> = page
            .files()
            .into_iter()
            .enumerate()
            .map(|(index, item)| FileEntry {
                index,
                size_label: item.size_label(),
                download_path: format!("/api/shares/{}/files/{index}", page.link_id()),
                name: item.name,
                size: item.size,
            })
            .collect();

        Self {
            id: page.link_id().to_string(),
            state: page.state().clone(),
            name: granted.map(|r| r.name.clone()),
            size_label: granted.map(|r| format_size_mb(u64::try_from(r.size).unwrap_or(0))),
            expiry_notice: granted.and_then(|_| page.expiry_notice(now)),
            expires_at: granted.map(|r| r.expiry),
            multi_select: files.len() > 1,
            files,
        }
    }
}
