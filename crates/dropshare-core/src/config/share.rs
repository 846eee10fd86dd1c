//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Settings for link issuance and the access page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin the shareable links are built on, e.g. `https://share.example.com`.
    #[serde(default = "default_public_origin")]
    pub public_origin: String,
    /// Path prefix between the origin and the record id.
    #[serde(default = "default_link_path_prefix")]
    pub link_path_prefix: String,
    /// Expiry preselected on the upload form, in days (1, 3 or 7).
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: u32,
    /// Refuse to issue links without a password.
    #[serde(default)]
    pub require_password: bool,
    /// Pause between consecutive files of a batch download, in milliseconds.
    #[serde(default = "default_batch_delay")]
    pub batch_download_delay_ms: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            public_origin: default_public_origin(),
            link_path_prefix: default_link_path_prefix(),
            default_expiry_days: default_expiry_days(),
            require_password: false,
            batch_download_delay_ms: default_batch_delay(),
        }
    }
}

fn default_public_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_link_path_prefix() -> String {
    "/file/".to_string()
}

fn default_expiry_days() -> u32 {
    3
}

fn default_batch_delay() -> u64 {
    500
}
