//! Share link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropshare_core::types::{ExpiryChoice, ShareId};

/// The result of a successful upload: where recipients go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    /// The record identifier embedded in the link.
    pub id: ShareId,
    /// The full URL for accessing the share.
    pub url: String,
    /// Display label of the share.
    pub name: String,
    /// Number of files in the share.
    pub file_count: usize,
    /// Whether the link is password-protected.
    pub is_password_protected: bool,
    /// The lifetime chosen on upload.
    pub expiry_choice: ExpiryChoice,
    /// When the link expires.
    pub expires_at: DateTime<Utc>,
}

/// Join origin, path prefix and id into a link URL.
///
/// Tolerates a trailing slash on the origin and a missing slash around the
/// prefix.
pub fn build_link_url(origin: &str, prefix: &str, id: &ShareId) -> String {
    let origin = origin.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{origin}/{id}")
    } else {
        format!("{origin}/{prefix}/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_url_normalises_slashes() {
        let id = ShareId::generate();
        let expected = format!("https://share.example/file/{id}");
        assert_eq!(build_link_url("https://share.example", "/file/", &id), expected);
        assert_eq!(build_link_url("https://share.example/", "file", &id), expected);
        assert_eq!(
            build_link_url("https://share.example", "", &id),
            format!("https://share.example/{id}")
        );
    }
}
