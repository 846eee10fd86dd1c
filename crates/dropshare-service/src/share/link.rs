//! Share link issuance.

use dropshare_core::config::ShareConfig;
use dropshare_core::types::{ExpiryChoice, ShareId};
use dropshare_entity::share::link::build_link_url;
use dropshare_entity::share::{ShareLink, ShareRecord};

/// Turns stored records into recipient-facing links.
#[derive(Debug, Clone)]
pub struct LinkService {
    origin: String,
    prefix: String,
}

impl LinkService {
    /// Create a link service issuing `<origin><prefix><id>` URLs.
    pub fn new(origin: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a link service from the share configuration.
    pub fn from_config(config: &ShareConfig) -> Self {
        Self::new(&config.public_origin, &config.link_path_prefix)
    }

    /// Full URL of the access page for `id`.
    pub fn link_url(&self, id: &ShareId) -> String {
        build_link_url(&self.origin, &self.prefix, id)
    }

    /// Describe a freshly stored record as a link.
    pub fn issue(&self, record: &ShareRecord, expiry_choice: ExpiryChoice) -> ShareLink {
        ShareLink {
            id: record.id,
            url: self.link_url(&record.id),
            name: record.name.clone(),
            file_count: record.files().len(),
            is_password_protected: record.is_password_protected(),
            expiry_choice,
            expires_at: record.expiry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_issue_describes_record() {
        let links = LinkService::new("https://drop.example/", "/file/");
        let record = ShareRecord {
            id: ShareId::generate(),
            name: "2 files".into(),
            size: 3,
            url: r#"[{"name":"a","size":1,"url":"u/1_a"},{"name":"b","size":2,"url":"u/2_b"}]"#
                .into(),
            password: Some("pw".into()),
            expiry: Utc::now(),
            created_at: Utc::now(),
        };

        let link = links.issue(&record, ExpiryChoice::SevenDays);
        assert_eq!(link.url, format!("https://drop.example/file/{}", record.id));
        assert_eq!(link.file_count, 2);
        assert!(link.is_password_protected);
        assert_eq!(link.expires_at, record.expiry);
    }
}
