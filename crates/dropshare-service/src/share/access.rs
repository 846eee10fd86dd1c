//! Access gate: resolve a link to a record and decide what the visitor sees.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::types::ShareId;
use dropshare_database::DynShareStore;
use dropshare_entity::share::{FileItem, ShareRecord};

use super::remaining::expiry_notice;
use crate::download::DownloadSelection;

/// Shown when the link points at nothing.
pub const NOT_FOUND_MESSAGE: &str =
    "File not found. The link may be incorrect or the file has been deleted.";
/// Shown when the link id is malformed.
pub const INVALID_LINK_MESSAGE: &str = "Invalid file link.";
/// Shown when the record lookup itself failed.
pub const LOOKUP_FAILED_MESSAGE: &str = "An error occurred while trying to access the file.";
/// Shown after a wrong password.
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect password. Please try again.";
/// Shown for a link past its expiry.
pub const EXPIRED_MESSAGE: &str =
    "This file sharing link has expired and is no longer available.";

/// What the access page shows.
///
/// `Loading` moves to one of the other four exactly once. Only
/// `PasswordRequired` moves again, to `Granted`, on a correct password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessState {
    /// The record has not been looked up yet.
    Loading,
    /// No record behind the link.
    NotFound {
        /// Message for the visitor.
        message: String,
    },
    /// The record exists but is past its expiry.
    Expired,
    /// The visitor must submit the password.
    PasswordRequired {
        /// Set after a wrong submission.
        error: Option<String>,
    },
    /// Files may be downloaded.
    Granted,
}

/// One visitor's view of a link.
#[derive(Debug, Clone)]
pub struct AccessPage {
    link_id: String,
    record: Option<ShareRecord>,
    state: AccessState,
}

impl AccessPage {
    /// A page that has not resolved its link yet.
    pub fn loading(link_id: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            record: None,
            state: AccessState::Loading,
        }
    }

    /// Settle the page from a lookup result, judging expiry at `now`.
    pub fn resolve(&mut self, lookup: AppResult<Option<ShareRecord>>, now: DateTime<Utc>) {
        if self.state != AccessState::Loading {
            return;
        }

        self.state = match lookup {
            Err(_) => AccessState::NotFound {
                message: LOOKUP_FAILED_MESSAGE.to_string(),
            },
            Ok(None) => AccessState::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
            },
            Ok(Some(record)) => {
                let state = if record.is_expired_at(now) {
                    AccessState::Expired
                } else if record.is_password_protected() {
                    AccessState::PasswordRequired { error: None }
                } else {
                    AccessState::Granted
                };
                self.record = Some(record);
                state
            }
        };
    }

    /// Submit a password. Only has an effect while one is required.
    pub fn submit_password(&mut self, candidate: &str) -> &AccessState {
        if let AccessState::PasswordRequired { .. } = self.state {
            let matches = self
                .record
                .as_ref()
                .is_some_and(|r| r.password_matches(candidate));
            self.state = if matches {
                AccessState::Granted
            } else {
                AccessState::PasswordRequired {
                    error: Some(INCORRECT_PASSWORD_MESSAGE.to_string()),
                }
            };
        }
        &self.state
    }

    /// The link identifier as given.
    pub fn link_id(&self) -> &str {
        &self.link_id
    }

    /// Current state.
    pub fn state(&self) -> &AccessState {
        &self.state
    }

    /// Whether downloads are allowed.
    pub fn is_granted(&self) -> bool {
        self.state == AccessState::Granted
    }

    /// The resolved record, if one was found.
    pub fn record(&self) -> Option<&ShareRecord> {
        self.record.as_ref()
    }

    /// Downloadable files. Empty unless access is granted.
    pub fn files(&self) -> Vec<FileItem> {
        match (&self.state, &self.record) {
            (AccessState::Granted, Some(record)) => record.files(),
            _ => Vec::new(),
        }
    }

    /// A fresh, empty selection over the granted files.
    pub fn selection(&self) -> DownloadSelection {
        DownloadSelection::new(self.files().len())
    }

    /// Remaining-lifetime notice for a found record.
    pub fn expiry_notice(&self, now: DateTime<Utc>) -> Option<String> {
        self.record.as_ref().map(|r| expiry_notice(r.expiry, now))
    }

    /// The granted files, or the error matching the page state.
    pub fn require_granted(&self) -> AppResult<Vec<FileItem>> {
        match &self.state {
            AccessState::Granted => Ok(self.files()),
            AccessState::NotFound { message } => Err(AppError::not_found(message.clone())),
            AccessState::Expired => Err(AppError::expired(EXPIRED_MESSAGE)),
            AccessState::PasswordRequired { error } => Err(AppError::authorization(
                error
                    .clone()
                    .unwrap_or_else(|| "This file is password protected".to_string()),
            )),
            AccessState::Loading => Err(AppError::internal("Share has not been resolved")),
        }
    }
}

/// Resolves share links against the metadata store.
#[derive(Debug, Clone)]
pub struct AccessService {
    store: DynShareStore,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(store: DynShareStore) -> Self {
        Self { store }
    }

    /// Load the page for `link_id`.
    pub async fn open(&self, link_id: &str) -> AccessPage {
        let mut page = AccessPage::loading(link_id);

        let Ok(id) = ShareId::from_str(link_id.trim()) else {
            page.state = AccessState::NotFound {
                message: INVALID_LINK_MESSAGE.to_string(),
            };
            info!(link_id, "Rejected malformed share link");
            return page;
        };

        let lookup = self.store.find_by_id(&id).await;
        if let Err(e) = &lookup {
            warn!(share_id = %id, error = %e, "Share lookup failed");
        }
        page.resolve(lookup, Utc::now());

        info!(share_id = %id, state = ?page.state, "Resolved share link");
        page
    }

    /// Load the page for `link_id` and submit `password` if one is required.
    pub async fn unlock(&self, link_id: &str, password: &str) -> AccessPage {
        let mut page = self.open(link_id).await;
        if matches!(page.state, AccessState::PasswordRequired { .. }) {
            page.submit_password(password);
            if !page.is_granted() {
                info!(link_id, "Wrong share password submitted");
            }
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;
    use dropshare_core::error::ErrorKind;
    use dropshare_database::MemoryShareRepository;

    fn record(password: Option<&str>, expiry: DateTime<Utc>) -> ShareRecord {
        ShareRecord {
            id: ShareId::generate(),
            name: "report.pdf".into(),
            size: 1024,
            url: "memory://uploads/17_report.pdf".into(),
            password: password.map(String::from),
            expiry,
            created_at: Utc::now(),
        }
    }

    async fn service_with(rec: &ShareRecord) -> AccessService {
        let repo = MemoryShareRepository::new();
        repo.seed(rec.clone()).await;
        AccessService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_public_share_is_granted_immediately() {
        let rec = record(Some(""), Utc::now() + Duration::days(1));
        let page = service_with(&rec).await.open(&rec.id.to_string()).await;

        assert_eq!(page.state(), &AccessState::Granted);
        let files = page.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "report.pdf");
        assert_eq!(files[0].size, 1024);
    }

    #[tokio::test]
    async fn test_password_gate() {
        let rec = record(Some("abc"), Utc::now() + Duration::days(1));
        let svc = service_with(&rec).await;
        let mut page = svc.open(&rec.id.to_string()).await;

        assert_eq!(page.state(), &AccessState::PasswordRequired { error: None });
        assert!(page.files().is_empty());

        page.submit_password("xyz");
        assert_eq!(
            page.state(),
            &AccessState::PasswordRequired {
                error: Some(INCORRECT_PASSWORD_MESSAGE.to_string())
            }
        );

        page.submit_password("abc");
        assert!(page.is_granted());
        assert_eq!(page.files().len(), 1);
    }

    #[tokio::test]
    async fn test_expired_wins_over_password() {
        let rec = record(Some("abc"), Utc::now() - Duration::minutes(1));
        let svc = service_with(&rec).await;

        let mut page = svc.unlock(&rec.id.to_string(), "abc").await;
        assert_eq!(page.state(), &AccessState::Expired);
        page.submit_password("abc");
        assert_eq!(page.state(), &AccessState::Expired);
        assert_eq!(page.require_granted().unwrap_err().kind, ErrorKind::Expired);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let svc = AccessService::new(Arc::new(MemoryShareRepository::new()));

        let page = svc.open(&ShareId::generate().to_string()).await;
        assert_eq!(
            page.state(),
            &AccessState::NotFound {
                message: NOT_FOUND_MESSAGE.to_string()
            }
        );

        let page = svc.open("not-a-uuid").await;
        assert_eq!(
            page.state(),
            &AccessState::NotFound {
                message: INVALID_LINK_MESSAGE.to_string()
            }
        );
        assert!(page.require_granted().unwrap_err().is_not_found());
    }

    #[test]
    fn test_lookup_error_reads_as_not_found() {
        let mut page = AccessPage::loading("x");
        page.resolve(Err(AppError::database("connection reset")), Utc::now());
        assert_eq!(
            page.state(),
            &AccessState::NotFound {
                message: LOOKUP_FAILED_MESSAGE.to_string()
            }
        );
        page.submit_password("anything");
        assert!(matches!(page.state(), AccessState::NotFound { .. }));
    }

    #[test]
    fn test_resolve_only_once() {
        let rec = record(None, Utc::now() + Duration::days(1));
        let mut page = AccessPage::loading(rec.id.to_string());
        page.resolve(Ok(Some(rec)), Utc::now());
        page.resolve(Ok(None), Utc::now());
        assert!(page.is_granted());
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let json = serde_json::to_value(AccessState::PasswordRequired { error: None }).unwrap();
        assert_eq!(json["state"], "password_required");
    }
}
