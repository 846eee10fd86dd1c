//! Inspect a share link from the terminal.

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;
use dropshare_database::open_share_store;
use dropshare_entity::share::{FileItem, format_size_mb};
use dropshare_service::{AccessPage, AccessService, AccessState};

use crate::output::{self, OutputFormat};

/// Arguments for the open command
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Share link or bare share id
    pub link: String,

    /// Password for a protected share; prompted for when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

/// One row of the file table.
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Size")]
    pub size: String,
}

impl FileRow {
    /// Rows for `files`, numbered from zero as `fetch --only` expects.
    pub fn from_items(files: &[FileItem]) -> Vec<Self> {
        files
            .iter()
            .enumerate()
            .map(|(index, f)| Self {
                index,
                name: f.name.clone(),
                size: f.size_label(),
            })
            .collect()
    }
}

#[derive(Serialize)]
struct PageReport {
    id: String,
    #[serde(flatten)]
    state: AccessState,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry_notice: Option<String>,
    files: Vec<FileRow>,
}

/// Execute the open command
pub async fn execute(
    args: &OpenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = open_share_store(&config.database).await?;
    let access = AccessService::new(store);
    let page = super::unlock(&access, &args.link, args.password.as_deref()).await?;

    match format {
        OutputFormat::Json => output::print_json(&report(&page)),
        OutputFormat::Table => print_page(&page),
    }

    page.require_granted().map(|_| ())
}

fn report(page: &AccessPage) -> PageReport {
    let granted = page.is_granted();
    PageReport {
        id: page.link_id().to_string(),
        state: page.state().clone(),
        name: page
            .record()
            .filter(|_| granted)
            .map(|r| r.name.clone()),
        expiry_notice: page.expiry_notice(Utc::now()).filter(|_| granted),
        files: FileRow::from_items(&page.files()),
    }
}

fn print_page(page: &AccessPage) {
    match page.state() {
        AccessState::Granted => {
            if let Some(record) = page.record() {
                output::print_success(&format!("Access granted to {}", record.name));
                let size = u64::try_from(record.size).unwrap_or_default();
                output::print_kv("Total size", &format_size_mb(size));
            }
            if let Some(notice) = page.expiry_notice(Utc::now()) {
                output::print_kv("Expiry", &notice);
            }
            output::print_list(&FileRow::from_items(&page.files()), OutputFormat::Table);
        }
        AccessState::PasswordRequired { error: None } => {
            output::print_warning("This file is password protected; pass --password to open it");
        }
        // The returned error reports the rest.
        _ => {}
    }
}
