//! Download the files of a share link into a directory.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;
use dropshare_service::{BatchReport, DirectorySink, DownloadSelection, DownloadService};

use crate::output;

/// Arguments for the fetch command
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Share link or bare share id
    pub link: String,

    /// Directory to save into
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Only fetch these file numbers (as listed by `open`); repeatable
    #[arg(long)]
    pub only: Vec<usize>,

    /// Password for a protected share; prompted for when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the fetch command
pub async fn execute(args: &FetchArgs, config: &AppConfig) -> Result<(), AppError> {
    let (storage, store) = super::connect_backends(config).await?;
    let access = dropshare_service::AccessService::new(store);
    let page = super::unlock(&access, &args.link, args.password.as_deref()).await?;
    page.require_granted()?;

    let selection = select(page.selection(), &args.only)?;
    let sink = DirectorySink::create(&args.out).await?;
    let downloads = DownloadService::new(
        storage,
        Duration::from_millis(config.share.batch_download_delay_ms),
    );

    let report = downloads.download_selected(&page, &selection, &sink).await?;
    print_report(&report, &sink);

    if report.is_complete() {
        Ok(())
    } else {
        Err(AppError::storage(format!(
            "{} of {} files could not be downloaded",
            report.failed.len(),
            report.failed.len() + report.saved.len()
        )))
    }
}

/// Everything when `only` is empty, otherwise exactly the listed numbers.
fn select(mut selection: DownloadSelection, only: &[usize]) -> Result<DownloadSelection, AppError> {
    if only.is_empty() {
        selection.toggle_all();
        return Ok(selection);
    }
    for &index in only {
        if index >= selection.len() {
            return Err(AppError::validation(format!(
                "No file number {index}; this share has {} file(s)",
                selection.len()
            )));
        }
        selection.select(index);
    }
    Ok(selection)
}

fn print_report(report: &BatchReport, sink: &DirectorySink) {
    for name in &report.saved {
        output::print_success(name);
    }
    for failure in &report.failed {
        output::print_error(&format!(
            "#{} {}: {}",
            failure.index, failure.name, failure.error
        ));
    }
    output::print_kv("Saved to", &sink.dir().display().to_string());
}
