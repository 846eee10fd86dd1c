//! Upload files and issue a share link.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tokio::sync::watch;

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;
use dropshare_core::types::ExpiryChoice;
use dropshare_entity::share::{ShareLink, format_size_mb};
use dropshare_service::{
    LinkService, PendingFile, UploadDraft, UploadPolicy, UploadProgress, UploadService,
};

use crate::output::{self, OutputFormat};

/// Arguments for the share command
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Files to share, in link order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Password visitors must enter
    #[arg(short, long, conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Prompt for the password instead of passing it as an argument
    #[arg(long)]
    pub ask_password: bool,

    /// Link lifetime in days: 1, 3 or 7 (defaults to `share.default_expiry_days`)
    #[arg(short = 'x', long)]
    pub expiry: Option<u32>,
}

/// Execute the share command
pub async fn execute(
    args: &ShareArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let expiry = ExpiryChoice::try_from(args.expiry.unwrap_or(config.share.default_expiry_days))?;

    let mut draft = UploadDraft::with_expiry(expiry);
    for path in &args.files {
        draft.add(PendingFile::from_path(path).await?);
    }
    if let Some(password) = read_password(args)? {
        draft.set_password(password);
    }

    let (storage, store) = super::connect_backends(config).await?;
    let service = UploadService::new(
        storage,
        store,
        Arc::new(LinkService::from_config(&config.share)),
        UploadPolicy::from_config(&config.storage, &config.share),
    );

    let link = loop {
        match generate(&service, draft).await {
            Ok(link) => break link,
            Err(failure) => {
                output::print_error(&format!("Link generation failed: {}", failure.error));
                if !confirm_retry()? {
                    return Err(failure.error);
                }
                draft = failure.draft;
            }
        }
    };

    print_link(&link, format);
    Ok(())
}

/// Run one generation attempt, reporting progress on stderr.
async fn generate(
    service: &UploadService,
    draft: UploadDraft,
) -> Result<ShareLink, dropshare_service::UploadFailure> {
    let total = draft.len();
    let bytes = draft.total_size();
    let (tx, mut rx) = watch::channel(UploadProgress::start(total));

    let reporter = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let progress = *rx.borrow_and_update();
            eprintln!(
                "  Uploaded {}/{} ({:.0}%)",
                progress.completed,
                progress.total,
                progress.fraction() * 100.0
            );
        }
    });

    eprintln!("Uploading {total} file(s), {}", format_size_mb(bytes));
    let result = service.generate_with_progress(draft, &tx).await;
    drop(tx);
    let _ = reporter.await;
    result
}

fn read_password(args: &ShareArgs) -> Result<Option<String>, AppError> {
    if !args.ask_password {
        return Ok(args.password.clone());
    }
    dialoguer::Password::new()
        .with_prompt("Link password (empty for none)")
        .allow_empty_password(true)
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()
        .map(Some)
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))
}

fn confirm_retry() -> Result<bool, AppError> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    dialoguer::Confirm::new()
        .with_prompt("Retry with the same files?")
        .default(true)
        .interact()
        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))
}

fn print_link(link: &ShareLink, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(link),
        OutputFormat::Table => {
            output::print_success("Share link generated");
            output::print_kv("Link", &link.url);
            output::print_kv("Name", &link.name);
            output::print_kv("Files", &link.file_count.to_string());
            output::print_kv(
                "Password",
                if link.is_password_protected { "yes" } else { "no" },
            );
            output::print_kv(
                "Expires",
                &format!(
                    "{} ({})",
                    link.expires_at.format("%Y-%m-%d %H:%M UTC"),
                    link.expiry_choice.label()
                ),
            );
        }
    }
}
