//! CLI command definitions and dispatch.

pub mod config;
pub mod fetch;
pub mod migrate;
pub mod open;
pub mod serve;
pub mod share;

use std::io::IsTerminal;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use dropshare_core::config::{AppConfig, DatabaseProvider, StorageProviderKind};
use dropshare_core::error::AppError;
use dropshare_core::traits::ObjectStorage;
use dropshare_database::{DynShareStore, open_share_store};
use dropshare_service::{AccessPage, AccessService, AccessState};

use crate::output::{self, OutputFormat};

/// DropShare: password-protected, expiring file links
#[derive(Debug, Parser)]
#[command(name = "dropshare", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, without extension
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded next to the base file
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations
    Migrate,
    /// Upload files and print a share link
    Share(share::ShareArgs),
    /// Show what a share link offers
    Open(open::OpenArgs),
    /// Download the files of a share link
    Fetch(fetch::FetchArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self.command {
            Commands::Serve | Commands::Migrate => "info",
            _ => "warn",
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve => serve::execute(config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Share(args) => share::execute(args, &config, self.format).await,
            Commands::Open(args) => open::execute(args, &config, self.format).await,
            Commands::Fetch(args) => fetch::execute(args, &config).await,
            Commands::Config(args) => config::execute(args, config, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from(self.config.trim_end_matches(".toml"), &self.env)
    }
}

/// Connect both backends, warning when they cannot outlive the process.
pub async fn connect_backends(
    config: &AppConfig,
) -> Result<(Arc<dyn ObjectStorage>, DynShareStore), AppError> {
    if config.database.provider == DatabaseProvider::Memory
        || config.storage.provider == StorageProviderKind::Memory
    {
        output::print_warning(
            "In-memory backends are configured; shares vanish when this command exits",
        );
    }
    let storage = dropshare_storage::connect(&config.storage).await?;
    let store = open_share_store(&config.database).await?;
    Ok((storage, store))
}

/// Open a link and get past the password gate.
///
/// A given password is submitted once. Without one, an interactive
/// terminal is prompted until the password matches.
pub async fn unlock(
    access: &AccessService,
    link: &str,
    password: Option<&str>,
) -> Result<AccessPage, AppError> {
    let mut page = access.open(&share_id_from_link(link)).await;

    if let AccessState::PasswordRequired { .. } = page.state() {
        match password {
            Some(password) => {
                page.submit_password(password);
            }
            None if std::io::stdin().is_terminal() => {
                while let AccessState::PasswordRequired { error } = page.state() {
                    if let Some(error) = error {
                        output::print_error(error);
                    }
                    let candidate = dialoguer::Password::new()
                        .with_prompt("Password")
                        .interact()
                        .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
                    page.submit_password(&candidate);
                }
            }
            None => {}
        }
    }

    Ok(page)
}

/// Accept either a bare id or a full link and return the id.
pub fn share_id_from_link(link: &str) -> String {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_id_from_link() {
        let id = "3f2b8f8e-8d7a-4f0e-9a43-2f4e5f8f6c11";
        assert_eq!(share_id_from_link(id), id);
        assert_eq!(
            share_id_from_link(&format!("https://drop.example/file/{id}")),
            id
        );
        assert_eq!(
            share_id_from_link(&format!("https://drop.example/file/{id}/?ref=mail")),
            id
        );
    }

    #[test]
    fn test_cli_parses_fetch() {
        let cli = Cli::parse_from([
            "dropshare", "fetch", "abc", "--out", "downloads", "--only", "0", "--only", "2",
        ]);
        match cli.command {
            Commands::Fetch(args) => assert_eq!(args.only, vec![0, 2]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
