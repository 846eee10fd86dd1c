//! Configuration inspection commands.

use clap::{Args, Subcommand};

use dropshare_core::config::AppConfig;
use dropshare_core::error::AppError;
use dropshare_database::mask_password;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the effective configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redact(config);
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => print_summary(&config),
            }
        }
        ConfigCommand::Validate => match config.validate() {
            Ok(()) => {
                output::print_success("Configuration is valid");
                print_summary(&redact(config));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Hide credentials before anything is printed.
fn redact(mut config: AppConfig) -> AppConfig {
    config.database.url = mask_password(&config.database.url);
    if !config.storage.s3.secret_key.is_empty() {
        config.storage.s3.secret_key = "****".to_string();
    }
    config
}

fn print_summary(config: &AppConfig) {
    output::print_kv("Server", &config.server.bind_addr());
    output::print_kv("Database", &format!("{:?}", config.database.provider));
    if !config.database.url.is_empty() {
        output::print_kv("Database URL", &config.database.url);
    }
    output::print_kv(
        "Storage",
        &format!("{:?} (bucket {})", config.storage.provider, config.storage.bucket),
    );
    output::print_kv("Link origin", &config.share.public_origin);
    output::print_kv(
        "Default expiry",
        &format!("{} days", config.share.default_expiry_days),
    );
    output::print_kv("Logging", &format!("{} ({})", config.logging.level, config.logging.format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_secrets() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://share:hunter2@db/dropshare".into();
        config.storage.s3.secret_key = "abc".into();

        let config = redact(config);
        assert!(!config.database.url.contains("hunter2"));
        assert_eq!(config.storage.s3.secret_key, "****");
    }
}
