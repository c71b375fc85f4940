//! CLI interface module
//!
//! Management commands that talk to the database directly.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::OversightError;
use crate::storage::StorageFactory;
use crate::utils::password::PasswordHasher;
use commands::{config_generate, make_admin, seed_demo};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<OversightError> for CliError {
    fn from(err: OversightError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a management command from clap-parsed input
pub async fn run_cli_command(config: Arc<StaticConfig>, cmd: Commands) -> Result<(), CliError> {
    // Generate doesn't need DB connection
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let storage = StorageFactory::create(&config.database)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;
    let hasher = PasswordHasher::from_config(&config.auth)
        .map_err(|e| CliError::ParseError(e.to_string()))?;

    match cmd {
        Commands::MakeAdmin {
            username,
            email,
            password,
            stdin,
        } => make_admin(&storage, &hasher, username, email, password, stdin).await,
        Commands::SeedDemo => seed_demo(&storage, &hasher).await,
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "not a management command".to_string(),
        )),
    }
}
