//! CLI mode

use std::sync::Arc;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::interfaces::cli::{CliError, run_cli_command};

pub async fn run_cli(config: Arc<StaticConfig>, cmd: Commands) -> Result<(), CliError> {
    run_cli_command(config, cmd).await
}
