use clap::Parser;
use tracing::error;

use openoversight::cli::Cli;
use openoversight::config::{get_config, init_config};
use openoversight::runtime::modes::{self, Mode};
use openoversight::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    match modes::detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "cli")]
        Mode::Cli => {
            let Some(cmd) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(config, cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        #[cfg(feature = "server")]
        Mode::Server => {
            // 日志 guard 必须存活到进程结束
            let _guard = init_logging(&config.logging)?;
            if let Err(e) = modes::run_server().await {
                error!("Server exited with error: {:#}", e);
                return Err(e);
            }
            Ok(())
        }
        Mode::Unknown => {
            eprintln!("No execution mode enabled; build with the `server` feature");
            std::process::exit(2);
        }
    }
}
