//! Mode routing
//!
//! The web server runs when no subcommand (or `serve`) is given; every other
//! subcommand is a one-shot management command.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli,
    Unknown,
}

pub fn detect_mode(command: Option<&Commands>) -> Mode {
    #[cfg(feature = "cli")]
    if let Some(cmd) = command
        && !matches!(cmd, Commands::Serve)
    {
        return Mode::Cli;
    }

    #[cfg(feature = "server")]
    return Mode::Server;

    #[cfg(not(feature = "server"))]
    {
        let _ = command;
        Mode::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode(None), Mode::Server);
        assert_eq!(detect_mode(Some(&Commands::Serve)), Mode::Server);
        assert_eq!(detect_mode(Some(&Commands::SeedDemo)), Mode::Cli);
    }
}
