//! Command-line interface definitions using clap
//!
//! Without a subcommand the binary starts the web server.

use clap::{Parser, Subcommand};

/// OpenOversight - law enforcement accountability database
#[derive(Parser)]
#[command(name = "openoversight")]
#[command(version)]
#[command(about = "A public database of law enforcement officers", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve,

    /// Create a confirmed administrator account
    MakeAdmin {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },

    /// Load the demo departments, officers, images and users into an empty database
    SeedDemo,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_make_admin() {
        let cli = Cli::parse_from([
            "openoversight",
            "--config",
            "oo.toml",
            "make-admin",
            "--username",
            "root",
            "--email",
            "root@example.org",
            "--stdin",
        ]);
        assert_eq!(cli.config.as_deref(), Some("oo.toml"));
        match cli.command {
            Some(Commands::MakeAdmin {
                username, stdin, ..
            }) => {
                assert_eq!(username, "root");
                assert!(stdin);
            }
            _ => panic!("expected make-admin"),
        }
    }

    #[test]
    fn test_no_subcommand_means_server() {
        let cli = Cli::parse_from(["openoversight"]);
        assert!(cli.command.is_none());
    }
}
