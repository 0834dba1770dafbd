//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Glossa using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Glossa - Tongue-scan health estimates
#[derive(Parser, Debug)]
#[command(name = "glossa")]
#[command(version, about, long_about = None)]
#[command(author = "Glossa Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "glossa.toml", env = "GLOSSA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GLOSSA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture a tongue image, analyze it and record the report
    Scan(commands::scan::ScanArgs),

    /// List past reports, most recent first
    History(commands::history::HistoryArgs),

    /// Show one past report
    Show(commands::show::ShowArgs),

    /// Delete one past report
    Delete(commands::delete::DeleteArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FacingMode, Language};

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["glossa", "scan"]);
        assert_eq!(cli.config, "glossa.toml");
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn test_cli_parse_scan_overrides() {
        let cli = Cli::parse_from([
            "glossa",
            "scan",
            "--image",
            "tongue.jpg",
            "--facing",
            "back",
            "--language",
            "en",
            "--dry-run",
        ]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(args.image.as_deref(), Some(std::path::Path::new("tongue.jpg")));
        assert_eq!(args.facing, Some(FacingMode::Back));
        assert_eq!(args.language, Some(Language::En));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["glossa", "--config", "custom.toml", "history"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::History(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["glossa", "--log-level", "debug", "history"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_show_share() {
        let cli = Cli::parse_from(["glossa", "show", "abc", "--share"]);
        let Commands::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.id, "abc");
        assert!(args.share);
    }

    #[test]
    fn test_cli_parse_delete() {
        let cli = Cli::parse_from(["glossa", "delete", "abc"]);
        assert!(matches!(cli.command, Commands::Delete(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["glossa", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["glossa", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
