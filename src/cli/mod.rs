//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Anonymify using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Anonymify - PII redaction for German legal text
#[derive(Parser, Debug)]
#[command(name = "anonymify")]
#[command(version, about, long_about = None)]
#[command(author = "Anonymify Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "anonymify.toml", env = "ANONYMIFY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ANONYMIFY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact PII from a file or stdin
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Report what would be redacted, without the original values
    Analyze(commands::analyze::AnalyzeArgs),

    /// Validate configuration file and rule catalog
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecognitionMode;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["anonymify", "anonymize"]);
        assert_eq!(cli.config, "anonymify.toml");
        assert!(matches!(cli.command, Commands::Anonymize(_)));
    }

    #[test]
    fn test_cli_parse_anonymize_options() {
        let cli = Cli::parse_from([
            "anonymify",
            "anonymize",
            "--input",
            "brief.txt",
            "--entities",
            "PERSON,PHONE",
            "--mode",
            "balanced",
        ]);
        let Commands::Anonymize(args) = cli.command else {
            panic!("expected anonymize");
        };
        assert_eq!(args.input.as_deref(), Some(std::path::Path::new("brief.txt")));
        assert_eq!(args.detection.entities.as_deref(), Some("PERSON,PHONE"));
        assert_eq!(args.detection.mode, Some(RecognitionMode::Balanced));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["anonymify", "anonymize", "--mode", "turbo"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["anonymify", "--config", "custom.toml", "analyze"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["anonymify", "--log-level", "debug", "analyze"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["anonymify", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["anonymify", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
