//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "anonymify.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Anonymify configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Add firm-specific names to [whitelist].custom");
                println!(
                    "  3. Validate configuration: anonymify --config {} validate-config",
                    self.output
                );
                println!("  4. Redact a document: anonymify anonymize -i brief.txt -o brief.redacted.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Anonymify Configuration File
# PII redaction for German legal text

[application]
log_level = "info"

[anonymization]
recognition_mode = "fast"
person_score_threshold = 0.7
other_score_threshold = 0.6
pattern_timeout_ms = 250
normalize_line_breaks = true

[whitelist]
custom = []

[audit]
enabled = false
log_path = "./audit/anonymify.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Anonymify Configuration File
# PII redaction for German legal text
#
# This file contains all configuration options with examples and explanations.
# Every value can be overridden with an ANONYMIFY_* environment variable,
# e.g. ANONYMIFY_RECOGNITION_MODE or ANONYMIFY_AUDIT_ENABLED.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Anonymization Settings
# ============================================================================
[anonymization]
# Recognition mode: "fast", "balanced" or "accurate"
# - fast: pattern rules only
# - balanced / accurate: pattern rules plus the name lexicon at model_path
#   (falls back to fast with a warning when the lexicon cannot be loaded)
recognition_mode = "fast"

# Minimum confidence for PERSON spans (0.0-1.0)
person_score_threshold = 0.7

# Minimum confidence for every other entity type (0.0-1.0)
other_score_threshold = 0.6

# Entity types to detect when a call does not choose (omit = all types)
# enabled_entities = ["PERSON", "EMAIL", "PHONE", "IBAN", "DATE", "CASE_NUMBER"]

# Custom rule catalog replacing the built-in one
# pattern_library = "./patterns/custom_rules.toml"

# Given-name lexicon, one name per line (balanced / accurate modes)
# model_path = "./models/vornamen.txt"

# Per-rule time budget in milliseconds
pattern_timeout_ms = 250

# Rejoin names split across line breaks before recognition
normalize_line_breaks = true

# ============================================================================
# Whitelist
# ============================================================================
# Terms that are never redacted. Matching is case-insensitive.
[whitelist]
court_terms = ["Gericht", "Richter", "Staatsanwaltschaft", "Amtsgericht", "Landgericht", "Oberlandesgericht", "Bundesgerichtshof"]
authorities = ["Finanzamt", "Polizei", "Bundesamt", "Krankenkasse"]
professions = ["Rechtsanwalt", "Notar", "Steuerberater", "Arzt"]
organizations = ["Deutsche Bank", "Sparkasse", "AOK", "TÜV"]
common_words = ["Der", "Die", "Das", "Im", "Am", "Zum", "Zur", "Vom", "Bei", "Mit", "Durch"]
custom = []

# ============================================================================
# Audit Log
# ============================================================================
# One entry per call with entity types, offsets and rule ids.
# Original values and replacements are never written.
[audit]
enabled = false
log_path = "./audit/anonymify.log"

# JSON lines (true) or plain text (false)
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (hourly or daily)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnonymifyConfig;
    use tempfile::tempdir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: AnonymifyConfig = toml::from_str(&content).unwrap();
            config.validate().unwrap();
            assert_eq!(config, AnonymifyConfig::default());
        }
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anonymify.toml");
        fs::write(&path, "# existing").unwrap();

        let mut args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        args.force = true;
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[anonymization]"));
    }

    #[test]
    fn test_init_unwritable_path_is_fatal() {
        let dir = tempdir().unwrap();
        let args = InitArgs {
            output: dir
                .path()
                .join("missing")
                .join("anonymify.toml")
                .to_string_lossy()
                .to_string(),
            with_examples: true,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 5);
    }
}
