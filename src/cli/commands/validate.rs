//! Validate config command implementation
//!
//! Loads the configuration strictly, compiles the rule catalog and reports
//! what the engine would run with.

use super::EXIT_CONFIG_ERROR;
use crate::anonymization::AnonymizationEngine;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let engine = match AnonymizationEngine::initialize(&config) {
            Ok(engine) => {
                println!("✅ Rule catalog compiled");
                engine
            }
            Err(e) => {
                println!("❌ Engine initialization failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let settings = &config.anonymization;
        let thresholds = engine.thresholds();
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Recognition Mode: {} (effective: {})",
            settings.recognition_mode,
            engine.recognition_mode()
        );
        println!("  Provider: {}", engine.provider_name());
        println!("  Person Threshold: {:.2}", thresholds.person);
        println!("  Other Threshold: {:.2}", thresholds.other);
        println!("  Pattern Timeout: {} ms", settings.pattern_timeout_ms);
        println!(
            "  Rule Catalog: {} ({} rules)",
            settings
                .pattern_library
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
            engine.rule_count()
        );
        let entities: Vec<&str> = engine.default_entities().iter().map(|e| e.label()).collect();
        println!("  Enabled Entities: {}", entities.join(", "));
        println!("  Whitelist Terms: {}", engine.whitelist_len());
        println!(
            "  Line Break Normalization: {}",
            if settings.normalize_line_breaks { "on" } else { "off" }
        );
        if config.audit.enabled {
            println!("  Audit Log: {}", config.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }

        for warning in engine.initialization_warnings() {
            println!("⚠️  {warning}");
        }
        println!();

        Ok(0)
    }
}
