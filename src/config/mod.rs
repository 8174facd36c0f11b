//! Configuration management for Anonymify.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `ANONYMIFY_*`
//! environment overrides and validation. Every section has defaults, so the
//! pipeline runs without any file.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! recognition_mode = "fast"
//! person_score_threshold = 0.7
//! other_score_threshold = 0.6
//! pattern_timeout_ms = 250
//!
//! [whitelist]
//! custom = ["Mustermann GmbH"]
//!
//! [audit]
//! enabled = true
//! log_path = "./audit/anonymify.log"
//! ```
//!
//! ```rust,no_run
//! use anonymify::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("anonymify.toml")?;
//! println!("Mode: {}", config.anonymization.recognition_mode);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, parse_entity_list};
pub use schema::{
    AnonymifyConfig, AnonymizationSettings, ApplicationConfig, AuditConfig, LoggingConfig,
    RecognitionMode, WhitelistConfig,
};
