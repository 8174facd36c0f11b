//! CLI command implementations
//!
//! Commands return a process exit code: 0 on success, 2 for configuration
//! errors, 5 for fatal errors.

pub mod analyze;
pub mod anonymize;
pub mod init;
pub mod validate;

use crate::anonymization::AnonymizationEngine;
use crate::config::{load_config_or_default, parse_entity_list, RecognitionMode};
use crate::domain::EntityType;
use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::Path;
use zeroize::Zeroizing;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Detection options shared by `anonymize` and `analyze`
#[derive(Args, Debug, Default)]
pub struct DetectionArgs {
    /// Comma-separated entity types to detect (default: configured set)
    #[arg(short, long)]
    pub entities: Option<String>,

    /// Recognition mode override (fast, balanced, accurate)
    #[arg(short, long)]
    pub mode: Option<RecognitionMode>,
}

/// Engine plus the per-call entity selection
pub struct PreparedEngine {
    pub engine: AnonymizationEngine,
    pub entities: Option<Vec<EntityType>>,
}

impl DetectionArgs {
    /// Load configuration, apply overrides and initialize the engine
    ///
    /// Errors are configuration errors, already formatted for the user.
    pub fn prepare(&self, config_path: &str) -> Result<PreparedEngine, String> {
        let mut config = load_config_or_default(config_path).map_err(|e| e.to_string())?;
        if let Some(mode) = self.mode {
            config.anonymization.recognition_mode = mode;
        }

        let entities = self
            .entities
            .as_deref()
            .map(parse_entity_list)
            .transpose()
            .map_err(|e| e.to_string())?;

        let engine = AnonymizationEngine::initialize(&config).map_err(|e| e.to_string())?;
        for warning in engine.initialization_warnings() {
            eprintln!("⚠️  {warning}");
        }

        Ok(PreparedEngine { engine, entities })
    }
}

/// Read the whole input from a file, or stdin when no path is given
///
/// The buffer is wiped when dropped.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<Zeroizing<String>> {
    let mut buffer = Zeroizing::new(String::new());
    match path {
        Some(path) => {
            let mut file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            file.read_to_string(&mut buffer)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
        }
    }
    Ok(buffer)
}
