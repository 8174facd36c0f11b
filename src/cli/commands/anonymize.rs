//! Anonymize command implementation
//!
//! Reads text from a file or stdin and writes the redacted text to a file
//! or stdout. Diagnostics go to stderr.

use super::{read_input, DetectionArgs, EXIT_CONFIG_ERROR};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let prepared = match self.detection.prepare(config_path) {
            Ok(prepared) => prepared,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let input = read_input(self.input.as_deref())?;
        let outcome = prepared
            .engine
            .anonymize_detailed(&input, prepared.entities.as_deref());

        match &self.output {
            Some(path) => std::fs::write(path, &outcome.text)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(outcome.text.as_bytes())?;
                stdout.flush()?;
            }
        }

        for warning in &outcome.warnings {
            eprintln!("⚠️  {warning}");
        }
        tracing::info!(
            spans = outcome.spans.len(),
            warnings = outcome.warnings.len(),
            duration_ms = outcome.processing_time_ms,
            "Anonymization finished"
        );

        Ok(0)
    }
}
