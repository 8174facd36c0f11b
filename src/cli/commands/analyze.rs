//! Analyze command implementation
//!
//! Runs the pipeline and prints an [`AnalysisReport`] instead of the
//! redacted text.

use super::{read_input, DetectionArgs, EXIT_CONFIG_ERROR};
use crate::anonymization::AnalysisReport;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

impl AnalyzeArgs {
    /// Execute the analyze command
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
        let report = AnalysisReport::from_outcome(&outcome);

        if self.json {
            println!("{}", report.format_json()?);
        } else {
            print!("{}", report.format_console());
        }

        Ok(0)
    }
}
