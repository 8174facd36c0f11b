//! Analysis reporting
//!
//! Summarizes what a call would redact: spans with their entity type,
//! offsets, confidence, rule and replacement, plus any recoverable warnings.
//! Original values are never included.

use crate::anonymization::models::{AnonymizationOutcome, MaskedSpan};
use crate::config::RecognitionMode;
use crate::domain::{EntityType, RecoverableError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Analysis report for one input
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub recognition_mode: RecognitionMode,
    pub input_length: usize,
    pub output_length: usize,
    pub total_spans: usize,
    pub spans_by_type: BTreeMap<EntityType, usize>,
    pub spans: Vec<MaskedSpan>,
    pub warnings: Vec<RecoverableError>,
    pub normalized: bool,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn from_outcome(outcome: &AnonymizationOutcome) -> Self {
        Self {
            recognition_mode: outcome.recognition_mode,
            input_length: outcome.input_length,
            output_length: outcome.text.len(),
            total_spans: outcome.spans.len(),
            spans_by_type: outcome.counts_by_type(),
            spans: outcome.spans.clone(),
            warnings: outcome.warnings.clone(),
            normalized: outcome.normalized,
            processing_time_ms: outcome.processing_time_ms,
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION ANALYSIS                     \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n\n");

        output.push_str("SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        let _ = writeln!(output, "  Recognition Mode:     {}", self.recognition_mode);
        let _ = writeln!(output, "  Input Length:         {} bytes", self.input_length);
        let _ = writeln!(output, "  Output Length:        {} bytes", self.output_length);
        let _ = writeln!(output, "  Spans Redacted:       {}", self.total_spans);
        let _ = writeln!(
            output,
            "  Line Breaks Rejoined: {}",
            if self.normalized { "yes" } else { "no" }
        );
        let _ = writeln!(output, "  Processing Time:      {} ms", self.processing_time_ms);
        output.push('\n');

        if !self.spans_by_type.is_empty() {
            output.push_str("SPANS BY ENTITY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            let mut counts: Vec<_> = self.spans_by_type.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (entity_type, count) in counts {
                let _ = writeln!(output, "  {:30} {:>5}", entity_type.label(), count);
            }
            output.push('\n');
        }

        if !self.spans.is_empty() {
            output.push_str("SPANS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for span in &self.spans {
                let _ = writeln!(
                    output,
                    "  {:>6}..{:<6} {:20} {:>5.2}  {:28} -> {}",
                    span.start,
                    span.end,
                    span.entity_type.label(),
                    span.confidence,
                    span.rule_id,
                    span.replacement
                );
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                let _ = writeln!(output, "  • {warning}");
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
