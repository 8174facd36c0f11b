//! Anonymization result models

use crate::config::RecognitionMode;
use crate::domain::{Candidate, EntityType, RecoverableError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One redacted span of the analyzed text
///
/// Carries the replacement, never the original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskedSpan {
    pub entity_type: EntityType,
    /// Start byte offset in the analyzed (normalized) text
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    pub confidence: f32,
    pub rule_id: String,
    pub replacement: String,
}

impl MaskedSpan {
    pub fn from_candidate(candidate: &Candidate, replacement: String) -> Self {
        Self {
            entity_type: candidate.entity_type,
            start: candidate.start,
            end: candidate.end,
            confidence: candidate.confidence,
            rule_id: candidate.rule_id.clone(),
            replacement,
        }
    }
}

/// Full result of one anonymization call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationOutcome {
    /// Redacted text
    pub text: String,
    /// Applied spans, ordered by start
    pub spans: Vec<MaskedSpan>,
    /// Recoverable issues encountered during the call
    #[serde(skip_deserializing)]
    pub warnings: Vec<RecoverableError>,
    /// Whether line-break normalization changed the input
    pub normalized: bool,
    /// Mode in effect for the call
    pub recognition_mode: RecognitionMode,
    /// Byte length of the input
    pub input_length: usize,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl AnonymizationOutcome {
    /// Outcome of a call that had nothing to analyze
    pub fn unchanged(text: &str, recognition_mode: RecognitionMode) -> Self {
        Self {
            text: text.to_string(),
            spans: Vec::new(),
            warnings: Vec::new(),
            normalized: false,
            recognition_mode,
            input_length: text.len(),
            processing_time_ms: 0,
            timestamp: Utc::now(),
        }
    }

    /// Span counts per entity type
    pub fn counts_by_type(&self) -> BTreeMap<EntityType, usize> {
        let mut counts = BTreeMap::new();
        for span in &self.spans {
            *counts.entry(span.entity_type).or_insert(0) += 1;
        }
        counts
    }
}
