//! Detected entity spans

use super::entity::EntityType;
use serde::{Deserialize, Serialize};

/// A detected, not yet finalized entity span
///
/// Offsets are byte offsets into the analyzed text, half-open (`start..end`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Entity category
    pub entity_type: EntityType,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Matched substring of the analyzed text
    #[serde(skip_serializing, default)]
    pub matched_text: String,
    /// Identifier of the rule or provider that produced the span
    pub rule_id: String,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(
        entity_type: EntityType,
        start: usize,
        end: usize,
        confidence: f32,
        matched_text: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            entity_type,
            start,
            end,
            confidence: confidence.clamp(0.0, 1.0),
            matched_text: matched_text.into(),
            rule_id: rule_id.into(),
        }
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two half-open spans share at least one byte
    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}
