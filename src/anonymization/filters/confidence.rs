//! Per-category confidence thresholds
//!
//! A candidate survives when its confidence is greater than or equal to the
//! threshold of its category: the person threshold for [`EntityType::Person`],
//! the shared threshold for every other type.

use crate::config::AnonymizationSettings;
use crate::domain::{Candidate, EntityType, ThresholdCategory};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    pub person: f32,
    pub other: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            person: 0.7,
            other: 0.6,
        }
    }
}

impl ConfidenceThresholds {
    pub fn new(person: f32, other: f32) -> Self {
        Self { person, other }
    }

    pub fn from_settings(settings: &AnonymizationSettings) -> Self {
        Self::new(settings.person_score_threshold, settings.other_score_threshold)
    }

    pub fn threshold_for(&self, entity_type: EntityType) -> f32 {
        match entity_type.threshold_category() {
            ThresholdCategory::Person => self.person,
            ThresholdCategory::Other => self.other,
        }
    }

    pub fn accepts(&self, candidate: &Candidate) -> bool {
        candidate.confidence >= self.threshold_for(candidate.entity_type)
    }

    /// Drop candidates below their category threshold, preserving order
    pub fn filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| self.accepts(candidate))
            .collect()
    }
}
