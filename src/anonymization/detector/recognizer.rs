//! Recognizer engine
//!
//! Runs every enabled pattern rule, then the statistical provider, and
//! returns the raw candidate list in that order.
//!
//! Each rule runs under a match budget: a wall-clock deadline checked
//! between matches plus the regex backtrack limit. A rule that exhausts
//! either contributes no candidates for the call (partial results are
//! dropped) and a [`RecoverableError::PatternTimeout`] is recorded. Other
//! rules are unaffected.

use super::patterns::{CompiledRule, PatternRuleSet};
use super::statistical::PatternOnlyProvider;
use super::EntityProvider;
use crate::domain::{Candidate, EntityType, RecoverableError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Raw recognition output for one call
#[derive(Debug, Clone, Default)]
pub struct Recognition {
    pub candidates: Vec<Candidate>,
    pub warnings: Vec<RecoverableError>,
}

/// Pattern and provider front end of the pipeline
#[derive(Clone)]
pub struct RecognizerEngine {
    rules: Arc<PatternRuleSet>,
    provider: Arc<dyn EntityProvider>,
    rule_timeout: Duration,
}

impl RecognizerEngine {
    pub fn new(
        rules: Arc<PatternRuleSet>,
        provider: Arc<dyn EntityProvider>,
        rule_timeout: Duration,
    ) -> Self {
        Self {
            rules,
            provider,
            rule_timeout,
        }
    }

    /// Pattern rules only, no statistical provider
    pub fn pattern_only(rules: Arc<PatternRuleSet>, rule_timeout: Duration) -> Self {
        Self::new(rules, Arc::new(PatternOnlyProvider), rule_timeout)
    }

    pub fn rules(&self) -> &PatternRuleSet {
        &self.rules
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Detect candidates of the enabled types
    ///
    /// An empty `enabled` slice yields no candidates.
    pub fn analyze(&self, text: &str, enabled: &[EntityType]) -> Recognition {
        let mut recognition = Recognition::default();
        if text.is_empty() || enabled.is_empty() {
            return recognition;
        }

        for rule in self
            .rules
            .rules()
            .iter()
            .filter(|rule| enabled.contains(&rule.entity_type))
        {
            match self.run_rule(rule, text) {
                Ok(mut found) => recognition.candidates.append(&mut found),
                Err(warning) => {
                    crate::log_recoverable!(&warning);
                    recognition.warnings.push(warning);
                }
            }
        }

        let provider_found = self.provider.detect(text);
        let before = provider_found.len();
        recognition.candidates.extend(
            provider_found
                .into_iter()
                .filter(|c| enabled.contains(&c.entity_type))
                .filter(|c| is_valid_span(text, c)),
        );
        tracing::trace!(
            provider = self.provider.name(),
            reported = before,
            total_candidates = recognition.candidates.len(),
            "Recognition finished"
        );

        recognition
    }

    fn run_rule(
        &self,
        rule: &CompiledRule,
        text: &str,
    ) -> std::result::Result<Vec<Candidate>, RecoverableError> {
        let started = Instant::now();
        let mut found = Vec::new();

        for result in rule.regex.find_iter(text) {
            let elapsed = started.elapsed();
            let m = match result {
                Ok(m) if elapsed < self.rule_timeout => m,
                // Backtrack limit exhausted, or the deadline passed.
                _ => return Err(timeout(rule, elapsed)),
            };
            if m.start() == m.end() {
                continue;
            }
            found.push(Candidate::new(
                rule.entity_type,
                m.start(),
                m.end(),
                rule.base_confidence,
                m.as_str(),
                rule.id.as_str(),
            ));
        }

        let elapsed = started.elapsed();
        if elapsed >= self.rule_timeout && !found.is_empty() {
            return Err(timeout(rule, elapsed));
        }
        Ok(found)
    }
}

impl std::fmt::Debug for RecognizerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognizerEngine")
            .field("rules", &self.rules.len())
            .field("provider", &self.provider.name())
            .field("rule_timeout", &self.rule_timeout)
            .finish()
    }
}

fn timeout(rule: &CompiledRule, elapsed: Duration) -> RecoverableError {
    RecoverableError::PatternTimeout {
        rule_id: rule.id.clone(),
        entity_type: rule.entity_type,
        elapsed_ms: elapsed.as_millis() as u64,
    }
}

fn is_valid_span(text: &str, candidate: &Candidate) -> bool {
    let valid = candidate.start < candidate.end
        && candidate.end <= text.len()
        && text.is_char_boundary(candidate.start)
        && text.is_char_boundary(candidate.end);
    if !valid {
        tracing::warn!(
            entity_type = %candidate.entity_type,
            rule_id = %candidate.rule_id,
            start = candidate.start,
            end = candidate.end,
            "Discarding provider span outside the analyzed text"
        );
    }
    valid
}
