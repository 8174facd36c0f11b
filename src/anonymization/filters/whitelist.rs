//! Whitelist filter
//!
//! Removes candidates that name institutions, professions or other terms
//! that must stay readable. Matching is case-insensitive.
//!
//! | Policy          | Types                                   | Dropped when                   |
//! |-----------------|-----------------------------------------|--------------------------------|
//! | `Eligible`      | person, location, street address        | text equals or contains a term |
//! | `ExactOnly`     | date, case number, property, parcel     | text equals a term             |
//! | `AlwaysBypass`  | everything else                         | never                          |
//!
//! Containment is whole-word: the term must not be flanked by letters or
//! digits, so "Am" never suppresses "Amalie Krause".

use crate::config::WhitelistConfig;
use crate::domain::{Candidate, WhitelistPolicy};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhitelistSet {
    terms: BTreeSet<String>,
}

impl WhitelistSet {
    /// Build from arbitrary terms; blank terms are ignored
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Union of all configured term groups
    pub fn from_config(config: &WhitelistConfig) -> Self {
        Self::new(config.all_terms())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Case-insensitive equality with a term
    pub fn contains_exact(&self, text: &str) -> bool {
        self.terms.contains(&text.trim().to_lowercase())
    }

    /// Whether any term occurs in `text` as a whole word
    pub fn contains_term_within(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .any(|term| contains_whole_word(&lowered, term))
    }

    /// Whether a candidate survives the whitelist
    pub fn retains(&self, candidate: &Candidate) -> bool {
        match candidate.entity_type.whitelist_policy() {
            WhitelistPolicy::AlwaysBypass => true,
            WhitelistPolicy::ExactOnly => !self.contains_exact(&candidate.matched_text),
            WhitelistPolicy::Eligible => {
                !self.contains_exact(&candidate.matched_text)
                    && !self.contains_term_within(&candidate.matched_text)
            }
        }
    }

    /// Drop whitelisted candidates, preserving order
    pub fn filter(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if self.is_empty() {
            return candidates;
        }
        candidates
            .into_iter()
            .filter(|candidate| {
                let keep = self.retains(candidate);
                if !keep {
                    tracing::debug!(
                        entity_type = %candidate.entity_type,
                        rule_id = %candidate.rule_id,
                        start = candidate.start,
                        "Candidate dropped by whitelist"
                    );
                }
                keep
            })
            .collect()
    }
}

fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(idx, _)| {
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
