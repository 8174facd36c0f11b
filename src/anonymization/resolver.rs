//! Span resolution
//!
//! Reduces overlapping candidates to a disjoint set. Candidates are ranked by
//! confidence (descending), then length (descending), then entity type
//! ordinal (ascending), then start offset (ascending); each is accepted if
//! it overlaps nothing accepted before it. The result is ordered by start.
//!
//! The ranking is a total order over distinct candidates, so the output does
//! not depend on input order, and resolving an already resolved list returns
//! it unchanged.

use crate::domain::Candidate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Resolve overlaps; zero-length candidates are discarded
pub fn resolve(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = candidates.into_iter().filter(|c| !c.is_empty()).collect();
    ranked.sort_by(priority);

    // Accepted spans keyed by start; disjoint, so ends ascend with starts.
    let mut accepted: BTreeMap<usize, Candidate> = BTreeMap::new();
    for candidate in ranked {
        let blocked = accepted
            .range(..candidate.end)
            .next_back()
            .is_some_and(|(_, prior)| prior.end > candidate.start);
        if !blocked {
            accepted.insert(candidate.start, candidate);
        }
    }

    accepted.into_values().collect()
}

/// Whether spans are sorted by start and pairwise disjoint
pub fn is_resolved(spans: &[Candidate]) -> bool {
    spans
        .windows(2)
        .all(|pair| pair[0].end <= pair[1].start && !pair[0].is_empty())
        && spans.last().map_or(true, |c| !c.is_empty())
}

fn priority(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.entity_type.cmp(&b.entity_type))
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.rule_id.cmp(&b.rule_id))
}
