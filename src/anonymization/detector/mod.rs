//! Entity detection
//!
//! Two sources feed the candidate list: the compiled pattern rule catalog
//! ([`patterns`]) run by the [`RecognizerEngine`], and an optional
//! statistical [`EntityProvider`] selected by the recognition mode.

pub mod patterns;
pub mod recognizer;
pub mod statistical;

use crate::domain::Candidate;

pub use patterns::{CompiledRule, PatternRule, PatternRuleSet};
pub use recognizer::{Recognition, RecognizerEngine};
pub use statistical::{select_provider, LexiconModelProvider, PatternOnlyProvider};

/// Trait for statistical entity providers
///
/// Implementations must be shareable across threads. Offsets are byte
/// offsets into `text`; spans that are out of range or not on character
/// boundaries are discarded by the recognizer.
pub trait EntityProvider: Send + Sync {
    /// Identifier reported as the `rule_id` of produced candidates
    fn name(&self) -> &str;

    /// Detect entities in `text`
    fn detect(&self, text: &str) -> Vec<Candidate>;
}
