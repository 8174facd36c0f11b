//! PII anonymization pipeline
//!
//! Redacts personally identifiable information from free text while keeping
//! it readable.
//!
//! # Architecture
//!
//! ```text
//! normalize -> recognize -> whitelist -> confidence -> resolve -> mask
//! ```
//!
//! - **Normalization**: rejoins names broken across lines ([`normalize`])
//! - **Recognition**: pattern rule catalog plus optional statistical
//!   provider ([`detector`])
//! - **Filtering**: whitelist and per-category thresholds ([`filters`])
//! - **Resolution**: overlapping candidates reduced to disjoint spans
//!   ([`resolver`])
//! - **Masking**: one structure-preserving operator per entity type
//!   ([`operators`])
//! - **Audit**: JSON-lines trail of span metadata, never matched text
//!   ([`audit`])
//!
//! # Usage
//!
//! ```rust,no_run
//! use anonymify::anonymization::AnonymizationEngine;
//! use anonymify::config::AnonymifyConfig;
//!
//! # fn example() -> anonymify::domain::Result<()> {
//! let engine = AnonymizationEngine::initialize(&AnonymifyConfig::default())?;
//! let redacted = engine.anonymize("Herr Dr. Klaus Meier, Tel: 030 555-1234", None);
//! assert_eq!(redacted, "Herr Dr. M., Tel: 030 XXXXXXX");
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod detector;
pub mod engine;
pub mod filters;
pub mod models;
pub mod normalize;
pub mod operators;
pub mod report;
pub mod resolver;

pub use engine::AnonymizationEngine;
pub use models::{AnonymizationOutcome, MaskedSpan};
pub use report::AnalysisReport;

use regex::Regex;
use std::sync::OnceLock;

/// Compile a static pattern once; `None` if it fails to compile
pub(crate) fn cached_regex(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: &str,
) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}
