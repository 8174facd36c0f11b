//! Candidate filters applied between recognition and resolution

pub mod confidence;
pub mod whitelist;

pub use confidence::ConfidenceThresholds;
pub use whitelist::WhitelistSet;
