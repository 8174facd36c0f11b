//! Domain types for Anonymify.
//!
//! - [`EntityType`] with its threshold category and whitelist policy
//! - [`Candidate`] spans produced by recognition
//! - Error types ([`AnonymifyError`], [`RecoverableError`]) and the [`Result`] alias

pub mod candidate;
pub mod entity;
pub mod errors;
pub mod result;

pub use candidate::Candidate;
pub use entity::{EntityType, ThresholdCategory, WhitelistPolicy};
pub use errors::{AnonymifyError, RecoverableError};
pub use result::Result;
