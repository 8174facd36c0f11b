//! Result data models

pub mod outcome;

pub use outcome::{AnonymizationOutcome, MaskedSpan};
