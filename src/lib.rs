// Anonymify - PII redaction for German legal text
// Copyright (c) 2025 Anonymify Contributors
// Licensed under the MIT License

//! # Anonymify - PII redaction for German legal text
//!
//! Anonymify removes personally identifiable information from letters,
//! briefs and court documents while keeping them readable: names become
//! initials, phone numbers keep their area code, dates keep month and year.
//!
//! ## Overview
//!
//! One call runs a fixed pipeline:
//! - **Normalizing** names split across line breaks
//! - **Recognizing** candidate spans with a regex rule catalog and an
//!   optional name lexicon
//! - **Filtering** whitelisted terms and low-confidence candidates
//! - **Resolving** overlaps so every character is covered at most once
//! - **Masking** each span with a format-preserving replacement
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Recognition, filtering, resolution and masking
//! - [`domain`] - Entity types, candidates and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anonymify::anonymization::AnonymizationEngine;
//! use anonymify::config::load_config_or_default;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("anonymify.toml")?;
//!     let engine = AnonymizationEngine::initialize(&config)?;
//!
//!     let redacted = engine.anonymize("Herr Dr. Klaus Meier, Tel: 030 555-1234", None);
//!     assert_eq!(redacted, "Herr Dr. M., Tel: 030 XXXXXXX");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Setup failures are [`domain::AnonymifyError`]. Once an engine exists,
//! redaction never fails: rule timeouts, a missing lexicon and masking
//! fallbacks are reported as [`domain::RecoverableError`] values on the
//! [`anonymization::AnonymizationOutcome`].
//!
//! ```rust,no_run
//! use anonymify::anonymization::AnonymizationEngine;
//! use anonymify::domain::EntityType;
//!
//! # fn example(engine: &AnonymizationEngine) {
//! let outcome = engine.anonymize_detailed("IBAN DE89 3704 0044 0532 0130 00", Some(&[EntityType::Iban]));
//! for warning in &outcome.warnings {
//!     eprintln!("{warning}");
//! }
//! # }
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
