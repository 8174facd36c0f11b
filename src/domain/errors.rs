//! Domain error types
//!
//! Two families of errors exist. [`AnonymifyError`] is fatal: it aborts
//! initialization or a CLI command. [`RecoverableError`] is recorded alongside a
//! result and never stops the pipeline.
//!
//! No variant carries matched text. Messages name entity types and rule
//! identifiers so detection coverage can be audited without leaking PII.

use super::entity::EntityType;
use crate::config::RecognitionMode;
use serde::Serialize;
use thiserror::Error;

/// Main Anonymify error type
#[derive(Debug, Error)]
pub enum AnonymifyError {
    /// Malformed rule catalog or configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Recoverable conditions recorded during initialization or a single call
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecoverableError {
    /// A rule exceeded its match budget; its candidates were dropped for this call
    #[error("Pattern timeout: rule '{rule_id}' ({entity_type}) exceeded its budget after {elapsed_ms}ms")]
    PatternTimeout {
        rule_id: String,
        entity_type: EntityType,
        elapsed_ms: u64,
    },

    /// The statistical backend could not be loaded; recognition runs pattern-only
    #[error("Statistical provider unavailable for mode '{mode}': {reason}")]
    ProviderUnavailable {
        mode: RecognitionMode,
        reason: String,
    },

    /// A masking operator could not parse its input; the fixed sentinel was used
    #[error("Masking fallback: {entity_type} span from rule '{rule_id}' replaced by sentinel")]
    MaskingFallback {
        entity_type: EntityType,
        rule_id: String,
    },
}

impl RecoverableError {
    /// Short machine-readable kind, used in audit records and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PatternTimeout { .. } => "pattern_timeout",
            Self::ProviderUnavailable { .. } => "provider_unavailable",
            Self::MaskingFallback { .. } => "masking_fallback",
        }
    }
}

impl From<std::io::Error> for AnonymifyError {
    fn from(err: std::io::Error) -> Self {
        AnonymifyError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AnonymifyError {
    fn from(err: toml::de::Error) -> Self {
        AnonymifyError::Configuration(format!("Failed to parse TOML: {err}"))
    }
}

impl From<serde_json::Error> for AnonymifyError {
    fn from(err: serde_json::Error) -> Self {
        AnonymifyError::Serialization(err.to_string())
    }
}
