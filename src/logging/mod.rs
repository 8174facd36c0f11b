//! Logging and observability
//!
//! - Human-readable console logs on stderr
//! - Optional JSON log files with daily or hourly rotation
//! - Macros for the pipeline's recurring events
//!
//! Log events carry entity types, rule ids, offsets and counts. They never
//! carry matched text.
//!
//! # Example
//!
//! ```no_run
//! use anonymify::config::LoggingConfig;
//! use anonymify::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a recoverable pipeline warning
///
/// # Example
///
/// ```no_run
/// use anonymify::domain::{EntityType, RecoverableError};
/// use anonymify::log_recoverable;
///
/// let warning = RecoverableError::MaskingFallback {
///     entity_type: EntityType::Phone,
///     rule_id: "phone_national".to_string(),
/// };
/// log_recoverable!(&warning);
/// ```
#[macro_export]
macro_rules! log_recoverable {
    ($warning:expr) => {
        tracing::warn!(
            kind = $warning.kind(),
            detail = %$warning,
            "Recoverable anonymization issue"
        );
    };
}

/// Log the completion of one anonymization call
///
/// # Example
///
/// ```no_run
/// use anonymify::log_anonymization_complete;
/// use std::time::Duration;
///
/// log_anonymization_complete!(3, 0, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_anonymization_complete {
    ($spans:expr, $warnings:expr, $duration:expr) => {
        tracing::debug!(
            spans = $spans,
            warnings = $warnings,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use anonymify::domain::AnonymifyError;
/// use anonymify::log_error_with_context;
///
/// let error = AnonymifyError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
