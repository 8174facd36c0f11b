//! Main anonymization engine
//!
//! [`AnonymizationEngine`] runs the full pipeline for one text:
//!
//! 1. line-break normalization (optional)
//! 2. recognition on the normalized text
//! 3. whitelist filter
//! 4. confidence filter
//! 5. span resolution
//! 6. left-to-right reconstruction with the masking operators
//!
//! Output is rebuilt from the normalized text, so line breaks rejoined in
//! step 1 stay joined. When nothing is masked the input is returned as is.
//!
//! # Examples
//!
//! ```no_run
//! use anonymify::anonymization::AnonymizationEngine;
//! use anonymify::config::AnonymifyConfig;
//! use anonymify::domain::EntityType;
//!
//! # fn example() -> anonymify::domain::Result<()> {
//! let engine = AnonymizationEngine::initialize(&AnonymifyConfig::default())?;
//!
//! let all = engine.anonymize("Email: k.meier@firma.de", None);
//! assert_eq!(all, "Email: ***@***.de");
//!
//! let dates_only = engine.anonymize("am 15.03.2024", Some(&[EntityType::Date]));
//! assert_eq!(dates_only, "am XX.03.2024");
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    audit::AuditLogger,
    detector::{select_provider, PatternRuleSet, RecognizerEngine},
    filters::{ConfidenceThresholds, WhitelistSet},
    models::{AnonymizationOutcome, MaskedSpan},
    normalize::normalize_line_breaks,
    operators, resolver,
};
use crate::config::{AnonymifyConfig, RecognitionMode};
use crate::domain::{AnonymifyError, EntityType, RecoverableError, Result};
use chrono::Utc;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main anonymization engine
///
/// Immutable after construction. Share one instance across threads by
/// reference or `Arc`; calls do not affect each other.
#[derive(Debug)]
pub struct AnonymizationEngine {
    recognizer: RecognizerEngine,
    whitelist: WhitelistSet,
    thresholds: ConfidenceThresholds,
    default_entities: Vec<EntityType>,
    normalize: bool,
    mode: RecognitionMode,
    init_warnings: Vec<RecoverableError>,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Build the engine from configuration
    ///
    /// A statistical resource that cannot be loaded degrades the engine to
    /// `fast` mode and is reported through
    /// [`initialization_warnings`](Self::initialization_warnings).
    ///
    /// # Errors
    ///
    /// Returns [`AnonymifyError::Configuration`] if the configuration is
    /// invalid, the rule catalog is malformed, or the audit log directory
    /// cannot be created.
    pub fn initialize(config: &AnonymifyConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            AnonymifyError::Configuration(format!("Invalid anonymization configuration: {e}"))
        })?;
        let settings = &config.anonymization;

        let rules = match &settings.pattern_library {
            Some(path) => PatternRuleSet::from_file(path)?,
            None => PatternRuleSet::default_rules()?,
        };

        let selection = select_provider(settings.recognition_mode, settings.model_path.as_deref());
        let recognizer = RecognizerEngine::new(
            Arc::new(rules),
            selection.provider,
            Duration::from_millis(settings.pattern_timeout_ms),
        );

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::from_config(&config.audit)?)
        } else {
            None
        };

        tracing::info!(
            requested_mode = %settings.recognition_mode,
            effective_mode = %selection.effective_mode,
            rules = recognizer.rules().len(),
            provider = recognizer.provider_name(),
            audit = audit_logger.is_some(),
            "Anonymization engine initialized"
        );

        Ok(Self {
            recognizer,
            whitelist: WhitelistSet::from_config(&config.whitelist),
            thresholds: ConfidenceThresholds::from_settings(settings),
            default_entities: settings.enabled_entity_types(),
            normalize: settings.normalize_line_breaks,
            mode: selection.effective_mode,
            init_warnings: selection.warning.into_iter().collect(),
            audit_logger,
        })
    }

    /// Assemble an engine from prepared components
    ///
    /// All entity types are enabled by default, normalization is on and
    /// auditing is off.
    pub fn from_parts(
        recognizer: RecognizerEngine,
        whitelist: WhitelistSet,
        thresholds: ConfidenceThresholds,
    ) -> Self {
        Self {
            recognizer,
            whitelist,
            thresholds,
            default_entities: EntityType::ALL.to_vec(),
            normalize: true,
            mode: RecognitionMode::Fast,
            init_warnings: Vec::new(),
            audit_logger: None,
        }
    }

    /// Replace the default entity set used when a call passes `None`
    pub fn with_default_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.default_entities = entities;
        self
    }

    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    pub fn with_audit_logger(mut self, logger: AuditLogger) -> Self {
        self.audit_logger = Some(logger);
        self
    }

    /// Mode in effect after any downgrade
    pub fn recognition_mode(&self) -> RecognitionMode {
        self.mode
    }

    /// Recoverable problems found while initializing
    pub fn initialization_warnings(&self) -> &[RecoverableError] {
        &self.init_warnings
    }

    pub fn default_entities(&self) -> &[EntityType] {
        &self.default_entities
    }

    pub fn rule_count(&self) -> usize {
        self.recognizer.rules().len()
    }

    pub fn provider_name(&self) -> &str {
        self.recognizer.provider_name()
    }

    pub fn whitelist_len(&self) -> usize {
        self.whitelist.len()
    }

    pub fn thresholds(&self) -> ConfidenceThresholds {
        self.thresholds
    }

    /// Redact `text`
    ///
    /// `enabled` restricts detection to the given types; `None` uses the
    /// configured default set.
    pub fn anonymize(&self, text: &str, enabled: Option<&[EntityType]>) -> String {
        self.anonymize_detailed(text, enabled).text
    }

    /// Redact `text` and report every applied span and warning
    pub fn anonymize_detailed(
        &self,
        text: &str,
        enabled: Option<&[EntityType]>,
    ) -> AnonymizationOutcome {
        if text.trim().is_empty() {
            return AnonymizationOutcome::unchanged(text, self.mode);
        }

        let started = Instant::now();
        let enabled = enabled.unwrap_or(&self.default_entities);

        let analyzed = if self.normalize {
            normalize_line_breaks(text)
        } else {
            Cow::Borrowed(text)
        };

        let recognition = self.recognizer.analyze(&analyzed, enabled);
        let mut warnings = recognition.warnings;

        let candidates = self.whitelist.filter(recognition.candidates);
        let candidates = self.thresholds.filter(candidates);
        let resolved = resolver::resolve(candidates);
        debug_assert!(resolver::is_resolved(&resolved));

        let (output, spans) = if resolved.is_empty() {
            (text.to_string(), Vec::new())
        } else {
            let mut output = String::with_capacity(analyzed.len());
            let mut spans = Vec::with_capacity(resolved.len());
            let mut cursor = 0;

            for candidate in &resolved {
                let masked = operators::mask_detailed(
                    candidate.entity_type,
                    &analyzed[candidate.start..candidate.end],
                );
                if masked.fell_back {
                    let warning = RecoverableError::MaskingFallback {
                        entity_type: candidate.entity_type,
                        rule_id: candidate.rule_id.clone(),
                    };
                    crate::log_recoverable!(&warning);
                    warnings.push(warning);
                }

                output.push_str(&analyzed[cursor..candidate.start]);
                output.push_str(&masked.replacement);
                cursor = candidate.end;
                spans.push(MaskedSpan::from_candidate(candidate, masked.replacement));
            }
            output.push_str(&analyzed[cursor..]);
            (output, spans)
        };

        let elapsed = started.elapsed();
        crate::log_anonymization_complete!(spans.len(), warnings.len(), elapsed);

        let outcome = AnonymizationOutcome {
            text: output,
            spans,
            warnings,
            normalized: matches!(analyzed, Cow::Owned(_)),
            recognition_mode: self.mode,
            input_length: text.len(),
            processing_time_ms: elapsed.as_millis() as u64,
            timestamp: Utc::now(),
        };

        if let Some(logger) = &self.audit_logger {
            if let Err(e) = logger.log_outcome(&outcome) {
                crate::log_error_with_context!(&e, "Failed to write audit entry");
            }
        }

        outcome
    }
}
