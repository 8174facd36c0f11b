//! Audit logger for anonymization calls

use crate::anonymization::models::AnonymizationOutcome;
use crate::config::AuditConfig;
use crate::domain::{AnonymifyError, EntityType, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    recognition_mode: String,
    input_length: usize,
    output_length: usize,
    span_count: usize,
    normalized: bool,
    processing_time_ms: u64,
    spans: Vec<AuditSpan>,
    warnings: Vec<String>,
}

/// Span metadata; the matched value is never written
#[derive(Debug, Serialize)]
struct AuditSpan {
    entity_type: EntityType,
    rule_id: String,
    confidence: f32,
    start: usize,
    end: usize,
}

/// Append-only audit trail, one entry per anonymization call
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    // Serializes appends so concurrent calls never interleave a line.
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AnonymifyError::Configuration(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one anonymization call
    pub fn log_outcome(&self, outcome: &AnonymizationOutcome) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: outcome.timestamp.to_rfc3339(),
            recognition_mode: outcome.recognition_mode.to_string(),
            input_length: outcome.input_length,
            output_length: outcome.text.len(),
            span_count: outcome.spans.len(),
            normalized: outcome.normalized,
            processing_time_ms: outcome.processing_time_ms,
            spans: outcome
                .spans
                .iter()
                .map(|s| AuditSpan {
                    entity_type: s.entity_type,
                    rule_id: s.rule_id.clone(),
                    confidence: s.confidence,
                    start: s.start,
                    end: s.end,
                })
                .collect(),
            warnings: outcome.warnings.iter().map(|w| w.to_string()).collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            format!(
                "[{}] Mode: {} | Spans: {} | Warnings: {} | Time: {}ms",
                entry.timestamp,
                entry.recognition_mode,
                entry.span_count,
                entry.warnings.len(),
                entry.processing_time_ms
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AnonymifyError::Other("Audit log lock poisoned".to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::MaskedSpan;
    use crate::config::RecognitionMode;
    use crate::domain::RecoverableError;
    use tempfile::tempdir;

    fn outcome() -> AnonymizationOutcome {
        let mut outcome =
            AnonymizationOutcome::unchanged("Mail: k.meier@firma.de", RecognitionMode::Fast);
        outcome.text = "Mail: ***@***.de".to_string();
        outcome.spans = vec![MaskedSpan {
            entity_type: EntityType::Email,
            start: 6,
            end: 22,
            confidence: 0.9,
            rule_id: "email".to_string(),
            replacement: "***@***.de".to_string(),
        }];
        outcome.warnings = vec![RecoverableError::MaskingFallback {
            entity_type: EntityType::Phone,
            rule_id: "phone_national".to_string(),
        }];
        outcome
    }

    #[test]
    fn test_audit_logger_creates_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit/trail.log");

        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();
        assert!(logger.is_enabled());
        assert!(log_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_log_outcome_writes_json_line_without_text() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        logger.log_outcome(&outcome()).unwrap();
        logger.log_outcome(&outcome()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["span_count"], 1);
        assert_eq!(entry["spans"][0]["entity_type"], "EMAIL");
        assert_eq!(entry["spans"][0]["rule_id"], "email");
        assert!(!content.contains("k.meier"));
        assert!(!content.contains("***@***.de"));
    }

    #[test]
    fn test_plain_text_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        logger.log_outcome(&outcome()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Spans: 1 | Warnings: 1"));
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, false).unwrap();

        logger.log_outcome(&outcome()).unwrap();
        assert!(!log_path.exists());
    }
}
