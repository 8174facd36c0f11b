//! Error handling tests for the anonymization engine

use anonymify::anonymization::audit::AuditLogger;
use anonymify::anonymization::detector::{PatternRule, PatternRuleSet, RecognizerEngine};
use anonymify::anonymization::filters::{ConfidenceThresholds, WhitelistSet};
use anonymify::anonymization::AnonymizationEngine;
use anonymify::config::{AnonymifyConfig, RecognitionMode};
use anonymify::domain::{AnonymifyError, EntityType, RecoverableError};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn engine(rules: Vec<PatternRule>, timeout: Duration) -> AnonymizationEngine {
    let set = PatternRuleSet::from_rules(rules).expect("valid rules");
    AnonymizationEngine::from_parts(
        RecognizerEngine::pattern_only(Arc::new(set), timeout),
        WhitelistSet::default(),
        ConfidenceThresholds::default(),
    )
}

fn write_catalog(dir: &TempDir, content: &str) -> AnonymifyConfig {
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, content).unwrap();
    let mut config = AnonymifyConfig::default();
    config.anonymization.pattern_library = Some(path);
    config
}

#[test]
fn test_malformed_catalog_is_fatal() {
    let dir = TempDir::new().unwrap();
    let cases = [
        "[patterns.broken]\ncategory = \"EMAIL\"\nconfidence = 0.9\npatterns = [\"(unclosed\"]\n",
        "[patterns.weird]\ncategory = \"SHOE_SIZE\"\nconfidence = 0.9\npatterns = [\"x\"]\n",
        "[patterns.loud]\ncategory = \"EMAIL\"\nconfidence = 1.5\npatterns = [\"x\"]\n",
        "[patterns.empty]\ncategory = \"EMAIL\"\nconfidence = 0.9\npatterns = [\"a*\"]\n",
        "not toml at all [",
    ];

    for content in cases {
        let config = write_catalog(&dir, content);
        let result = AnonymizationEngine::initialize(&config);
        assert!(
            matches!(result, Err(AnonymifyError::Configuration(_))),
            "catalog should be rejected: {content}"
        );
    }
}

#[test]
fn test_custom_catalog_replaces_builtin_rules() {
    let dir = TempDir::new().unwrap();
    let config = write_catalog(
        &dir,
        "[patterns.mandant]\ncategory = \"CASE_NUMBER\"\nconfidence = 0.9\npatterns = ['M-\\d{4}/\\d{2}']\n",
    );
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    assert_eq!(engine.rule_count(), 1);
    assert_eq!(
        engine.anonymize("Mandat M-0815/24, Email: k.meier@firma.de", None),
        "Mandat M-****/24, Email: k.meier@firma.de"
    );
}

#[test]
fn test_invalid_thresholds_rejected() {
    let mut config = AnonymifyConfig::default();
    config.anonymization.other_score_threshold = -0.1;
    assert!(matches!(
        AnonymizationEngine::initialize(&config),
        Err(AnonymifyError::Configuration(_))
    ));
}

#[test]
fn test_rule_timeout_omits_candidates_and_warns() {
    let engine = engine(
        vec![PatternRule::new("digits", EntityType::AccountNumber, r"\d{6}", 0.9)],
        Duration::ZERO,
    );

    let outcome = engine.anonymize_detailed("Konto 123456", None);

    assert_eq!(outcome.text, "Konto 123456");
    assert_eq!(outcome.warnings.len(), 1);
    assert!(matches!(
        &outcome.warnings[0],
        RecoverableError::PatternTimeout { rule_id, entity_type, .. }
            if rule_id == "digits" && *entity_type == EntityType::AccountNumber
    ));
}

#[test]
fn test_pathological_pattern_terminates() {
    let engine = engine(
        vec![PatternRule::new(
            "nested",
            EntityType::AccountNumber,
            r"(?=a)(a+)+b",
            0.9,
        )],
        Duration::from_secs(2),
    );
    let text = "a".repeat(40);

    let outcome = engine.anonymize_detailed(&text, None);

    assert_eq!(outcome.text, text);
    assert!(outcome
        .warnings
        .iter()
        .all(|w| matches!(w, RecoverableError::PatternTimeout { .. })));
}

#[test]
fn test_missing_model_degrades_to_fast() {
    let mut config = AnonymifyConfig::default();
    config.anonymization.recognition_mode = RecognitionMode::Accurate;
    config.anonymization.model_path = Some("/nonexistent/vornamen.txt".into());

    let engine = AnonymizationEngine::initialize(&config).unwrap();

    assert_eq!(engine.recognition_mode(), RecognitionMode::Fast);
    assert_eq!(engine.provider_name(), "pattern_only");
    assert!(matches!(
        engine.initialization_warnings(),
        [RecoverableError::ProviderUnavailable {
            mode: RecognitionMode::Accurate,
            ..
        }]
    ));
    // Still a working engine.
    assert_eq!(
        engine.anonymize("Email: k.meier@firma.de", None),
        "Email: ***@***.de"
    );
}

#[test]
fn test_unparseable_value_falls_back_to_sentinel() {
    let engine = engine(
        vec![PatternRule::new(
            "local_mail",
            EntityType::Email,
            r"\b\w+@localhost\b",
            0.9,
        )],
        Duration::from_secs(5),
    );

    let outcome = engine.anonymize_detailed("Absender root@localhost", None);

    assert_eq!(outcome.text, "Absender <EMAIL>");
    assert_eq!(
        outcome.warnings,
        vec![RecoverableError::MaskingFallback {
            entity_type: EntityType::Email,
            rule_id: "local_mail".to_string(),
        }]
    );
}

#[test]
fn test_audit_failure_does_not_fail_call() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened for appending.
    let logger = AuditLogger::new(dir.path().to_path_buf(), true, true).unwrap();
    let engine = AnonymizationEngine::initialize(&AnonymifyConfig::default())
        .unwrap()
        .with_audit_logger(logger);

    assert_eq!(
        engine.anonymize("Email: k.meier@firma.de", None),
        "Email: ***@***.de"
    );
}

#[test]
fn test_audit_log_records_metadata_only() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("audit").join("anonymify.log");

    let mut config = AnonymifyConfig::default();
    config.audit.enabled = true;
    config.audit.log_path = log_path.clone();
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    engine.anonymize(
        "Herr Dr. Klaus Meier, Tel: 030 555-1234, Email: k.meier@firma.de",
        None,
    );
    engine.anonymize("Termin am 15.03.2024", None);

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["span_count"], 3);
    assert_eq!(first["spans"][0]["entity_type"], "PERSON");

    for needle in ["Meier", "555-1234", "k.meier", "15.03.2024", "***@***.de", "XX.03.2024"] {
        assert!(!contents.contains(needle), "audit log leaked {needle}");
    }
}
