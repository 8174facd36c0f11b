//! End-to-end tests for the anonymization pipeline

use anonymify::anonymization::detector::{PatternRule, PatternRuleSet, RecognizerEngine};
use anonymify::anonymization::filters::{ConfidenceThresholds, WhitelistSet};
use anonymify::anonymization::AnonymizationEngine;
use anonymify::config::{AnonymifyConfig, RecognitionMode};
use anonymify::domain::EntityType;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

fn default_engine() -> AnonymizationEngine {
    AnonymizationEngine::initialize(&AnonymifyConfig::default()).expect("default engine")
}

fn engine_with_rules(rules: Vec<PatternRule>) -> AnonymizationEngine {
    let set = PatternRuleSet::from_rules(rules).expect("valid rules");
    AnonymizationEngine::from_parts(
        RecognizerEngine::pattern_only(Arc::new(set), Duration::from_secs(5)),
        WhitelistSet::default(),
        ConfidenceThresholds::default(),
    )
}

#[test]
fn test_salutation_phone_and_email() {
    let engine = default_engine();
    let text = "Herr Dr. Klaus Meier, Tel: 030 555-1234, Email: k.meier@firma.de";

    let outcome = engine.anonymize_detailed(text, None);

    assert_eq!(outcome.text, "Herr Dr. M., Tel: 030 XXXXXXX, Email: ***@***.de");
    let types: Vec<EntityType> = outcome.spans.iter().map(|s| s.entity_type).collect();
    assert_eq!(
        types,
        vec![EntityType::Person, EntityType::Phone, EntityType::Email]
    );
    assert_eq!(outcome.spans[0].rule_id, "person_salutation");
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_iban_beats_overlapping_card_and_phone() {
    let engine = default_engine();
    let outcome =
        engine.anonymize_detailed("Bitte überweisen Sie auf DE89 3704 0044 0532 0130 00.", None);

    assert_eq!(outcome.text, "Bitte überweisen Sie auf DE** **** ****.");
    assert_eq!(outcome.spans.len(), 1);
    assert_eq!(outcome.spans[0].entity_type, EntityType::Iban);
}

#[test]
fn test_dates_keep_month_and_year() {
    let engine = default_engine();
    assert_eq!(
        engine.anonymize("Termin am 15.03.2024 bzw. 2024-03-15", None),
        "Termin am XX.03.2024 bzw. 2024-03-XX"
    );
    assert_eq!(
        engine.anonymize("am 3. März 2024", None),
        "am XX. März 2024"
    );
}

#[test]
fn test_text_without_entities_is_returned_unchanged() {
    let engine = default_engine();
    let text = "Der Vertrag wurde gestern unterschrieben und liegt vor.";
    let outcome = engine.anonymize_detailed(text, None);
    assert_eq!(outcome.text, text);
    assert!(outcome.spans.is_empty());
}

#[test]
fn test_name_run_keeps_following_words() {
    let engine = default_engine();
    assert_eq!(
        engine.anonymize("Bitte rufen Sie Frau Schmidt Montag an.", None),
        "Bitte rufen Sie Frau S. Montag an."
    );
    assert_eq!(
        engine.anonymize("Zeuge war Herr Klaus Meier Rechtsanwalt in Köln.", None),
        "Zeuge war Herr M. Rechtsanwalt in Köln."
    );
    assert_eq!(
        engine.anonymize("Heute schrieb Herr Meier Die Akte ist vollständig.", None),
        "Heute schrieb Herr M. Die Akte ist vollständig."
    );
}

#[test]
fn test_postal_code_masked_before_city_suffix() {
    let engine = default_engine();
    let outcome = engine.anonymize_detailed("Kanzlei, 60311 Frankfurt am Main", None);
    assert_eq!(outcome.text, "Kanzlei, ***** F. am Main");
    assert_eq!(outcome.spans.len(), 1);
    assert_eq!(outcome.spans[0].entity_type, EntityType::Location);
}

#[test]
fn test_whitelist_term_inside_surname_does_not_exempt() {
    let mut config = AnonymifyConfig::default();
    config.whitelist.custom = vec!["bank".to_string()];
    let engine = AnonymizationEngine::initialize(&config).unwrap();
    assert_eq!(engine.anonymize("Herr Klaus Bankmann", None), "Herr B.");
}

#[test]
fn test_whitelisted_term_alone_is_unchanged() {
    let mut config = AnonymifyConfig::default();
    config.anonymization.person_score_threshold = 0.5;
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    assert_eq!(engine.anonymize("Amtsgericht", None), "Amtsgericht");
    assert_eq!(
        engine.anonymize("Landgericht Berlin", None),
        "Landgericht Berlin"
    );
    // Same rule, no whitelisted word: masked at the lowered threshold.
    assert_eq!(engine.anonymize("Klaus Meier", None), "M.");
}

#[test]
fn test_whitelist_never_exempts_structured_identifiers() {
    let mut config = AnonymifyConfig::default();
    config.whitelist.custom = vec![
        "k.meier@firma.de".to_string(),
        "DE89 3704 0044 0532 0130 00".to_string(),
    ];
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    assert_eq!(
        engine.anonymize("k.meier@firma.de", None),
        "***@***.de"
    );
    assert_eq!(
        engine.anonymize("DE89 3704 0044 0532 0130 00", None),
        "DE** **** ****"
    );
}

#[test]
fn test_exact_whitelist_match_exempts_date() {
    let mut config = AnonymifyConfig::default();
    config.whitelist.custom = vec!["15.03.2024".to_string()];
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    assert_eq!(engine.anonymize("Stand 15.03.2024", None), "Stand 15.03.2024");
    assert_eq!(engine.anonymize("Stand 16.03.2024", None), "Stand XX.03.2024");
}

#[test]
fn test_person_threshold_is_inclusive() {
    let at = engine_with_rules(vec![PatternRule::new(
        "surname",
        EntityType::Person,
        "Meier",
        0.7,
    )]);
    assert_eq!(at.anonymize("Akte Meier", None), "Akte M.");

    let below = engine_with_rules(vec![PatternRule::new(
        "surname",
        EntityType::Person,
        "Meier",
        0.69,
    )]);
    assert_eq!(below.anonymize("Akte Meier", None), "Akte Meier");
}

#[test]
fn test_other_threshold_is_inclusive() {
    let at = engine_with_rules(vec![PatternRule::new(
        "account",
        EntityType::AccountNumber,
        r"\d{8}",
        0.6,
    )]);
    assert_eq!(at.anonymize("Konto 12345678", None), "Konto <KONTONUMMER>");

    let below = engine_with_rules(vec![PatternRule::new(
        "account",
        EntityType::AccountNumber,
        r"\d{8}",
        0.59,
    )]);
    assert_eq!(below.anonymize("Konto 12345678", None), "Konto 12345678");
}

#[test]
fn test_containing_low_confidence_span_leaves_no_fragment() {
    let engine = engine_with_rules(vec![
        PatternRule::new(
            "long_name",
            EntityType::Person,
            r"[A-Z][a-z]+ Herr [A-Z][a-z]+ [A-Z][a-z]+",
            0.75,
        ),
        PatternRule::new(
            "salutation",
            EntityType::Person,
            r"Herr [A-Z][a-z]+ [A-Z][a-z]+",
            0.9,
        ),
    ]);

    let outcome = engine.anonymize_detailed("Gruss Herr Klaus Meier heute", None);

    assert_eq!(outcome.text, "Gruss Herr M. heute");
    assert_eq!(outcome.spans.len(), 1);
    assert_eq!(outcome.spans[0].rule_id, "salutation");
}

#[test]
fn test_line_break_normalization_joins_hyphenated_name() {
    let text = "Frau Anna Müller-\nHoffmann";

    let joined = default_engine().anonymize_detailed(text, None);
    assert_eq!(joined.text, "Frau M.");
    assert!(joined.normalized);

    let raw = default_engine()
        .with_normalization(false)
        .anonymize_detailed(text, None);
    assert_eq!(raw.text, "Frau M.-\nHoffmann");
    assert!(!raw.normalized);
}

#[test]
fn test_balanced_mode_uses_name_lexicon() {
    let mut lexicon = NamedTempFile::new().unwrap();
    writeln!(lexicon, "# Vornamen").unwrap();
    writeln!(lexicon, "Klaus").unwrap();
    writeln!(lexicon, "Anna").unwrap();
    lexicon.flush().unwrap();

    let mut config = AnonymifyConfig::default();
    config.anonymization.recognition_mode = RecognitionMode::Balanced;
    config.anonymization.model_path = Some(lexicon.path().to_path_buf());
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    assert_eq!(engine.recognition_mode(), RecognitionMode::Balanced);
    assert!(engine.initialization_warnings().is_empty());

    let outcome = engine.anonymize_detailed("Gestern rief Klaus Meier an.", None);
    assert_eq!(outcome.text, "Gestern rief M. an.");
    assert_eq!(outcome.spans[0].rule_id, "lexicon_model");

    // Pattern-only recognition leaves the bare name below threshold.
    assert_eq!(
        default_engine().anonymize("Gestern rief Klaus Meier an.", None),
        "Gestern rief Klaus Meier an."
    );
}

#[test]
fn test_enabled_entities_from_configuration() {
    let mut config = AnonymifyConfig::default();
    config.anonymization.enabled_entities = Some(vec![EntityType::Email]);
    let engine = AnonymizationEngine::initialize(&config).unwrap();

    let text = "Herr Dr. Klaus Meier, Email: k.meier@firma.de";
    assert_eq!(
        engine.anonymize(text, None),
        "Herr Dr. Klaus Meier, Email: ***@***.de"
    );
    // An explicit selection overrides the configured default.
    assert_eq!(
        engine.anonymize(text, Some(&[EntityType::Person])),
        "Herr Dr. M., Email: k.meier@firma.de"
    );
}

#[test]
fn test_output_is_deterministic() {
    let engine = default_engine();
    let text = "Frau Prof. Dr. Ute Özdemir, Hauptstraße 5, 10115 Berlin, Tel. +49 30 12345678";
    let first = engine.anonymize_detailed(text, None);
    for _ in 0..5 {
        let again = engine.anonymize_detailed(text, None);
        assert_eq!(again.text, first.text);
        assert_eq!(again.spans, first.spans);
    }
}
