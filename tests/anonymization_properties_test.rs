//! Property and concurrency tests for the anonymization pipeline

use anonymify::anonymization::operators::{mask, sentinel};
use anonymify::anonymization::resolver::{is_resolved, resolve};
use anonymify::anonymization::AnonymizationEngine;
use anonymify::config::AnonymifyConfig;
use anonymify::domain::{Candidate, EntityType};
use proptest::prelude::*;
use std::sync::OnceLock;

fn engine() -> &'static AnonymizationEngine {
    static ENGINE: OnceLock<AnonymizationEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        AnonymizationEngine::initialize(&AnonymifyConfig::default()).expect("default engine")
    })
}

fn entity_type() -> impl Strategy<Value = EntityType> {
    (0..EntityType::ALL.len()).prop_map(|i| EntityType::ALL[i])
}

prop_compose! {
    fn candidate()(
        entity_type in entity_type(),
        start in 0usize..200,
        len in 0usize..40,
        confidence in 0.0f32..=1.0,
        rule in 0u8..4,
    ) -> Candidate {
        Candidate::new(entity_type, start, start + len, confidence, "", format!("rule_{rule}"))
    }
}

proptest! {
    #[test]
    fn resolved_spans_are_sorted_and_disjoint(candidates in prop::collection::vec(candidate(), 0..60)) {
        let resolved = resolve(candidates);
        prop_assert!(is_resolved(&resolved));
    }

    #[test]
    fn resolve_is_idempotent(candidates in prop::collection::vec(candidate(), 0..60)) {
        let once = resolve(candidates);
        let twice = resolve(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn resolve_ignores_input_order(candidates in prop::collection::vec(candidate(), 0..60)) {
        let mut reversed = candidates.clone();
        reversed.reverse();
        prop_assert_eq!(resolve(candidates), resolve(reversed));
    }

    #[test]
    fn resolve_keeps_only_input_spans(candidates in prop::collection::vec(candidate(), 0..60)) {
        let resolved = resolve(candidates.clone());
        for span in &resolved {
            prop_assert!(candidates.contains(span));
        }
    }

    #[test]
    fn masking_never_returns_the_input(
        entity_type in entity_type(),
        text in "[A-Za-z0-9 .@+/-]{1,40}",
    ) {
        let masked = mask(entity_type, &text);
        prop_assert_ne!(&masked, &text);
        prop_assert!(!masked.is_empty());
    }

    #[test]
    fn unparseable_values_use_sentinel(entity_type in entity_type(), text in "[,;!]{1,10}") {
        prop_assert_eq!(mask(entity_type, &text), sentinel(entity_type));
    }

    #[test]
    fn lowercase_prose_is_returned_unchanged(text in "[a-zäöü ]{0,80}") {
        prop_assert_eq!(engine().anonymize(&text, None), text);
    }

    #[test]
    fn arbitrary_text_never_panics_and_is_deterministic(text in "\\PC{0,120}") {
        let first = engine().anonymize_detailed(&text, None);
        let second = engine().anonymize_detailed(&text, None);
        prop_assert_eq!(&first.text, &second.text);
        prop_assert_eq!(&first.spans, &second.spans);
        for pair in first.spans.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}

#[test]
fn test_concurrent_calls_match_sequential_results() {
    let texts = [
        "Herr Dr. Klaus Meier, Tel: 030 555-1234, Email: k.meier@firma.de",
        "Bitte überweisen Sie auf DE89 3704 0044 0532 0130 00.",
        "Termin am 15.03.2024 bzw. 2024-03-15",
        "Unser Zeichen Az.: 1 Js 123/21 bitte angeben",
        "Der Vertrag wurde gestern unterschrieben.",
        "Frau Anna Müller-\nHoffmann",
    ];
    let expected: Vec<String> = texts.iter().map(|t| engine().anonymize(t, None)).collect();

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let expected = &expected;
            scope.spawn(move || {
                for round in 0..20 {
                    let i = (worker + round) % texts.len();
                    assert_eq!(engine().anonymize(texts[i], None), expected[i]);
                }
            });
        }
    });
}
