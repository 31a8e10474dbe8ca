//! Property-based tests for scanning, annotation and simplification
//!
//! - Every scanned span slices back to its own text
//! - Annotation never loses or reorders source text
//! - The rule-based simplifier is a fixed point after one pass

use legal_engine::{annotate, MockTranslator, RiskScanner, RuleBasedSimplifier};
use proptest::prelude::*;
use regex::Regex;
use shared_types::SimplificationLevel;

/// Word and phrase tokens, including halves of rule phrases ("prior" next to
/// "thereto") whose rewrites meet other rules
const VOCABULARY: &[&str] = &[
    "the",
    "tenant",
    "landlord",
    "shall",
    "must",
    "may",
    "pay",
    "rent",
    "hereby",
    "herein",
    "thereof",
    "thereto",
    "prior",
    "subsequent",
    "with respect",
    "aforementioned",
    "notwithstanding",
    "damages",
    "deposit",
    "within",
    "days",
    "pursuant to",
    "prior to",
    "not less than",
    "in the event that",
    "indemnify and hold harmless",
    "force majeure",
    "bona fide",
    "agrees",
    "notice",
    "breach",
    "unless",
    ", and",
    ";",
];

fn level() -> impl Strategy<Value = SimplificationLevel> {
    prop_oneof![
        Just(SimplificationLevel::Simple),
        Just(SimplificationLevel::Moderate),
        Just(SimplificationLevel::Advanced),
    ]
}

fn sentence() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(VOCABULARY), 1..35),
        prop::sample::select(&[".", "!", "?"][..]),
    )
        .prop_map(|(words, end)| format!("{}{}", words.join(" "), end))
}

fn legal_text() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(sentence(), 1..6),
        prop::sample::select(&[" ", "  ", "\n", " \n\t"][..]),
    )
        .prop_map(|(sentences, gap)| sentences.join(gap))
}

fn strip_tags(markup: &str) -> String {
    Regex::new(r"<[^>]+>")
        .unwrap()
        .replace_all(markup, "")
        .into_owned()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: spans slice back to their text for arbitrary input
    #[test]
    fn spans_match_source_for_any_text(text in "\\PC{0,300}") {
        let chars: Vec<char> = text.chars().collect();
        for span in RiskScanner::new().scan(&text) {
            prop_assert!(span.start < span.end);
            prop_assert!(span.end <= chars.len());
            let slice: String = chars[span.start..span.end].iter().collect();
            prop_assert_eq!(slice, span.text);
        }
    }

    /// Property: spans slice back to their text for legal prose with irregular whitespace
    #[test]
    fn spans_match_source_for_legal_text(text in legal_text()) {
        let spans = RiskScanner::new().scan(&text);
        prop_assert!(spans.iter().all(|s| s.is_valid_for(&text)));
    }

    /// Property: removing markup reproduces the source exactly
    #[test]
    fn annotation_preserves_text(text in "[^<>]{0,200}") {
        let spans = RiskScanner::new().scan(&text);
        let markup = annotate(&text, &spans);
        prop_assert!(markup.len() >= text.len());
        prop_assert_eq!(strip_tags(&markup), text);
    }

    /// Property: every scanned span in legal prose opens exactly one wrapper
    #[test]
    fn annotation_of_legal_text_round_trips(text in legal_text()) {
        let spans = RiskScanner::new().scan(&text);
        let markup = annotate(&text, &spans);
        prop_assert_eq!(markup.matches("</span>").count(), spans.len());
        prop_assert_eq!(strip_tags(&markup), text);
    }

    /// Property: a second simplification pass changes nothing
    #[test]
    fn simplification_is_a_fixed_point(text in legal_text(), level in level()) {
        let simplifier = RuleBasedSimplifier::new();
        let once = simplifier.simplify(&text, level);
        let twice = simplifier.simplify(&once, level);
        prop_assert_eq!(once, twice);
    }

    /// Property: simple-level output never keeps "shall"
    #[test]
    fn simplification_removes_shall(text in legal_text(), level in level()) {
        let simplified = RuleBasedSimplifier::new().simplify(&text, level);
        prop_assert!(!simplified.to_lowercase().contains("shall"));
    }

    /// Property: glossary translation is never empty and always marked
    #[test]
    fn glossary_translation_never_empty(text in "\\PC{0,100}", language in "[A-Za-z]{0,12}") {
        let translated = MockTranslator::new().translate(&text, &language);
        prop_assert!(!translated.is_empty());
        prop_assert!(translated.starts_with('['));
    }
}
