pub mod glossary;
pub mod overlay;
pub mod patterns;
pub mod scanner;
pub mod sentences;
pub mod simplifier;

pub use glossary::MockTranslator;
pub use overlay::annotate;
pub use scanner::{count_by_category, RiskScanner};
pub use simplifier::RuleBasedSimplifier;

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{RiskCategory, SimplificationLevel};

    #[test]
    fn test_scan_simplify_rescan() {
        let scanner = RiskScanner::new();
        let text = "The tenant shall pay rent. The tenant must not sublet.";

        let original = scanner.scan(text);
        assert_eq!(
            original
                .iter()
                .filter(|s| s.category == RiskCategory::Obligation)
                .count(),
            2
        );

        let simplified = RuleBasedSimplifier::new().simplify(text, SimplificationLevel::Simple);
        let rescanned = scanner.scan(&simplified);
        assert!(rescanned
            .iter()
            .all(|s| s.category != RiskCategory::Obligation));
        assert!(rescanned.iter().all(|s| s.is_valid_for(&simplified)));
    }

    #[test]
    fn test_annotated_scan_round_trips_text() {
        let text = "Subject to clause 4, the lessee shall pay damages if it breaches.";
        let spans = RiskScanner::new().scan(text);
        let markup = annotate(text, &spans);

        assert!(markup.len() > text.len());
        let stripped = regex::Regex::new(r"<[^>]+>")
            .unwrap()
            .replace_all(&markup, "")
            .into_owned();
        assert_eq!(stripped, text);
    }

    #[test]
    fn test_translation_then_scan() {
        let translated = MockTranslator::new().translate("The party shall pay the penalty.", "Hindi");
        let spans = RiskScanner::new().scan(&translated);

        assert!(spans.iter().any(|s| s.text == "shall"));
        assert!(spans.iter().all(|s| s.is_valid_for(&translated)));
    }
}
