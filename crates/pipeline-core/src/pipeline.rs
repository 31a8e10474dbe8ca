//! Per-request document pipeline
//!
//! Composes scan, simplify or translate, rescan and annotate for a single
//! request. Each request runs inside its own tracing span tagged with a
//! fresh request id; the reports carry the same id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use legal_engine::{annotate, count_by_category, RiskScanner};
use serde::Serialize;
use shared_types::{RiskCategory, SimplificationLevel, Span, TierFailure};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::simplify::SimplificationOrchestrator;
use crate::translate::TranslationOrchestrator;

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub risks: Vec<Span>,
    pub counts: BTreeMap<RiskCategory, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimplifyReport {
    pub request_id: Uuid,
    pub level: SimplificationLevel,
    pub original_text: String,
    pub simplified_text: String,
    pub original_risks: Vec<Span>,
    pub simplified_risks: Vec<Span>,
    pub annotated_original: String,
    pub annotated_simplified: String,
    pub tier: String,
    pub failures: Vec<TierFailure>,
    pub truncated: bool,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateReport {
    pub request_id: Uuid,
    pub language: String,
    pub translated_text: String,
    pub risks: Vec<Span>,
    pub annotated_text: String,
    pub used_fallback: bool,
    pub tier: String,
    pub failures: Vec<TierFailure>,
    pub processed_at: DateTime<Utc>,
}

pub struct DocumentPipeline {
    scanner: RiskScanner,
    simplifier: SimplificationOrchestrator,
    translator: TranslationOrchestrator,
}

impl DocumentPipeline {
    /// Remote tiers as configured, with offline fallbacks behind them
    pub fn new(config: &PipelineConfig) -> Self {
        let client = reqwest::Client::new();
        Self::from_parts(
            SimplificationOrchestrator::new(config, client.clone()),
            TranslationOrchestrator::new(config, client),
        )
    }

    /// No network access at all
    pub fn offline(config: &PipelineConfig) -> Self {
        Self::from_parts(
            SimplificationOrchestrator::offline(config),
            TranslationOrchestrator::offline(),
        )
    }

    pub fn from_parts(
        simplifier: SimplificationOrchestrator,
        translator: TranslationOrchestrator,
    ) -> Self {
        Self {
            scanner: RiskScanner::new(),
            simplifier,
            translator,
        }
    }

    pub fn scan(&self, text: &str, with_markup: bool) -> ScanReport {
        let risks = self.scanner.scan(text);
        let counts = count_by_category(&risks);
        let annotated_text = with_markup.then(|| annotate(text, &risks));
        ScanReport {
            risks,
            counts,
            annotated_text,
        }
    }

    pub async fn simplify(&self, text: &str, level: SimplificationLevel) -> SimplifyReport {
        let request_id = Uuid::new_v4();
        let span = info_span!("simplify", %request_id, %level, chars = text.chars().count());

        async move {
            let original_risks = self.scanner.scan(text);
            let result = self.simplifier.simplify(text, level).await;
            let simplified_risks = self.scanner.scan(&result.text);

            info!(
                tier = result.tier,
                original_risks = original_risks.len(),
                simplified_risks = simplified_risks.len(),
                "Simplification complete"
            );

            SimplifyReport {
                request_id,
                level,
                original_text: text.to_string(),
                annotated_original: annotate(text, &original_risks),
                annotated_simplified: annotate(&result.text, &simplified_risks),
                simplified_text: result.text,
                original_risks,
                simplified_risks,
                tier: result.tier.to_string(),
                failures: result.failures,
                truncated: result.truncated,
                processed_at: Utc::now(),
            }
        }
        .instrument(span)
        .await
    }

    pub async fn translate(&self, text: &str, language: &str) -> TranslateReport {
        let request_id = Uuid::new_v4();
        let span = info_span!("translate", %request_id, language, chars = text.chars().count());

        async move {
            let result = self.translator.translate(text, language).await;
            let risks = self.scanner.scan(&result.text);

            info!(
                tier = result.tier,
                used_fallback = result.used_fallback,
                risks = risks.len(),
                "Translation complete"
            );

            TranslateReport {
                request_id,
                language: language.to_string(),
                annotated_text: annotate(&result.text, &risks),
                translated_text: result.text,
                risks,
                used_fallback: result.used_fallback,
                tier: result.tier.to_string(),
                failures: result.failures,
                processed_at: Utc::now(),
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn offline() -> DocumentPipeline {
        DocumentPipeline::offline(&PipelineConfig::default())
    }

    #[test]
    fn test_scan_report_counts() {
        let report = offline().scan("The party shall pay damages.", false);
        assert_eq!(report.risks.len(), 2);
        assert_eq!(report.counts[&RiskCategory::Obligation], 1);
        assert_eq!(report.counts[&RiskCategory::Penalty], 1);
        assert!(report.annotated_text.is_none());
    }

    #[test]
    fn test_scan_report_with_markup() {
        let report = offline().scan("The party shall pay.", true);
        let markup = report.annotated_text.unwrap();
        assert!(markup.contains(">shall</span>"));
    }

    #[tokio::test]
    async fn test_simplify_report_rescans_output() {
        let text = "The tenant shall pay rent. The tenant must not sublet.";
        let report = offline().simplify(text, SimplificationLevel::Simple).await;

        assert_eq!(report.original_text, text);
        assert_eq!(
            report.simplified_text,
            "The tenant will pay rent. The tenant have to not sublet."
        );
        assert!(report
            .original_risks
            .iter()
            .any(|s| s.category == RiskCategory::Obligation));
        assert!(report
            .simplified_risks
            .iter()
            .all(|s| s.category != RiskCategory::Obligation));
        assert!(report.annotated_original.contains("risk-obligation"));
        assert_eq!(report.tier, "rule_based");
        assert!(!report.truncated);
    }

    #[tokio::test]
    async fn test_translate_report_unsupported_language() {
        let report = offline().translate("Hello", "klingon").await;
        assert_eq!(report.translated_text, "[Translated to klingon] Hello");
        assert!(report.used_fallback);
        assert_eq!(report.language, "klingon");
    }

    #[tokio::test]
    async fn test_reports_serialize() {
        let report = offline().translate("The party shall pay.", "Hindi").await;
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["used_fallback"], serde_json::json!(true));
        assert_eq!(json["tier"], serde_json::json!("glossary"));
        assert_eq!(json["risks"][0]["category"], serde_json::json!("obligation"));
        assert!(json["request_id"].is_string());

        let scan = serde_json::to_value(offline().scan("The party shall pay.", false)).unwrap();
        assert_eq!(scan["counts"]["obligation"], serde_json::json!(1));
        assert!(scan.get("annotated_text").is_none());
    }
}
