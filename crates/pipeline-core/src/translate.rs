//! Translation through remote tiers with a glossary fallback
//!
//! Tier order: submit call, read-style retry (after HTTP 405 only), the
//! optional secondary backend, then the glossary. The glossary tier cannot
//! fail, so a translation is always produced.

use std::sync::Arc;

use async_trait::async_trait;
use legal_engine::MockTranslator;
use serde::Serialize;
use shared_types::{ProviderError, ProviderResult, SupportedLanguage, TierFailure};
use tracing::{info, warn};

use crate::chain::{FallbackChain, ProviderTier};
use crate::config::PipelineConfig;
use crate::providers::{
    HttpSecondaryTranslator, SecondaryTier, SecondaryTranslator, TranslationReadTier,
    TranslationSubmitTier,
};

pub const GLOSSARY_TIER: &str = "glossary";

/// Recorded when the target language is outside the supported set
pub const LANGUAGE_CHECK: &str = "language";

#[derive(Debug, Clone, PartialEq)]
pub struct TranslateRequest {
    pub text: String,
    pub language: SupportedLanguage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub text: String,
    /// True iff the glossary tier produced the text
    pub used_fallback: bool,
    pub tier: &'static str,
    pub failures: Vec<TierFailure>,
}

/// Terminal tier: glossary substitution plus a language marker
#[derive(Debug, Clone, Copy, Default)]
pub struct GlossaryTier {
    translator: MockTranslator,
}

#[async_trait]
impl ProviderTier<TranslateRequest> for GlossaryTier {
    fn name(&self) -> &'static str {
        GLOSSARY_TIER
    }

    async fn attempt(&self, request: &TranslateRequest) -> ProviderResult {
        Ok(self
            .translator
            .translate_supported(&request.text, request.language))
    }
}

pub struct TranslationOrchestrator {
    chain: FallbackChain<TranslateRequest>,
}

impl TranslationOrchestrator {
    /// Full chain from configuration. The secondary backend joins only when
    /// its section is present.
    pub fn new(config: &PipelineConfig, client: reqwest::Client) -> Self {
        let secondary = config.secondary.as_ref().map(|secondary| {
            Arc::new(HttpSecondaryTranslator::new(client.clone(), secondary))
                as Arc<dyn SecondaryTranslator>
        });
        Self::with_secondary(config, client, secondary)
    }

    /// Full chain with a caller-supplied secondary backend
    pub fn with_secondary(
        config: &PipelineConfig,
        client: reqwest::Client,
        secondary: Option<Arc<dyn SecondaryTranslator>>,
    ) -> Self {
        let mut chain = FallbackChain::new();
        if config.translation.enabled {
            chain.push(Box::new(TranslationSubmitTier::new(
                client.clone(),
                &config.translation,
            )));
            chain.push(Box::new(TranslationReadTier::new(client, &config.translation)));
        }
        if let Some(translator) = secondary {
            chain.push(Box::new(SecondaryTier::new(translator)));
        }
        chain.push(Box::new(GlossaryTier::default()));
        Self::from_chain(chain)
    }

    /// Glossary tier only
    pub fn offline() -> Self {
        Self::from_chain(FallbackChain::new().with_tier(GlossaryTier::default()))
    }

    pub fn from_chain(chain: FallbackChain<TranslateRequest>) -> Self {
        Self { chain }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.chain.tier_names()
    }

    /// Translate `text` into `language` (name or code). Never fails and
    /// never returns an empty string.
    pub async fn translate(&self, text: &str, language: &str) -> Translation {
        let glossary = MockTranslator::new();

        let target = match SupportedLanguage::lookup(language) {
            Some(target) => target,
            None => {
                let error = ProviderError::UnsupportedLanguage(language.to_string());
                warn!(language, "Unsupported target language, using generic marker");
                return Translation {
                    text: glossary.translate(text, language),
                    used_fallback: true,
                    tier: GLOSSARY_TIER,
                    failures: vec![TierFailure::new(LANGUAGE_CHECK, &error)],
                };
            }
        };

        if text.trim().is_empty() {
            return Translation {
                text: glossary.translate_supported(text, target),
                used_fallback: true,
                tier: GLOSSARY_TIER,
                failures: Vec::new(),
            };
        }

        let request = TranslateRequest {
            text: text.to_string(),
            language: target,
        };

        match self.chain.run(&request).await {
            Ok(outcome) => {
                info!(tier = outcome.tier, language = target.code(), "Translation produced");
                Translation {
                    used_fallback: outcome.tier == GLOSSARY_TIER,
                    text: outcome.value,
                    tier: outcome.tier,
                    failures: outcome.failures,
                }
            }
            Err(exhausted) => {
                warn!(error = %exhausted, "Translation chain exhausted, using glossary");
                Translation {
                    text: glossary.translate_supported(text, target),
                    used_fallback: true,
                    tier: GLOSSARY_TIER,
                    failures: exhausted.failures,
                }
            }
        }
    }
}
