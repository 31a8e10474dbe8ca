//! Simplification with remote-first, rule-based fallback
//!
//! Never fails: when every remote tier is down the deterministic
//! [`RuleBasedSimplifier`] produces the result without touching the network.

use async_trait::async_trait;
use legal_engine::RuleBasedSimplifier;
use serde::Serialize;
use shared_types::{ProviderResult, SimplificationLevel, TierFailure};
use tracing::{debug, warn};

use crate::chain::{FallbackChain, ProviderTier};
use crate::config::PipelineConfig;
use crate::providers::GenerativeTier;

pub const RULE_BASED_TIER: &str = "rule_based";

/// Appended to input cut at the length limit
pub const TRUNCATION_MARKER: &str = " [... text truncated for processing]";

#[derive(Debug, Clone, PartialEq)]
pub struct SimplifyRequest {
    pub text: String,
    pub level: SimplificationLevel,
}

/// Simplified text plus how it was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simplification {
    pub text: String,
    pub tier: &'static str,
    pub failures: Vec<TierFailure>,
    /// Input exceeded the length limit and was cut before processing
    pub truncated: bool,
}

/// Terminal tier: deterministic, offline, infallible
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedTier {
    simplifier: RuleBasedSimplifier,
}

#[async_trait]
impl ProviderTier<SimplifyRequest> for RuleBasedTier {
    fn name(&self) -> &'static str {
        RULE_BASED_TIER
    }

    async fn attempt(&self, request: &SimplifyRequest) -> ProviderResult {
        Ok(self.simplifier.simplify(&request.text, request.level))
    }
}

/// Cut `text` to `max_chars` characters plus the truncation marker.
/// Returns the text unchanged when it fits.
pub fn truncate_input(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (format!("{}{}", &text[..cut], TRUNCATION_MARKER), true),
        None => (text.to_string(), false),
    }
}

/// Keep the truncation marker at the end of output produced from cut input
fn mark_truncated(mut text: String, truncated: bool) -> String {
    if truncated && !text.ends_with(TRUNCATION_MARKER) {
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

pub struct SimplificationOrchestrator {
    chain: FallbackChain<SimplifyRequest>,
    max_input_chars: usize,
}

impl SimplificationOrchestrator {
    /// Remote generative tier (when enabled) followed by the rule-based tier
    pub fn new(config: &PipelineConfig, client: reqwest::Client) -> Self {
        let mut chain = FallbackChain::new();
        if config.generative.enabled {
            chain.push(Box::new(GenerativeTier::new(client, &config.generative)));
        }
        chain.push(Box::new(RuleBasedTier::default()));
        Self::from_chain(chain, config.generative.max_input_chars)
    }

    /// Rule-based tier only
    pub fn offline(config: &PipelineConfig) -> Self {
        Self::from_chain(
            FallbackChain::new().with_tier(RuleBasedTier::default()),
            config.generative.max_input_chars,
        )
    }

    pub fn from_chain(chain: FallbackChain<SimplifyRequest>, max_input_chars: usize) -> Self {
        Self {
            chain,
            max_input_chars,
        }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.chain.tier_names()
    }

    pub async fn simplify(&self, text: &str, level: SimplificationLevel) -> Simplification {
        if text.trim().is_empty() {
            return Simplification {
                text: text.to_string(),
                tier: RULE_BASED_TIER,
                failures: Vec::new(),
                truncated: false,
            };
        }

        let (input, truncated) = truncate_input(text, self.max_input_chars);
        if truncated {
            debug!(limit = self.max_input_chars, "Truncated simplification input");
        }
        let request = SimplifyRequest { text: input, level };

        match self.chain.run(&request).await {
            Ok(outcome) => Simplification {
                text: mark_truncated(outcome.value, truncated),
                tier: outcome.tier,
                failures: outcome.failures,
                truncated,
            },
            Err(exhausted) => {
                warn!(error = %exhausted, "Simplification chain exhausted, using rule-based path");
                Simplification {
                    text: mark_truncated(
                        RuleBasedSimplifier::new().simplify(&request.text, level),
                        truncated,
                    ),
                    tier: RULE_BASED_TIER,
                    failures: exhausted.failures,
                    truncated,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{FailureKind, ProviderError};

    struct Unreachable;

    #[async_trait]
    impl ProviderTier<SimplifyRequest> for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn attempt(&self, _request: &SimplifyRequest) -> ProviderResult {
            Err(ProviderError::Network("connection refused".into()))
        }
    }

    /// Echoes its input so truncation is observable
    struct Echo;

    #[async_trait]
    impl ProviderTier<SimplifyRequest> for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn attempt(&self, request: &SimplifyRequest) -> ProviderResult {
            Ok(request.text.clone())
        }
    }

    #[test]
    fn test_truncate_within_limit() {
        assert_eq!(truncate_input("short", 10), ("short".to_string(), false));
        assert_eq!(truncate_input("exact", 5), ("exact".to_string(), false));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let (cut, truncated) = truncate_input("दंड shall", 2);
        assert!(truncated);
        assert_eq!(cut, format!("दं{}", TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_offline_never_calls_remote() {
        let orchestrator = SimplificationOrchestrator::offline(&PipelineConfig::default());
        assert_eq!(orchestrator.tier_names(), vec![RULE_BASED_TIER]);

        let result = orchestrator
            .simplify(
                "The party shall indemnify and hold harmless the other party.",
                SimplificationLevel::Simple,
            )
            .await;
        assert_eq!(result.text, "The party will protect from losses the other party.");
        assert_eq!(result.tier, RULE_BASED_TIER);
        assert!(result.failures.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back() {
        let chain = FallbackChain::new()
            .with_tier(Unreachable)
            .with_tier(RuleBasedTier::default());
        let orchestrator = SimplificationOrchestrator::from_chain(chain, 4000);

        let result = orchestrator
            .simplify("Rent shall be paid.", SimplificationLevel::Simple)
            .await;
        assert_eq!(result.text, "Rent will be paid.");
        assert_eq!(result.tier, RULE_BASED_TIER);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, FailureKind::Network);
    }

    #[tokio::test]
    async fn test_exhausted_chain_still_simplifies() {
        let chain = FallbackChain::new().with_tier(Unreachable);
        let orchestrator = SimplificationOrchestrator::from_chain(chain, 4000);

        let result = orchestrator
            .simplify("Rent shall be paid.", SimplificationLevel::Simple)
            .await;
        assert_eq!(result.text, "Rent will be paid.");
        assert_eq!(result.tier, RULE_BASED_TIER);
        assert_eq!(result.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_long_input_truncated_before_tiers() {
        let orchestrator =
            SimplificationOrchestrator::from_chain(FallbackChain::new().with_tier(Echo), 10);
        let result = orchestrator
            .simplify("abcdefghijklmnop", SimplificationLevel::Simple)
            .await;
        assert!(result.truncated);
        assert_eq!(result.text, format!("abcdefghij{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_marker_appended_once() {
        assert_eq!(mark_truncated("Pay rent.".into(), false), "Pay rent.");
        assert_eq!(
            mark_truncated("Pay rent.".into(), true),
            format!("Pay rent.{}", TRUNCATION_MARKER)
        );
        let marked = format!("abc{}", TRUNCATION_MARKER);
        assert_eq!(mark_truncated(marked.clone(), true), marked);
    }

    #[tokio::test]
    async fn test_blank_input_is_identity() {
        let chain = FallbackChain::new().with_tier(Unreachable);
        let orchestrator = SimplificationOrchestrator::from_chain(chain, 4000);
        let result = orchestrator.simplify("  ", SimplificationLevel::Advanced).await;
        assert_eq!(result.text, "  ");
        assert!(result.failures.is_empty());
    }
}
