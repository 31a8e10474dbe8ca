//! Ordered provider fallback
//!
//! A [`FallbackChain`] holds uniform [`ProviderTier`]s and tries them in
//! order until one produces a value. Each tier gets exactly one attempt.
//! A tier can decline to run based on the failure of the tier before it,
//! which is how the read-style translation retry only fires after HTTP 405.

use async_trait::async_trait;
use shared_types::{ProviderError, ProviderResult, TierFailure};
use thiserror::Error;
use tracing::{debug, info, warn};

/// One strategy in a fallback chain
#[async_trait]
pub trait ProviderTier<Req: Sync>: Send + Sync {
    /// Stable name used in logs and reports
    fn name(&self) -> &'static str;

    /// Whether this tier runs, given the most recent failure in the chain
    fn applies(&self, _previous: Option<&ProviderError>) -> bool {
        true
    }

    async fn attempt(&self, request: &Req) -> ProviderResult;
}

/// Value produced by a chain, with the tier that produced it and the
/// failures of every tier tried before it
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome {
    pub value: String,
    pub tier: &'static str,
    pub failures: Vec<TierFailure>,
}

/// Every applicable tier failed
#[derive(Error, Debug, Clone, PartialEq)]
#[error("all {} attempted provider tiers failed", .failures.len())]
pub struct ChainExhausted {
    pub failures: Vec<TierFailure>,
}

pub struct FallbackChain<Req: Sync> {
    tiers: Vec<Box<dyn ProviderTier<Req>>>,
}

impl<Req: Sync> FallbackChain<Req> {
    pub fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Append a tier after the existing ones
    pub fn with_tier<T: ProviderTier<Req> + 'static>(mut self, tier: T) -> Self {
        self.tiers.push(Box::new(tier));
        self
    }

    pub fn push(&mut self, tier: Box<dyn ProviderTier<Req>>) {
        self.tiers.push(tier);
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|tier| tier.name()).collect()
    }

    /// Try each applicable tier in order and return the first success
    pub async fn run(&self, request: &Req) -> Result<ChainOutcome, ChainExhausted> {
        let mut failures = Vec::new();
        let mut previous: Option<ProviderError> = None;

        for tier in &self.tiers {
            let name = tier.name();
            if !tier.applies(previous.as_ref()) {
                debug!(tier = name, "Skipping provider tier");
                continue;
            }

            match tier.attempt(request).await {
                Ok(value) => {
                    info!(tier = name, failed_tiers = failures.len(), "Provider tier succeeded");
                    return Ok(ChainOutcome {
                        value,
                        tier: name,
                        failures,
                    });
                }
                Err(error) => {
                    warn!(tier = name, kind = ?error.kind(), error = %error, "Provider tier failed");
                    failures.push(TierFailure::new(name, &error));
                    previous = Some(error);
                }
            }
        }

        Err(ChainExhausted { failures })
    }
}

impl<Req: Sync> Default for FallbackChain<Req> {
    fn default() -> Self {
        Self::new()
    }
}
