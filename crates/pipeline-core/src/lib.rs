//! Request pipelines over the deterministic legal engine
//!
//! Remote simplification and translation providers are arranged in
//! [`chain::FallbackChain`]s ending in an offline tier, so every request
//! produces a result whatever the state of the network.

pub mod chain;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod simplify;
pub mod translate;

pub use chain::{ChainExhausted, ChainOutcome, FallbackChain, ProviderTier};
pub use config::{GenerativeConfig, PipelineConfig, SecondaryConfig, TranslationConfig};
pub use error::ConfigError;
pub use pipeline::{DocumentPipeline, ScanReport, SimplifyReport, TranslateReport};
pub use simplify::{Simplification, SimplificationOrchestrator, SimplifyRequest};
pub use translate::{TranslateRequest, Translation, TranslationOrchestrator};
