pub mod language;
pub mod offsets;
pub mod provider;
pub mod types;

pub use language::SupportedLanguage;
pub use offsets::CharMap;
pub use provider::{FailureKind, ProviderError, ProviderResult, TierFailure};
pub use types::{ParseLevelError, RiskCategory, SimplificationLevel, Span, UnknownCategoryError};
