use thiserror::Error;

/// Outcome of one fallback tier: the produced text, or why the tier failed
pub type ProviderResult = Result<String, ProviderError>;

/// Why a provider tier did not produce a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider timed out after {0}ms")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Unparseable provider payload: {0}")]
    MalformedPayload(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(&'static str),
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Timeout(_) => FailureKind::Timeout,
            ProviderError::Network(_) => FailureKind::Network,
            ProviderError::HttpStatus { .. } => FailureKind::HttpStatus,
            ProviderError::MalformedPayload(_) => FailureKind::MalformedPayload,
            ProviderError::UnsupportedLanguage(_) => FailureKind::UnsupportedLanguage,
            ProviderError::NotConfigured(_) => FailureKind::NotConfigured,
        }
    }

    /// HTTP 405: the endpoint rejected the submit-style call
    pub fn is_method_not_allowed(&self) -> bool {
        matches!(self, ProviderError::HttpStatus { status: 405 })
    }
}

/// Observability classification of a tier failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Network,
    HttpStatus,
    MalformedPayload,
    UnsupportedLanguage,
    NotConfigured,
}

/// A failed tier as recorded in a pipeline report
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TierFailure {
    pub tier: String,
    pub kind: FailureKind,
    pub message: String,
}

impl TierFailure {
    pub fn new(tier: &str, error: &ProviderError) -> Self {
        Self {
            tier: tier.to_string(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
