//! Remote provider tiers
//!
//! Every remote call is a single request bounded by the tier's timeout.
//! Transport errors, non-2xx statuses and unusable bodies all come back as
//! [`ProviderError`] so the chain can move on to the next tier.

pub mod generative;
pub mod secondary;
pub mod translation;

use std::time::Duration;

use serde_json::Value;
use shared_types::ProviderError;

pub use generative::GenerativeTier;
pub use secondary::{HttpSecondaryTranslator, SecondaryTier, SecondaryTranslator};
pub use translation::{parse_translation_payload, TranslationReadTier, TranslationSubmitTier};

/// Map a reqwest failure onto the tier failure taxonomy
pub(crate) fn transport_error(error: reqwest::Error, timeout: Duration) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout.as_millis() as u64)
    } else {
        ProviderError::Network(error.to_string())
    }
}

/// Reject non-2xx responses, then read the body as JSON
pub(crate) async fn read_json(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<Value, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout))?;
    serde_json::from_str(&body).map_err(|e| ProviderError::MalformedPayload(e.to_string()))
}
