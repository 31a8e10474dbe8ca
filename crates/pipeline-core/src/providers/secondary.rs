//! Secondary translation backend
//!
//! Any service with a plain `translate(text, target_code) -> text` contract
//! can sit behind [`SecondaryTranslator`]. The bundled implementation talks
//! to a MyMemory style endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{ProviderError, ProviderResult};

use super::{read_json, transport_error};
use crate::chain::ProviderTier;
use crate::config::SecondaryConfig;
use crate::translate::TranslateRequest;

pub const SECONDARY_TIER: &str = "secondary";

#[async_trait]
pub trait SecondaryTranslator: Send + Sync {
    async fn translate(&self, text: &str, target_code: &str) -> ProviderResult;
}

/// `GET ?q=..&langpair=en|xx`, answer in `responseData.translatedText`
pub struct HttpSecondaryTranslator {
    client: reqwest::Client,
    endpoint: String,
    source_language: String,
    timeout: Duration,
}

impl HttpSecondaryTranslator {
    pub fn new(client: reqwest::Client, config: &SecondaryConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            source_language: config.source_language.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SecondaryTranslator for HttpSecondaryTranslator {
    async fn translate(&self, text: &str, target_code: &str) -> ProviderResult {
        let langpair = format!("{}|{}", self.source_language, target_code);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;
        let payload = read_json(response, self.timeout).await?;

        // Errors can arrive with HTTP 200 and the real status in the body
        if let Some(status) = embedded_status(&payload) {
            if !(200..300).contains(&status) {
                return Err(ProviderError::HttpStatus { status });
            }
        }

        payload
            .pointer("/responseData/translatedText")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::MalformedPayload("missing responseData.translatedText".to_string())
            })
    }
}

/// `responseStatus` as a number or a numeric string
fn embedded_status(payload: &Value) -> Option<u16> {
    match payload.get("responseStatus")? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Adapts a [`SecondaryTranslator`] into a chain tier
pub struct SecondaryTier {
    translator: Arc<dyn SecondaryTranslator>,
}

impl SecondaryTier {
    pub fn new(translator: Arc<dyn SecondaryTranslator>) -> Self {
        Self { translator }
    }
}

#[async_trait]
impl ProviderTier<TranslateRequest> for SecondaryTier {
    fn name(&self) -> &'static str {
        SECONDARY_TIER
    }

    async fn attempt(&self, request: &TranslateRequest) -> ProviderResult {
        self.translator
            .translate(&request.text, request.language.code())
            .await
    }
}
