//! Remote translation (LibreTranslate style)
//!
//! The endpoint's response shape is not guaranteed, so the payload parser
//! accepts every shape seen from compatible services. Some deployments only
//! accept GET; the read tier repeats the call that way after an HTTP 405.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use shared_types::{ProviderError, ProviderResult};

use super::{read_json, transport_error};
use crate::chain::ProviderTier;
use crate::config::TranslationConfig;
use crate::translate::TranslateRequest;

pub const TRANSLATION_SUBMIT_TIER: &str = "translation_submit";
pub const TRANSLATION_READ_TIER: &str = "translation_read";

/// Flat fields that carry the translated text directly
const TEXT_FIELDS: &[&str] = &["translatedText", "translated_text"];
/// List fields whose first element carries the translated text
const LIST_FIELDS: &[&str] = &["translations", "result"];

/// Extract the translated text from a response payload.
///
/// Tried in order: `translatedText`, `translated_text`, `translations[0]`,
/// `result[0]`, each list element either a string or an object with `text`
/// or a flat field. A top-level array is read through its first object.
pub fn parse_translation_payload(payload: &Value) -> Option<String> {
    match payload {
        Value::Object(map) => from_object(map),
        Value::Array(items) => items.first()?.as_object().and_then(from_object),
        _ => None,
    }
}

fn from_object(map: &Map<String, Value>) -> Option<String> {
    if let Some(text) = flat_field(map) {
        return Some(text);
    }

    for field in LIST_FIELDS {
        let first = match map.get(*field).and_then(Value::as_array).and_then(|a| a.first()) {
            Some(first) => first,
            None => continue,
        };
        let text = match first {
            Value::String(text) => non_empty(text),
            Value::Object(inner) => inner
                .get("text")
                .and_then(Value::as_str)
                .and_then(non_empty)
                .or_else(|| flat_field(inner)),
            _ => None,
        };
        if text.is_some() {
            return text;
        }
    }

    None
}

fn flat_field(map: &Map<String, Value>) -> Option<String> {
    TEXT_FIELDS
        .iter()
        .find_map(|field| map.get(*field).and_then(Value::as_str).and_then(non_empty))
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Request parameters shared by the submit and read calls
#[derive(Debug, Serialize)]
struct TranslateParams<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Shared endpoint settings for both call styles
#[derive(Clone)]
struct Endpoint {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    source_language: String,
    timeout: Duration,
}

impl Endpoint {
    fn new(client: reqwest::Client, config: &TranslationConfig) -> Self {
        Self {
            client,
            url: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            source_language: config.source_language.clone(),
            timeout: config.timeout(),
        }
    }

    fn params<'a>(&'a self, request: &'a TranslateRequest) -> TranslateParams<'a> {
        TranslateParams {
            q: &request.text,
            source: &self.source_language,
            target: request.language.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }

    async fn finish(&self, call: reqwest::RequestBuilder) -> ProviderResult {
        let response = call
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;
        let payload = read_json(response, self.timeout).await?;
        parse_translation_payload(&payload).ok_or_else(|| {
            ProviderError::MalformedPayload("no translated text in response".to_string())
        })
    }
}

/// Submit-style (POST, JSON body) translation call
pub struct TranslationSubmitTier {
    endpoint: Endpoint,
}

impl TranslationSubmitTier {
    pub fn new(client: reqwest::Client, config: &TranslationConfig) -> Self {
        Self {
            endpoint: Endpoint::new(client, config),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.endpoint.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderTier<TranslateRequest> for TranslationSubmitTier {
    fn name(&self) -> &'static str {
        TRANSLATION_SUBMIT_TIER
    }

    async fn attempt(&self, request: &TranslateRequest) -> ProviderResult {
        let params = self.endpoint.params(request);
        let call = self.endpoint.client.post(&self.endpoint.url).json(&params);
        self.endpoint.finish(call).await
    }
}

/// Read-style (GET, query string) retry, only after the submit call got HTTP 405
pub struct TranslationReadTier {
    endpoint: Endpoint,
}

impl TranslationReadTier {
    pub fn new(client: reqwest::Client, config: &TranslationConfig) -> Self {
        Self {
            endpoint: Endpoint::new(client, config),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.endpoint.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderTier<TranslateRequest> for TranslationReadTier {
    fn name(&self) -> &'static str {
        TRANSLATION_READ_TIER
    }

    fn applies(&self, previous: Option<&ProviderError>) -> bool {
        previous.is_some_and(ProviderError::is_method_not_allowed)
    }

    async fn attempt(&self, request: &TranslateRequest) -> ProviderResult {
        let params = self.endpoint.params(request);
        let call = self.endpoint.client.get(&self.endpoint.url).query(&params);
        self.endpoint.finish(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(payload: Value) -> Option<String> {
        parse_translation_payload(&payload)
    }

    #[test]
    fn test_parse_flat_fields() {
        assert_eq!(parse(json!({"translatedText": "नमस्ते"})).as_deref(), Some("नमस्ते"));
        assert_eq!(parse(json!({"translated_text": "hola"})).as_deref(), Some("hola"));
    }

    #[test]
    fn test_parse_priority_order() {
        let payload = json!({
            "result": ["from result"],
            "translations": [{"text": "from translations"}],
            "translated_text": "from snake case",
        });
        assert_eq!(parse(payload).as_deref(), Some("from snake case"));

        let payload = json!({
            "result": ["from result"],
            "translations": [{"text": "from translations"}],
        });
        assert_eq!(parse(payload).as_deref(), Some("from translations"));
    }

    #[test]
    fn test_parse_list_elements() {
        assert_eq!(parse(json!({"translations": ["plain"]})).as_deref(), Some("plain"));
        assert_eq!(
            parse(json!({"result": [{"translatedText": "nested"}]})).as_deref(),
            Some("nested")
        );
        assert_eq!(parse(json!({"result": [{"text": "t"}]})).as_deref(), Some("t"));
    }

    #[test]
    fn test_parse_top_level_array() {
        assert_eq!(
            parse(json!([{"translatedText": "first"}, {"translatedText": "second"}])).as_deref(),
            Some("first")
        );
        assert_eq!(parse(json!(["bare string"])), None);
    }

    #[test]
    fn test_parse_rejects_unusable_payloads() {
        assert_eq!(parse(json!({"error": "rate limited"})), None);
        assert_eq!(parse(json!({"translatedText": ""})), None);
        assert_eq!(parse(json!({"translations": []})), None);
        assert_eq!(parse(json!("just a string")), None);
        assert_eq!(parse(json!(null)), None);
    }

    #[test]
    fn test_read_tier_only_after_405() {
        let tier = TranslationReadTier::new(reqwest::Client::new(), &TranslationConfig::default());
        assert!(tier.applies(Some(&ProviderError::HttpStatus { status: 405 })));
        assert!(!tier.applies(Some(&ProviderError::HttpStatus { status: 500 })));
        assert!(!tier.applies(Some(&ProviderError::Timeout(10))));
        assert!(!tier.applies(None));
    }
}
