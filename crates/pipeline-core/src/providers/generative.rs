//! Remote generative simplification (Hugging Face inference style)

use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use shared_types::{ProviderError, ProviderResult, SimplificationLevel};
use tracing::debug;

use super::{read_json, transport_error};
use crate::chain::ProviderTier;
use crate::config::GenerativeConfig;
use crate::simplify::SimplifyRequest;

pub const GENERATIVE_TIER: &str = "generative";

/// Boilerplate some models prepend to their answer
const ANSWER_PREFIX: &str = "Simplified text:";

/// Hosted inference rejects anonymous calls
const KEYED_HOST_SUFFIX: &str = "huggingface.co";

lazy_static! {
    static ref BLANK_LINE_RUN: Regex = Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").unwrap();
}

/// Instruction sent to the model with the text embedded
pub fn build_prompt(text: &str, level: SimplificationLevel) -> String {
    let style = match level {
        SimplificationLevel::Simple => "very simple everyday words",
        SimplificationLevel::Moderate => "plain language",
        SimplificationLevel::Advanced => "short plain sentences",
    };
    format!(
        "Rewrite the following legal text using {style} so that a non-lawyer can \
         understand it. Keep every obligation, amount and date.\n\n\
         Legal text:\n{text}\n\n{ANSWER_PREFIX}"
    )
}

/// Strip the echoed prompt and answer prefix, collapse blank line runs
pub fn clean_generation(generated: &str, prompt: &str) -> String {
    let mut output = generated.trim_start();
    if let Some(rest) = output.strip_prefix(prompt.trim_start()) {
        output = rest;
    }
    output = output.trim_start();
    if output
        .get(..ANSWER_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(ANSWER_PREFIX))
    {
        output = &output[ANSWER_PREFIX.len()..];
    }
    BLANK_LINE_RUN
        .replace_all(output.trim(), "\n\n")
        .into_owned()
}

fn requires_key(endpoint: &str) -> bool {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.ends_with(KEYED_HOST_SUFFIX)))
        .unwrap_or(false)
}

/// Pull `generated_text` out of `[{"generated_text": ..}]` or `{"generated_text": ..}`
fn extract_generated_text(payload: &Value) -> Option<&str> {
    let object = match payload {
        Value::Array(items) => items.first()?,
        other => other,
    };
    object.get("generated_text")?.as_str()
}

pub struct GenerativeTier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    requires_key: bool,
    timeout: Duration,
    max_new_tokens: u32,
    temperature: f32,
}

impl GenerativeTier {
    pub fn new(client: reqwest::Client, config: &GenerativeConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            requires_key: requires_key(&config.endpoint),
            timeout: config.timeout(),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderTier<SimplifyRequest> for GenerativeTier {
    fn name(&self) -> &'static str {
        GENERATIVE_TIER
    }

    async fn attempt(&self, request: &SimplifyRequest) -> ProviderResult {
        if self.requires_key && self.api_key.is_none() {
            return Err(ProviderError::NotConfigured("generative API key"));
        }

        let prompt = build_prompt(&request.text, request.level);
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.max_new_tokens,
                "temperature": self.temperature,
                "return_full_text": false,
            }
        });

        let mut call = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let response = call
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;
        let payload = read_json(response, self.timeout).await?;

        let generated = extract_generated_text(&payload).ok_or_else(|| {
            ProviderError::MalformedPayload("missing generated_text".to_string())
        })?;
        let cleaned = clean_generation(generated, &prompt);
        if cleaned.is_empty() {
            return Err(ProviderError::MalformedPayload(
                "empty generation".to_string(),
            ));
        }

        debug!(chars = cleaned.chars().count(), "Generative simplification received");
        Ok(cleaned)
    }
}
