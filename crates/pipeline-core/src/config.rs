//! Pipeline configuration
//!
//! TOML configuration for the remote providers. Every section is optional
//! and falls back to public endpoints with conservative timeouts. API keys
//! never live in the file: each section names the environment variable
//! holding its key, resolved once at load time.
//!
//! A loaded configuration is immutable and passed by reference into each
//! orchestrator, so concurrent requests can never observe a half-updated
//! endpoint.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Remote generative simplification backend
    #[serde(default)]
    pub generative: GenerativeConfig,
    /// Primary remote translation backend
    #[serde(default)]
    pub translation: TranslationConfig,
    /// Optional secondary translation backend, tried after the primary
    #[serde(default)]
    pub secondary: Option<SecondaryConfig>,
}

impl PipelineConfig {
    /// Load, resolve API keys from the environment, and validate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - A value fails [`PipelineConfig::validate`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range
    ///
    /// # Example
    ///
    /// ```
    /// use pipeline_core::config::PipelineConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = PipelineConfig::from_str(r#"
    ///     [generative]
    ///     timeout_secs = 10
    ///
    ///     [translation]
    ///     endpoint = "http://localhost:5000/translate"
    /// "#)?;
    /// assert_eq!(config.generative.timeout_secs, 10);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.resolve_api_keys();
        config.validate()?;
        Ok(config)
    }

    /// Read each section's API key from the environment variable it names.
    /// Unset or blank variables leave the key empty.
    pub fn resolve_api_keys(&mut self) {
        self.generative.api_key = read_key(&self.generative.api_key_env);
        self.translation.api_key = read_key(&self.translation.api_key_env);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let generative = &self.generative;
        check_endpoint("generative.endpoint", &generative.endpoint)?;
        check_positive("generative.timeout_secs", generative.timeout_secs)?;
        check_positive("generative.max_new_tokens", generative.max_new_tokens as u64)?;
        check_positive("generative.max_input_chars", generative.max_input_chars as u64)?;
        if !(0.0..=2.0).contains(&generative.temperature) {
            return Err(ConfigError::OutOfRange {
                field: "generative.temperature",
                min: 0.0,
                max: 2.0,
                value: generative.temperature,
            });
        }

        check_endpoint("translation.endpoint", &self.translation.endpoint)?;
        check_positive("translation.timeout_secs", self.translation.timeout_secs)?;

        if let Some(secondary) = &self.secondary {
            check_endpoint("secondary.endpoint", &secondary.endpoint)?;
            check_positive("secondary.timeout_secs", secondary.timeout_secs)?;
        }

        Ok(())
    }
}

/// Hugging Face style inference endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// Set to false to always take the rule-based path
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_generative_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the bearer token
    #[serde(default = "default_generative_key_env")]
    pub api_key_env: String,
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Request timeout (default: 30)
    #[serde(default = "default_generative_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Longer input is truncated before simplification (default: 4000)
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl GenerativeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_generative_endpoint(),
            api_key_env: default_generative_key_env(),
            api_key: None,
            timeout_secs: default_generative_timeout(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

/// LibreTranslate style endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_translation_key_env")]
    pub api_key_env: String,
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Language code of the input text (default: "en")
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_translation_timeout")]
    pub timeout_secs: u64,
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_translation_endpoint(),
            api_key_env: default_translation_key_env(),
            api_key: None,
            source_language: default_source_language(),
            timeout_secs: default_translation_timeout(),
        }
    }
}

/// MyMemory style endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryConfig {
    #[serde(default = "default_secondary_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_secondary_timeout")]
    pub timeout_secs: u64,
}

impl SecondaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_secondary_endpoint(),
            source_language: default_source_language(),
            timeout_secs: default_secondary_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_generative_endpoint() -> String {
    "https://api-inference.huggingface.co/models/google/flan-t5-large".to_string()
}

fn default_generative_key_env() -> String {
    "HF_API_TOKEN".to_string()
}

fn default_generative_timeout() -> u64 {
    30
}

fn default_max_new_tokens() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_input_chars() -> usize {
    4000
}

fn default_translation_endpoint() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_translation_key_env() -> String {
    "LIBRETRANSLATE_API_KEY".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_translation_timeout() -> u64 {
    15
}

fn default_secondary_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_secondary_timeout() -> u64 {
    10
}

fn read_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn check_positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Zero { field })
    } else {
        Ok(())
    }
}

fn check_endpoint(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpoint {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PipelineConfig::from_str("").unwrap();
        assert!(config.generative.enabled);
        assert_eq!(config.generative.timeout_secs, 30);
        assert_eq!(config.generative.max_input_chars, 4000);
        assert_eq!(config.generative.max_new_tokens, 512);
        assert_eq!(config.translation.source_language, "en");
        assert_eq!(config.translation.timeout(), Duration::from_secs(15));
        assert!(config.secondary.is_none());
    }

    #[test]
    fn test_parse_all_sections() {
        let toml = r#"
            [generative]
            endpoint = "http://localhost:8080/generate"
            timeout_secs = 5
            temperature = 0.7
            max_input_chars = 1000

            [translation]
            enabled = false
            endpoint = "http://localhost:5000/translate"
            source_language = "en"

            [secondary]
            timeout_secs = 3
        "#;
        let config = PipelineConfig::from_str(toml).unwrap();
        assert_eq!(config.generative.endpoint, "http://localhost:8080/generate");
        assert_eq!(config.generative.timeout(), Duration::from_secs(5));
        assert_eq!(config.generative.max_input_chars, 1000);
        assert!(!config.translation.enabled);

        let secondary = config.secondary.unwrap();
        assert_eq!(secondary.endpoint, "https://api.mymemory.translated.net/get");
        assert_eq!(secondary.timeout_secs, 3);
    }

    #[test]
    fn test_example_config_parses() {
        let config =
            PipelineConfig::from_str(include_str!("../../../config/pipeline.example.toml")).unwrap();
        assert!(config.secondary.is_some());
        assert_eq!(config.translation.api_key_env, "LIBRETRANSLATE_API_KEY");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = PipelineConfig::from_str("[generative]\ntimeout_secs = 0").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::Zero {
                field: "generative.timeout_secs"
            })
        );
    }

    #[test]
    fn test_zero_input_limit_rejected() {
        let mut config = PipelineConfig::default();
        config.generative.max_input_chars = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero {
                field: "generative.max_input_chars"
            })
        );
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let mut config = PipelineConfig::default();
        config.translation.endpoint = "/translate".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint {
                field: "translation.endpoint",
                ..
            })
        ));

        config.translation.endpoint = "ftp://example.com/translate".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_range() {
        let mut config = PipelineConfig::default();
        config.generative.temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = PipelineConfig::from_str("[generative\ntimeout_secs = 1").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_api_key_from_named_variable() {
        let toml = r#"
            [generative]
            api_key_env = "PIPELINE_CORE_TEST_GENERATIVE_KEY"

            [translation]
            api_key_env = "PIPELINE_CORE_TEST_UNSET_KEY"
        "#;
        std::env::set_var("PIPELINE_CORE_TEST_GENERATIVE_KEY", " secret ");
        let config = PipelineConfig::from_str(toml).unwrap();
        std::env::remove_var("PIPELINE_CORE_TEST_GENERATIVE_KEY");

        assert_eq!(config.generative.api_key.as_deref(), Some("secret"));
        assert_eq!(config.translation.api_key, None);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = PipelineConfig::default();
        config.generative.api_key = Some("secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
