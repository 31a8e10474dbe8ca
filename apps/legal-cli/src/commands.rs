use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pipeline_core::{DocumentPipeline, PipelineConfig};
use serde::Serialize;
use shared_types::{SimplificationLevel, SupportedLanguage};
use tracing::debug;

/// Load the config file, or defaults with API keys from the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(path),
        None => {
            let mut config = PipelineConfig::default();
            config.resolve_api_keys();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Read the whole input file, or stdin when no path is given
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

pub fn scan(config: &PipelineConfig, text: &str, annotate: bool) -> anyhow::Result<String> {
    let report = DocumentPipeline::offline(config).scan(text, annotate);
    debug!(risks = report.risks.len(), "Scan finished");
    to_json(&report)
}

pub async fn simplify(
    config: &PipelineConfig,
    text: &str,
    level: SimplificationLevel,
    offline: bool,
) -> anyhow::Result<String> {
    let report = pipeline(config, offline).simplify(text, level).await;
    to_json(&report)
}

pub async fn translate(
    config: &PipelineConfig,
    text: &str,
    language: &str,
    offline: bool,
) -> anyhow::Result<String> {
    let report = pipeline(config, offline).translate(text, language).await;
    to_json(&report)
}

#[derive(Serialize)]
struct LanguageEntry {
    name: &'static str,
    code: &'static str,
}

pub fn languages() -> anyhow::Result<String> {
    let entries: Vec<LanguageEntry> = SupportedLanguage::ALL
        .iter()
        .map(|language| LanguageEntry {
            name: language.name(),
            code: language.code(),
        })
        .collect();
    to_json(&entries)
}

fn pipeline(config: &PipelineConfig, offline: bool) -> DocumentPipeline {
    if offline {
        DocumentPipeline::offline(config)
    } else {
        DocumentPipeline::new(config)
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_scan_output() {
        let output = scan(&PipelineConfig::default(), "The party shall pay damages.", true).unwrap();
        let json = parse(&output);
        assert_eq!(json["risks"][0]["text"], "shall");
        assert_eq!(json["risks"][0]["start"], 10);
        assert_eq!(json["risks"][1]["category"], "penalty");
        assert!(json["annotated_text"].as_str().unwrap().contains("risk-penalty"));
    }

    #[tokio::test]
    async fn test_offline_simplify_output() {
        let output = simplify(
            &PipelineConfig::default(),
            "Notwithstanding the above, the buyer shall pay.",
            SimplificationLevel::Simple,
            true,
        )
        .await
        .unwrap();
        let json = parse(&output);
        assert_eq!(json["simplified_text"], "Despite the above, the buyer will pay.");
        assert_eq!(json["level"], "simple");
        assert_eq!(json["tier"], "rule_based");
    }

    #[tokio::test]
    async fn test_offline_translate_output() {
        let output = translate(&PipelineConfig::default(), "Hello", "klingon", true)
            .await
            .unwrap();
        let json = parse(&output);
        assert_eq!(json["translated_text"], "[Translated to klingon] Hello");
        assert_eq!(json["used_fallback"], true);
    }

    #[test]
    fn test_languages_output() {
        let json = parse(&languages().unwrap());
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 21);
        assert_eq!(entries[0]["name"], "Hindi");
        assert_eq!(entries[0]["code"], "hi");
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/pipeline.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_input(Some(Path::new("/nonexistent/contract.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
