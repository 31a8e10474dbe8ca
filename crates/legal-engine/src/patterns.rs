//! Risk pattern table
//!
//! Fixed category → pattern mapping. Patterns are regex sources matched
//! case-insensitively on word boundaries; a space inside a pattern matches any
//! run of whitespace so phrases survive line breaks from text extraction.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::RiskCategory;
use tracing::warn;

/// Obligation language
pub const OBLIGATION_PATTERNS: &[&str] = &[
    "shall",
    "must",
    "is required to",
    "are obligated to",
    "duty to",
];

/// Penalty / liability language
pub const PENALTY_PATTERNS: &[&str] = &[
    "penalty",
    "fine",
    "damages",
    "liable",
    "indemnify",
    "breach",
];

/// Conditional language
pub const CONDITION_PATTERNS: &[&str] = &[
    "if",
    "unless",
    "provided that",
    "subject to",
    "conditional upon",
];

/// Rights and permissions
pub const RIGHT_PATTERNS: &[&str] = &["may", "entitled to", "right", "option", "privilege"];

/// Definitions
pub const DEFINITION_PATTERNS: &[&str] = &[
    "means",
    "refers to",
    "defined as",
    "hereinafter",
    "for the purposes of",
];

/// Category table in scanner iteration order
pub const RISK_PATTERNS: &[(RiskCategory, &[&str])] = &[
    (RiskCategory::Obligation, OBLIGATION_PATTERNS),
    (RiskCategory::Penalty, PENALTY_PATTERNS),
    (RiskCategory::Condition, CONDITION_PATTERNS),
    (RiskCategory::Right, RIGHT_PATTERNS),
    (RiskCategory::Definition, DEFINITION_PATTERNS),
];

/// A pattern that compiled successfully
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub category: RiskCategory,
    pub source: &'static str,
    pub regex: Regex,
}

lazy_static! {
    /// Compiled once, read-only afterwards
    pub static ref COMPILED_PATTERNS: Vec<CompiledPattern> = compile_patterns(RISK_PATTERNS);
}

/// Build the word-bounded, case-insensitive regex for a table entry
pub fn word_bounded(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern.split(' ').collect::<Vec<_>>().join(r"\s+");
    Regex::new(&format!(r"(?i)\b(?:{})\b", body))
}

/// Compile a pattern table, keeping table order.
///
/// A pattern that fails to compile is logged and skipped so one bad entry
/// cannot take down scanning for every other pattern.
pub fn compile_patterns(table: &[(RiskCategory, &[&'static str])]) -> Vec<CompiledPattern> {
    let mut compiled = Vec::new();

    for (category, patterns) in table {
        for &source in patterns.iter() {
            match word_bounded(source) {
                Ok(regex) => compiled.push(CompiledPattern {
                    category: *category,
                    source,
                    regex,
                }),
                Err(e) => warn!(%category, pattern = source, error = %e, "Skipping risk pattern"),
            }
        }
    }

    compiled
}
