use std::fmt;
use std::str::FromStr;

use crate::offsets::CharMap;

/// A position-tagged risk match over the text a scan ran against.
///
/// `start`/`end` are character (not byte) offsets into that source text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub category: RiskCategory,
    pub label: String,
    pub color: String,
    /// Placeholder score, not a learned confidence
    pub confidence: f32,
}

impl Span {
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        category: RiskCategory,
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Number of characters covered by the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check `0 <= start < end <= len(source)` and `source[start..end] == text`
    pub fn is_valid_for(&self, source: &str) -> bool {
        self.byte_range(&CharMap::new(source), source).is_some()
    }

    /// Byte range of the span inside `source`, if the positional invariant holds
    pub fn byte_range(&self, map: &CharMap, source: &str) -> Option<std::ops::Range<usize>> {
        if self.start >= self.end {
            return None;
        }
        let start = map.byte_at_char(self.start)?;
        let end = map.byte_at_char(self.end)?;
        (source.get(start..end)? == self.text).then_some(start..end)
    }
}

/// Closed set of legal-risk categories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Obligation,
    Penalty,
    Condition,
    Right,
    Definition,
}

impl RiskCategory {
    /// Iteration order used by the scanner
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Obligation,
        RiskCategory::Penalty,
        RiskCategory::Condition,
        RiskCategory::Right,
        RiskCategory::Definition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Obligation => "obligation",
            RiskCategory::Penalty => "penalty",
            RiskCategory::Condition => "condition",
            RiskCategory::Right => "right",
            RiskCategory::Definition => "definition",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Obligation => "Obligation",
            RiskCategory::Penalty => "Penalty",
            RiskCategory::Condition => "Condition",
            RiskCategory::Right => "Right",
            RiskCategory::Definition => "Definition",
        }
    }

    /// Display color (hex)
    pub fn color(&self) -> &'static str {
        match self {
            RiskCategory::Obligation => "#3B82F6",
            RiskCategory::Penalty => "#EF4444",
            RiskCategory::Condition => "#F97316",
            RiskCategory::Right => "#10B981",
            RiskCategory::Definition => "#8B5CF6",
        }
    }

    /// CSS class used by the annotation overlay
    pub fn css_class(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown risk category: {0}")]
pub struct UnknownCategoryError(pub String);

impl FromStr for RiskCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategoryError(s.to_string()))
    }
}

/// How aggressively text is simplified. Levels are cumulative.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SimplificationLevel {
    #[default]
    Simple,
    Moderate,
    Advanced,
}

impl SimplificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplificationLevel::Simple => "simple",
            SimplificationLevel::Moderate => "moderate",
            SimplificationLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SimplificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown simplification level '{0}' (expected simple, moderate or advanced)")]
pub struct ParseLevelError(pub String);

impl FromStr for SimplificationLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(SimplificationLevel::Simple),
            "moderate" => Ok(SimplificationLevel::Moderate),
            "advanced" => Ok(SimplificationLevel::Advanced),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
