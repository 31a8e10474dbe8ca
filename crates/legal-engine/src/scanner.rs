//! Pattern-based risk scanning

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use shared_types::{CharMap, RiskCategory, Span};
use tracing::debug;

use crate::patterns::{CompiledPattern, COMPILED_PATTERNS};
use crate::sentences::split_sentences;

/// Lower bound of the placeholder confidence range
pub const CONFIDENCE_MIN: f32 = 0.70;
/// Upper bound of the placeholder confidence range
pub const CONFIDENCE_MAX: f32 = 0.95;

/// Flags obligation/penalty/condition/right/definition language in text
#[derive(Debug, Clone)]
pub struct RiskScanner {
    patterns: Cow<'static, [CompiledPattern]>,
}

impl RiskScanner {
    /// Scanner over the built-in pattern table
    pub fn new() -> Self {
        Self {
            patterns: Cow::Borrowed(COMPILED_PATTERNS.as_slice()),
        }
    }

    /// Scanner over a custom, already compiled table (kept in the given order)
    pub fn with_patterns(patterns: Vec<CompiledPattern>) -> Self {
        Self {
            patterns: Cow::Owned(patterns),
        }
    }

    /// Scan `text` and return every match as a span.
    ///
    /// Spans come out in sentence order, then category order, then pattern
    /// order, then ascending position. Overlapping and duplicate matches from
    /// different patterns are all kept. Offsets are characters into `text`.
    pub fn scan(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        if text.trim().is_empty() {
            return spans;
        }

        let map = CharMap::new(text);

        for sentence in split_sentences(text) {
            for pattern in self.patterns.iter() {
                for m in pattern.regex.find_iter(sentence.text) {
                    let byte_start = sentence.offset + m.start();
                    let byte_end = sentence.offset + m.end();
                    let (Some(start), Some(end)) =
                        (map.char_at_byte(byte_start), map.char_at_byte(byte_end))
                    else {
                        continue;
                    };
                    if start >= end {
                        continue;
                    }

                    spans.push(Span::new(
                        m.as_str(),
                        start,
                        end,
                        pattern.category,
                        placeholder_confidence(start, end, pattern),
                    ));
                }
            }
        }

        debug!(spans = spans.len(), chars = map.char_len(), "Risk scan complete");
        spans
    }
}

impl Default for RiskScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Pseudo-random score in `[CONFIDENCE_MIN, CONFIDENCE_MAX]`, rounded to 2 places.
///
/// This is a stand-in, not a model output. It is derived from the match
/// position and pattern so repeated scans of the same text agree.
fn placeholder_confidence(start: usize, end: usize, pattern: &CompiledPattern) -> f32 {
    let mut hasher = DefaultHasher::new();
    (start, end, pattern.category, pattern.source).hash(&mut hasher);
    let unit = (hasher.finish() % 10_001) as f32 / 10_000.0;
    let raw = CONFIDENCE_MIN + unit * (CONFIDENCE_MAX - CONFIDENCE_MIN);
    ((raw * 100.0).round() / 100.0).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX)
}

/// Count spans per category
pub fn count_by_category(spans: &[Span]) -> BTreeMap<RiskCategory, usize> {
    let mut counts = BTreeMap::new();
    for span in spans {
        *counts.entry(span.category).or_insert(0) += 1;
    }
    counts
}
