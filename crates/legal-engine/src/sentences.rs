//! Sentence segmentation heuristic
//!
//! A sentence ends at `.`, `!` or `?` followed by whitespace. This is not real
//! boundary detection: abbreviations ("Inc. "), decimals followed by a space
//! and quoted terminal punctuation are mis-split. Downstream offsets depend on
//! the split being deterministic, not on it being linguistically right.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// One sentence, borrowed from the source, with its absolute byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub offset: usize,
    pub text: &'a str,
}

/// Split `text` into sentences.
///
/// The separating whitespace belongs to no sentence, but every sentence keeps
/// its exact byte offset, so `&text[s.offset..s.offset + s.text.len()] == s.text`.
pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut cursor = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Terminal punctuation is a single ASCII byte and stays with its sentence
        let end = boundary.start() + 1;
        sentences.push(Sentence {
            offset: cursor,
            text: &text[cursor..end],
        });
        cursor = boundary.end();
    }

    if cursor < text.len() {
        sentences.push(Sentence {
            offset: cursor,
            text: &text[cursor..],
        });
    }

    sentences
}
