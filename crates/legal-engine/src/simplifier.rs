//! Rule-based simplification
//!
//! Deterministic phrase substitution plus, at the advanced level, splitting
//! of long sentences. No network access; this is the path every remote
//! simplification failure lands on.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use shared_types::SimplificationLevel;

use crate::patterns::word_bounded;
use crate::sentences::split_sentences;

/// One phrase → plain-language rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    pub phrase: &'static str,
    pub plain: &'static str,
    /// Lowest level the rule applies at
    pub level: SimplificationLevel,
}

const fn rule(phrase: &'static str, plain: &'static str, level: SimplificationLevel) -> Replacement {
    Replacement {
        phrase,
        plain,
        level,
    }
}

use SimplificationLevel::{Advanced, Moderate, Simple};

/// Ordered rule table.
///
/// Longer phrases come before the shorter phrases they contain, and no
/// `plain` text contains any `phrase`. Single-word pronominal adverbs
/// ("thereto", "herein") run before the multi-word rules, so "prior thereto"
/// becomes "prior to that" and then "before that" in the same pass. A second
/// pass changes nothing.
pub const REPLACEMENTS: &[Replacement] = &[
    rule("notwithstanding anything to the contrary", "even if other parts say differently", Advanced),
    rule("hereinafter referred to as", "called", Simple),
    rule("hereinafter", "later in this document", Simple),
    rule("hereby", "by this", Simple),
    rule("herein", "in this", Simple),
    rule("wherein", "where", Simple),
    rule("thereof", "of that", Simple),
    rule("therein", "in that", Simple),
    rule("thereto", "to that", Simple),
    rule("indemnify and hold harmless", "protect from losses", Simple),
    rule("shall be deemed", "is considered", Moderate),
    rule("in the event that", "if", Moderate),
    rule("for the purpose of", "to", Moderate),
    rule("in accordance with", "by", Moderate),
    rule("with respect to", "about", Moderate),
    rule("not less than", "at least", Moderate),
    rule("not more than", "at most", Moderate),
    rule("subsequent to", "after", Moderate),
    rule("prior to", "before", Moderate),
    rule("be liable for", "be responsible for", Moderate),
    rule("pursuant to", "according to", Simple),
    rule("aforementioned", "mentioned before", Simple),
    rule("notwithstanding", "despite", Simple),
    rule("shall", "will", Simple),
    rule("must", "have to", Simple),
    rule("force majeure", "unavoidable events", Advanced),
    rule("ipso facto", "automatically", Advanced),
    rule("inter alia", "among other things", Advanced),
    rule("prima facie", "at first glance", Advanced),
    rule("bona fide", "in good faith", Advanced),
];

/// Sentences with more tokens than this are split at the advanced level
pub const LONG_SENTENCE_TOKENS: usize = 20;

lazy_static! {
    static ref COMPILED_REPLACEMENTS: Vec<(Regex, Replacement)> = REPLACEMENTS
        .iter()
        .filter_map(|r| word_bounded(r.phrase).ok().map(|re| (re, *r)))
        .collect();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Clause separators: ", and" / ", or" / ", but" / "; and" ... or a bare semicolon
    static ref CLAUSE_SEPARATOR: Regex =
        Regex::new(r"(?i)[,;]\s+(?:and|or|but)\s+|;\s+").unwrap();
}

/// Deterministic simplifier
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedSimplifier;

impl RuleBasedSimplifier {
    pub fn new() -> Self {
        Self
    }

    /// Simplify `text` at `level`. Blank input comes back unchanged.
    pub fn simplify(&self, text: &str, level: SimplificationLevel) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let mut output = normalize_whitespace(text);

        for (regex, replacement) in COMPILED_REPLACEMENTS.iter() {
            if replacement.level > level {
                continue;
            }
            output = regex
                .replace_all(&output, |caps: &Captures| {
                    match_case(&caps[0], replacement.plain)
                })
                .into_owned();
        }

        if level == SimplificationLevel::Advanced {
            output = split_long_sentences(&output);
        }

        output
    }
}

/// Collapse every whitespace run to one space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Carry a leading capital from the matched phrase over to its replacement
fn match_case(matched: &str, plain: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if starts_upper {
        capitalize(plain)
    } else {
        plain.to_string()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split sentences longer than [`LONG_SENTENCE_TOKENS`] at clause separators.
///
/// Fragments are capitalized, given terminal punctuation and joined with a
/// single space. Sentences without a separator are left as they are.
fn split_long_sentences(text: &str) -> String {
    let mut rebuilt: Vec<String> = Vec::new();

    for sentence in split_sentences(text) {
        let tokens = sentence.text.split_whitespace().count();
        if tokens <= LONG_SENTENCE_TOKENS {
            rebuilt.push(sentence.text.to_string());
            continue;
        }

        let fragments: Vec<&str> = CLAUSE_SEPARATOR
            .split(sentence.text)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();

        if fragments.len() < 2 {
            rebuilt.push(sentence.text.to_string());
            continue;
        }

        for fragment in fragments {
            let mut fragment = capitalize(fragment);
            if !fragment.ends_with(&['.', '!', '?'][..]) {
                fragment.push('.');
            }
            rebuilt.push(fragment);
        }
    }

    rebuilt.join(" ")
}
