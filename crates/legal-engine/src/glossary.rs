//! Glossary translation
//!
//! Last-resort translator: swaps a handful of legal terms for their
//! target-language equivalents and marks the result as an approximation.
//! Always succeeds, never touches the network.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::SupportedLanguage;

use crate::patterns::word_bounded;

type Glossary = &'static [(&'static str, &'static str)];

const HINDI: Glossary = &[
    ("agreement", "समझौता"),
    ("contract", "अनुबंध"),
    ("party", "पक्ष"),
    ("payment", "भुगतान"),
    ("penalty", "दंड"),
    ("damages", "हर्जाना"),
    ("liability", "दायित्व"),
    ("termination", "समाप्ति"),
    ("court", "न्यायालय"),
    ("law", "कानून"),
];

const BENGALI: Glossary = &[
    ("agreement", "চুক্তি"),
    ("contract", "চুক্তিপত্র"),
    ("party", "পক্ষ"),
    ("payment", "অর্থপ্রদান"),
    ("penalty", "জরিমানা"),
    ("court", "আদালত"),
    ("law", "আইন"),
];

const TELUGU: Glossary = &[
    ("agreement", "ఒప్పందం"),
    ("party", "పక్షం"),
    ("payment", "చెల్లింపు"),
    ("penalty", "జరిమానా"),
    ("court", "న్యాయస్థానం"),
    ("law", "చట్టం"),
];

const MARATHI: Glossary = &[
    ("agreement", "करार"),
    ("party", "पक्ष"),
    ("payment", "देयक"),
    ("penalty", "दंड"),
    ("court", "न्यायालय"),
    ("law", "कायदा"),
];

const TAMIL: Glossary = &[
    ("agreement", "ஒப்பந்தம்"),
    ("party", "தரப்பு"),
    ("payment", "கட்டணம்"),
    ("penalty", "அபராதம்"),
    ("court", "நீதிமன்றம்"),
    ("law", "சட்டம்"),
];

/// Languages with a glossary. The rest only get the marker.
pub const GLOSSARIES: &[(SupportedLanguage, Glossary)] = &[
    (SupportedLanguage::Hindi, HINDI),
    (SupportedLanguage::Bengali, BENGALI),
    (SupportedLanguage::Telugu, TELUGU),
    (SupportedLanguage::Marathi, MARATHI),
    (SupportedLanguage::Tamil, TAMIL),
];

lazy_static! {
    static ref COMPILED_GLOSSARIES: HashMap<SupportedLanguage, Vec<(Regex, &'static str)>> =
        GLOSSARIES
            .iter()
            .map(|(lang, terms)| {
                let compiled = terms
                    .iter()
                    .filter_map(|(term, local)| word_bounded(term).ok().map(|re| (re, *local)))
                    .collect();
                (*lang, compiled)
            })
            .collect();
}

/// Marker prepended for a supported language
pub fn language_marker(language: SupportedLanguage) -> String {
    format!("[{} translation]", language.name())
}

/// Marker prepended for a language outside the supported set
pub fn generic_marker(language: &str) -> String {
    format!("[Translated to {}]", language)
}

/// Deterministic, always-succeeding translation approximation
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTranslator;

impl MockTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Translate `text` into `language` (a name or code).
    ///
    /// The result always starts with a bracketed marker, so it is never empty.
    /// Unknown languages get the generic marker with the name as given.
    pub fn translate(&self, text: &str, language: &str) -> String {
        match SupportedLanguage::lookup(language) {
            Some(lang) => self.translate_supported(text, lang),
            None => join_marker(&generic_marker(language), text),
        }
    }

    pub fn translate_supported(&self, text: &str, language: SupportedLanguage) -> String {
        let mut output = text.to_string();
        if let Some(terms) = COMPILED_GLOSSARIES.get(&language) {
            for (regex, local) in terms {
                output = regex.replace_all(&output, *local).into_owned();
            }
        }
        join_marker(&language_marker(language), &output)
    }
}

fn join_marker(marker: &str, text: &str) -> String {
    if text.is_empty() {
        marker.to_string()
    } else {
        format!("{} {}", marker, text)
    }
}
