//! Translation target languages
//!
//! The set is closed. Unknown names are only rejected by translation; scanning
//! and simplification never look at the language.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SupportedLanguage {
    Hindi,
    Bengali,
    Telugu,
    Marathi,
    Tamil,
    Urdu,
    Gujarati,
    Kannada,
    Odia,
    Punjabi,
    Malayalam,
    Assamese,
    Maithili,
    Santali,
    Konkani,
    Manipuri,
    Bodo,
    Dogri,
    Kashmiri,
    Sindhi,
    Sanskrit,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 21] = [
        SupportedLanguage::Hindi,
        SupportedLanguage::Bengali,
        SupportedLanguage::Telugu,
        SupportedLanguage::Marathi,
        SupportedLanguage::Tamil,
        SupportedLanguage::Urdu,
        SupportedLanguage::Gujarati,
        SupportedLanguage::Kannada,
        SupportedLanguage::Odia,
        SupportedLanguage::Punjabi,
        SupportedLanguage::Malayalam,
        SupportedLanguage::Assamese,
        SupportedLanguage::Maithili,
        SupportedLanguage::Santali,
        SupportedLanguage::Konkani,
        SupportedLanguage::Manipuri,
        SupportedLanguage::Bodo,
        SupportedLanguage::Dogri,
        SupportedLanguage::Kashmiri,
        SupportedLanguage::Sindhi,
        SupportedLanguage::Sanskrit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::Hindi => "Hindi",
            SupportedLanguage::Bengali => "Bengali",
            SupportedLanguage::Telugu => "Telugu",
            SupportedLanguage::Marathi => "Marathi",
            SupportedLanguage::Tamil => "Tamil",
            SupportedLanguage::Urdu => "Urdu",
            SupportedLanguage::Gujarati => "Gujarati",
            SupportedLanguage::Kannada => "Kannada",
            SupportedLanguage::Odia => "Odia",
            SupportedLanguage::Punjabi => "Punjabi",
            SupportedLanguage::Malayalam => "Malayalam",
            SupportedLanguage::Assamese => "Assamese",
            SupportedLanguage::Maithili => "Maithili",
            SupportedLanguage::Santali => "Santali",
            SupportedLanguage::Konkani => "Konkani",
            SupportedLanguage::Manipuri => "Manipuri",
            SupportedLanguage::Bodo => "Bodo",
            SupportedLanguage::Dogri => "Dogri",
            SupportedLanguage::Kashmiri => "Kashmiri",
            SupportedLanguage::Sindhi => "Sindhi",
            SupportedLanguage::Sanskrit => "Sanskrit",
        }
    }

    /// ISO 639 code sent to translation backends
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::Hindi => "hi",
            SupportedLanguage::Bengali => "bn",
            SupportedLanguage::Telugu => "te",
            SupportedLanguage::Marathi => "mr",
            SupportedLanguage::Tamil => "ta",
            SupportedLanguage::Urdu => "ur",
            SupportedLanguage::Gujarati => "gu",
            SupportedLanguage::Kannada => "kn",
            SupportedLanguage::Odia => "or",
            SupportedLanguage::Punjabi => "pa",
            SupportedLanguage::Malayalam => "ml",
            SupportedLanguage::Assamese => "as",
            SupportedLanguage::Maithili => "mai",
            SupportedLanguage::Santali => "sat",
            SupportedLanguage::Konkani => "gom",
            SupportedLanguage::Manipuri => "mni",
            SupportedLanguage::Bodo => "brx",
            SupportedLanguage::Dogri => "doi",
            SupportedLanguage::Kashmiri => "ks",
            SupportedLanguage::Sindhi => "sd",
            SupportedLanguage::Sanskrit => "sa",
        }
    }

    /// Look up a language by name or code, ignoring case and surrounding whitespace
    pub fn lookup(name_or_code: &str) -> Option<Self> {
        let needle = name_or_code.trim();
        Self::ALL.into_iter().find(|lang| {
            lang.name().eq_ignore_ascii_case(needle) || lang.code().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
