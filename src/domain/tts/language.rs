use serde::{Deserialize, Serialize};

/// ISO 639-1 language codes the training content is authored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 3] = [LanguageCode::English, LanguageCode::Hindi, LanguageCode::Tamil];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Hindi => "hi",
            LanguageCode::Tamil => "ta",
        }
    }

    /// Parse a language tag such as `"en"`, `"En"` or `"hi-IN"`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = normalize_language_tag(tag);
        let primary = primary.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" => Some(LanguageCode::English),
            "hi" => Some(LanguageCode::Hindi),
            "ta" => Some(LanguageCode::Tamil),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trim and lower-case a language tag so equivalent spellings share a cache slot
pub fn normalize_language_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
