use crate::domain::tts::language::normalize_language_tag;
use serde::{Deserialize, Serialize};

pub const DEFAULT_APPLICATION_LANGUAGE: &str = "en";

/// Language settings for the training application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleLanguagesSettings {
    /// Language used when nothing else is selected
    pub application_language: String,
    /// Languages selected for the current session
    #[serde(default)]
    pub active_languages: Vec<String>,
}

impl Default for MultipleLanguagesSettings {
    fn default() -> Self {
        Self {
            application_language: DEFAULT_APPLICATION_LANGUAGE.to_string(),
            active_languages: Vec::new(),
        }
    }
}

impl MultipleLanguagesSettings {
    pub fn new(application_language: &str, active_languages: Vec<String>) -> Self {
        let application_language = match normalize_language_tag(application_language) {
            tag if tag.is_empty() => DEFAULT_APPLICATION_LANGUAGE.to_string(),
            tag => tag,
        };

        Self {
            application_language,
            active_languages: active_languages
                .iter()
                .map(|language| normalize_language_tag(language))
                .filter(|language| !language.is_empty())
                .collect(),
        }
    }

    /// The active languages, or just the application language when none are active
    pub fn active_or_default_languages(&self) -> Vec<String> {
        if self.active_languages.is_empty() {
            tracing::debug!(
                application_language = %self.application_language,
                "No active languages, using application language"
            );
            return vec![self.application_language.clone()];
        }

        self.active_languages.clone()
    }
}
