use super::configuration::TtsConfiguration;
use super::error::TtsServiceError;
use super::language::LanguageCode;
use crate::infrastructure::repositories::ContentStore;
use serde::{Deserialize, Serialize};

/// A piece of narration authored in several languages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizedTtsContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tamil_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentCacheStatus {
    pub cached: bool,
    pub missing: Vec<LanguageCode>,
}

impl LocalizedTtsContent {
    pub fn text_for(&self, language: LanguageCode) -> Option<&str> {
        match language {
            LanguageCode::English => self.english_text.as_deref(),
            LanguageCode::Hindi => self.hindi_text.as_deref(),
            LanguageCode::Tamil => self.tamil_text.as_deref(),
        }
    }

    /// Check that every authored language has a cache entry in `store`.
    /// Languages without text count as cached.
    pub async fn cache_status(
        &self,
        configuration: &TtsConfiguration,
        store: &dyn ContentStore,
    ) -> Result<ContentCacheStatus, TtsServiceError> {
        let mut missing = Vec::new();

        for language in LanguageCode::ALL {
            let Some(text) = self.text_for(language) else {
                continue;
            };

            let filename = configuration.unique_filename_for_language(text, language.as_str());
            let path = configuration.cache_path(&filename);
            let exists = store
                .exists(&path)
                .await
                .map_err(|e| TtsServiceError::StorageAccess {
                    path: path.clone(),
                    message: e.to_string(),
                })?;

            if !exists {
                missing.push(language);
            }
        }

        Ok(ContentCacheStatus {
            cached: missing.is_empty(),
            missing,
        })
    }
}
