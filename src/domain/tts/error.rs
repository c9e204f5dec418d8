use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("no audio available for text '{text}' (language: {})", .language.as_deref().unwrap_or("default"))]
    AudioUnavailable {
        text: String,
        language: Option<String>,
    },
    #[error("storage access failed for '{path}': {message}")]
    StorageAccess { path: String, message: String },
    #[error("malformed cache entry '{path}': {reason}")]
    MalformedCacheEntry { path: String, reason: String },
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("request cancelled")]
    Cancelled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TtsServiceError {
    pub fn audio_unavailable(text: &str, language: Option<&str>) -> Self {
        TtsServiceError::AudioUnavailable {
            text: text.to_string(),
            language: language.map(str::to_string),
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::AudioUnavailable { .. } => AppError::NotFound(err.to_string()),
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::UnsupportedLanguage(lang) => {
                AppError::BadRequest(format!("Unsupported language: {}", lang))
            }
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
            TtsServiceError::Cancelled => {
                AppError::Timeout("TTS request cancelled before completion".to_string())
            }
            TtsServiceError::StorageAccess { .. } | TtsServiceError::MalformedCacheEntry { .. } => {
                AppError::Internal(err.to_string())
            }
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
