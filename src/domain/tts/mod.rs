pub mod audio;
pub mod configuration;
pub mod content;
pub mod error;
pub mod language;
pub mod pcm;
pub mod provider;
pub mod service;
pub mod text;

pub use audio::{AudioBuffer, AudioSource};
pub use configuration::TtsConfiguration;
pub use content::{ContentCacheStatus, LocalizedTtsContent};
pub use error::TtsServiceError;
pub use language::LanguageCode;
pub use provider::TextToSpeechProvider;
use serde::{Deserialize, Serialize};
pub use service::FileTtsService;

/// Request for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Request for POST /api/tts/batch
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsBatchRequest {
    pub texts: Vec<String>,
    pub languages: Vec<String>,
}
