use crate::domain::tts::{AudioBuffer, TextToSpeechProvider, TtsServiceError};
use async_trait::async_trait;

/// Fallback for cache-only deployments: every miss is reported as unavailable audio
pub struct DisabledTtsRepository;

#[async_trait]
impl TextToSpeechProvider for DisabledTtsRepository {
    async fn convert_text_to_speech(&self, text: &str) -> Result<AudioBuffer, TtsServiceError> {
        tracing::warn!("Live TTS synthesis is disabled");
        Err(TtsServiceError::audio_unavailable(text, None))
    }

    async fn convert_text_to_speech_for_language(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioBuffer, TtsServiceError> {
        tracing::warn!(language = %language, "Live TTS synthesis is disabled");
        Err(TtsServiceError::audio_unavailable(text, Some(language)))
    }
}
