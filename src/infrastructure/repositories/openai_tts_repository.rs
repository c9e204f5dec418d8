use crate::domain::tts::pcm::decode_pcm16le;
use crate::domain::tts::text::split_into_batches;
use crate::domain::tts::{AudioBuffer, AudioSource, LanguageCode, TextToSpeechProvider, TtsServiceError};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// OpenAI streams PCM as 24 kHz, 16-bit signed little-endian mono
const OPENAI_PCM_SAMPLE_RATE: u32 = 24000;

/// OpenAI TTS live synthesis, used when no cached audio exists.
/// The voices are multilingual, so every supported language uses the configured voice.
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: String,
    default_language: String,
}

impl OpenAiTtsRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        model: String,
        voice: String,
        default_language: String,
    ) -> Self {
        Self {
            client,
            model,
            voice,
            default_language,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn speech_voice(&self) -> Voice {
        match self.voice.to_lowercase().as_str() {
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    /// Call OpenAI TTS API to synthesize a single text batch as raw PCM
    async fn call_openai(&self, text: &str) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: self.speech_voice(),
            response_format: Some(SpeechResponseFormat::Pcm),
            speed: None,
        };

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    voice = %self.voice,
                    text_length = text.len(),
                    "OpenAI TTS API call failed"
                );
                format!("OpenAI TTS error: {}", e)
            })?;

        Ok(response.bytes.to_vec())
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioBuffer, TtsServiceError> {
        let language_code = LanguageCode::from_tag(language)
            .ok_or_else(|| TtsServiceError::UnsupportedLanguage(language.to_string()))?;

        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut pcm = Vec::new();
        for batch in &batches {
            let audio_data = self
                .call_openai(batch)
                .await
                .map_err(TtsServiceError::Dependency)?;
            pcm.extend(audio_data);
        }

        let samples = decode_pcm16le(&pcm)
            .map_err(|e| TtsServiceError::Dependency(format!("OpenAI returned invalid PCM: {}", e)))?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            language = %language_code,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            sample_count = samples.len(),
            "TTS synthesis completed"
        );

        Ok(AudioBuffer::mono(
            text,
            OPENAI_PCM_SAMPLE_RATE,
            samples,
            AudioSource::Synthesized,
        ))
    }
}

#[async_trait]
impl TextToSpeechProvider for OpenAiTtsRepository {
    async fn convert_text_to_speech(&self, text: &str) -> Result<AudioBuffer, TtsServiceError> {
        self.synthesize(text, &self.default_language).await
    }

    async fn convert_text_to_speech_for_language(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioBuffer, TtsServiceError> {
        self.synthesize(text, language).await
    }
}
