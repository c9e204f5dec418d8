use crate::domain::tts::pcm::decode_pcm16le;
use crate::domain::tts::text::split_into_batches;
use crate::domain::tts::{AudioBuffer, AudioSource, LanguageCode, TextToSpeechProvider, TtsServiceError};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, LanguageCode as PollyLanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// Highest sample rate Polly offers for PCM output
const POLLY_PCM_SAMPLE_RATE: u32 = 16000;

/// AWS Polly live synthesis, used when no cached audio exists
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    default_language: String,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, default_language: String) -> Self {
        Self {
            polly_client,
            default_language,
        }
    }

    /// Select the Polly neural voice and language for a language code
    fn voice_for_language(language: LanguageCode) -> Option<(&'static str, PollyLanguageCode)> {
        match language {
            LanguageCode::English => Some(("Joanna", PollyLanguageCode::EnUs)),
            LanguageCode::Hindi => Some(("Kajal", PollyLanguageCode::HiIn)),
            // Polly has no Tamil voice
            LanguageCode::Tamil => None,
        }
    }

    /// Call AWS Polly to synthesize a single text batch as raw PCM
    async fn call_polly(
        &self,
        text: &str,
        voice_name: &'static str,
        language_code: PollyLanguageCode,
    ) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        tracing::info!(
            voice = voice_name,
            language_code = ?language_code,
            engine = ?engine,
            output_format = "Pcm",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .language_code(language_code.clone())
            .output_format(OutputFormat::Pcm)
            .sample_rate(POLLY_PCM_SAMPLE_RATE.to_string())
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = voice_name,
                    language_code = ?language_code,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioBuffer, TtsServiceError> {
        let language_code = LanguageCode::from_tag(language)
            .ok_or_else(|| TtsServiceError::UnsupportedLanguage(language.to_string()))?;
        let (voice_name, polly_language) = Self::voice_for_language(language_code)
            .ok_or_else(|| TtsServiceError::UnsupportedLanguage(language_code.to_string()))?;

        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut pcm = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self
                .call_polly(batch, voice_name, polly_language.clone())
                .await
                .map_err(TtsServiceError::Dependency)?;
            pcm.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = pcm.len(),
                "Batch synthesized and merged"
            );
        }

        let samples = decode_pcm16le(&pcm)
            .map_err(|e| TtsServiceError::Dependency(format!("AWS Polly returned invalid PCM: {}", e)))?;

        tracing::info!(
            provider = "polly",
            language = %language_code,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            sample_count = samples.len(),
            "TTS synthesis completed"
        );

        Ok(AudioBuffer::mono(
            text,
            POLLY_PCM_SAMPLE_RATE,
            samples,
            AudioSource::Synthesized,
        ))
    }
}

#[async_trait]
impl TextToSpeechProvider for PollyTtsRepository {
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
