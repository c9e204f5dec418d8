use super::audio::AudioBuffer;
use super::error::TtsServiceError;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};

/// Upper bound on batch items resolved at the same time
pub const MAX_CONCURRENT_RESOLUTIONS: usize = 8;

/// Converts text into playable audio.
///
/// Live synthesis engines (AWS Polly, OpenAI, ...) implement this, and so does
/// the file-backed service that decorates them with the on-disk cache.
#[async_trait]
pub trait TextToSpeechProvider: Send + Sync {
    /// Render `text` in the provider's default language
    async fn convert_text_to_speech(&self, text: &str) -> Result<AudioBuffer, TtsServiceError>;

    /// Render `text` in `language`
    async fn convert_text_to_speech_for_language(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioBuffer, TtsServiceError>;

    /// Render every `(texts[i], languages[i])` pair.
    ///
    /// Pairs are independent and run concurrently, at most
    /// [`MAX_CONCURRENT_RESOLUTIONS`] at a time. The result keeps the input
    /// order and length.
    async fn convert_multiple_text_to_speech(
        &self,
        texts: &[String],
        languages: &[String],
    ) -> Result<Vec<AudioBuffer>, TtsServiceError> {
        ensure_same_length(texts, languages)?;

        let pending: Vec<_> = texts
            .iter()
            .zip(languages)
            .map(|(text, language)| self.convert_text_to_speech_for_language(text, language))
            .collect();
        stream::iter(pending)
        .buffered(MAX_CONCURRENT_RESOLUTIONS)
        .try_collect()
        .await
    }
}

pub(crate) fn ensure_same_length(texts: &[String], languages: &[String]) -> Result<(), TtsServiceError> {
    if texts.len() != languages.len() {
        return Err(TtsServiceError::Invalid(format!(
            "texts and languages must have the same length ({} != {})",
            texts.len(),
            languages.len()
        )));
    }
    Ok(())
}
