use super::audio::{AudioBuffer, AudioSource};
use super::configuration::TtsConfiguration;
use super::error::TtsServiceError;
use super::pcm::decode_pcm16le;
use super::provider::{ensure_same_length, TextToSpeechProvider, MAX_CONCURRENT_RESOLUTIONS};
use crate::infrastructure::repositories::{ContentStore, StorageError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use moka::future::Cache;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// File-backed text-to-speech.
///
/// Looks for pre-generated PCM audio in the content store first and only
/// asks the fallback provider to synthesize when no cache entry exists. It
/// never writes cache entries itself.
pub struct FileTtsService {
    configuration: RwLock<Arc<TtsConfiguration>>,
    content_store: Arc<dyn ContentStore>,
    fallback: Arc<dyn TextToSpeechProvider>,
    decoded: Option<Cache<String, AudioBuffer>>,
}

impl FileTtsService {
    pub fn new(
        configuration: TtsConfiguration,
        content_store: Arc<dyn ContentStore>,
        fallback: Arc<dyn TextToSpeechProvider>,
        memory_cache_enabled: bool,
    ) -> Self {
        // Keeps decoded cache entries in memory, refreshed on access
        let decoded = if memory_cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(256)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            configuration: RwLock::new(Arc::new(configuration)),
            content_store,
            fallback,
            decoded,
        }
    }

    /// Snapshot of the active configuration
    pub fn configuration(&self) -> Arc<TtsConfiguration> {
        self.configuration.read().clone()
    }

    /// Replace the configuration for subsequent requests.
    ///
    /// Requests already running keep the snapshot they started with.
    pub fn set_configuration(&self, configuration: TtsConfiguration) {
        tracing::info!(
            provider = %configuration.provider,
            voice = %configuration.voice,
            language = %configuration.language,
            cache_directory = %configuration.cache_directory_name,
            sample_rate = configuration.sample_rate,
            "TTS configuration replaced"
        );

        *self.configuration.write() = Arc::new(configuration);

        if let Some(decoded) = &self.decoded {
            decoded.invalidate_all();
        }
    }

    /// Resolve a single request, abandoning it once `cancel` fires
    pub async fn convert_with_cancellation(
        &self,
        text: &str,
        language: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AudioBuffer, TtsServiceError> {
        self.resolve(text, language, Some(cancel)).await
    }

    /// Resolve a batch, abandoning every outstanding item once `cancel` fires
    pub async fn convert_multiple_with_cancellation(
        &self,
        texts: &[String],
        languages: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<AudioBuffer>, TtsServiceError> {
        ensure_same_length(texts, languages)?;
        let pending: Vec<_> = texts
            .iter()
            .zip(languages)
            .map(|(text, language)| self.resolve(text, Some(language), Some(cancel)))
            .collect();
        stream::iter(pending)
        .buffered(MAX_CONCURRENT_RESOLUTIONS)
        .try_collect()
        .await
    }

    async fn resolve(
        &self,
        text: &str,
        language: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<AudioBuffer, TtsServiceError> {
        let configuration = self.configuration();

        let filename = match language {
            Some(language) => configuration.unique_filename_for_language(text, language),
            None => configuration.unique_filename(text),
        };
        let path = configuration.cache_path(&filename);

        let audio = match self.load_cached(&configuration, text, &path, cancel).await? {
            Some(audio) => {
                tracing::debug!(
                    path = %path,
                    samples = audio.len(),
                    "TTS cache hit"
                );
                audio
            }
            None => {
                tracing::info!(
                    path = %path,
                    language = language.unwrap_or("default"),
                    "No audio cached for TTS string. Audio will be generated in real time."
                );
                let synthesize = async {
                    match language {
                        Some(language) => {
                            self.fallback
                                .convert_text_to_speech_for_language(text, language)
                                .await
                        }
                        None => self.fallback.convert_text_to_speech(text).await,
                    }
                };
                with_cancellation(cancel, synthesize).await??
            }
        };

        if audio.is_empty() {
            tracing::warn!(path = %path, source = %audio.source, "Resolved audio is empty");
            return Err(TtsServiceError::audio_unavailable(text, language));
        }

        Ok(audio)
    }

    async fn load_cached(
        &self,
        configuration: &TtsConfiguration,
        text: &str,
        path: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Option<AudioBuffer>, TtsServiceError> {
        // The store choice can change between calls, so it is part of the key
        let scope = self.content_store.scope();
        let memo_key = format!("{}:{}@{}", scope, path, configuration.sample_rate);
        if let Some(decoded) = &self.decoded {
            if let Some(audio) = decoded.get(&memo_key).await {
                return Ok(Some(audio));
            }
        }

        let exists = with_cancellation(cancel, self.content_store.exists(path))
            .await?
            .map_err(|e| storage_failure(path, e))?;
        if !exists {
            return Ok(None);
        }

        let bytes = with_cancellation(cancel, self.content_store.read(path))
            .await?
            .map_err(|e| storage_failure(path, e))?;

        let samples = decode_pcm16le(&bytes).map_err(|e| {
            tracing::error!(path = %path, error = %e, "Cached TTS entry is corrupt");
            TtsServiceError::MalformedCacheEntry {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        let audio = AudioBuffer::mono(text, configuration.sample_rate, samples, AudioSource::Cache);

        if let Some(decoded) = &self.decoded {
            // Skip the memo if the store changed while reading
            if !audio.is_empty() && self.content_store.scope() == scope {
                decoded.insert(memo_key, audio.clone()).await;
            }
        }

        Ok(Some(audio))
    }
}

#[async_trait]
impl TextToSpeechProvider for FileTtsService {
    async fn convert_text_to_speech(&self, text: &str) -> Result<AudioBuffer, TtsServiceError> {
        self.resolve(text, None, None).await
    }

    async fn convert_text_to_speech_for_language(
        &self,
        text: &str,
        language: &str,
    ) -> Result<AudioBuffer, TtsServiceError> {
        self.resolve(text, Some(language), None).await
    }

    /// Every pair is resolved on its own: a miss only sends that pair to the
    /// fallback provider, and cached pairs keep their cached audio. At most
    /// [`MAX_CONCURRENT_RESOLUTIONS`] pairs are in flight at once.
    async fn convert_multiple_text_to_speech(
        &self,
        texts: &[String],
        languages: &[String],
    ) -> Result<Vec<AudioBuffer>, TtsServiceError> {
        ensure_same_length(texts, languages)?;
        let pending: Vec<_> = texts
            .iter()
            .zip(languages)
            .map(|(text, language)| self.resolve(text, Some(language), None))
            .collect();
        stream::iter(pending)
        .buffered(MAX_CONCURRENT_RESOLUTIONS)
        .try_collect()
        .await
    }
}

fn storage_failure(path: &str, err: StorageError) -> TtsServiceError {
    tracing::error!(path = %path, error = %err, "TTS content store access failed");
    TtsServiceError::StorageAccess {
        path: path.to_string(),
        message: err.to_string(),
    }
}

async fn with_cancellation<F: Future>(
    cancel: Option<&CancellationToken>,
    future: F,
) -> Result<F::Output, TtsServiceError> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(TtsServiceError::Cancelled),
            output = future => Ok(output),
        },
        None => Ok(future.await),
    }
}
