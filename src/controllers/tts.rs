use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    domain::tts::{
        AudioBuffer, AudioSource, ContentCacheStatus, FileTtsService, LocalizedTtsContent,
        TtsBatchRequest, TtsConfiguration, TtsRequest,
    },
    error::{AppError, AppResult},
    infrastructure::repositories::ContentStore,
};

const MAX_TEXT_LENGTH: usize = 10000;

/// One clip of POST /api/tts/batch
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioClipResponse {
    pub label: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub source: AudioSource,
    pub duration_seconds: f32,
    pub samples: Vec<f32>,
}

impl From<AudioBuffer> for AudioClipResponse {
    fn from(audio: AudioBuffer) -> Self {
        Self {
            duration_seconds: audio.duration_seconds(),
            samples: audio.samples.to_vec(),
            label: audio.label,
            channels: audio.channels,
            sample_rate: audio.sample_rate,
            source: audio.source,
        }
    }
}

/// Response for POST /api/tts/batch
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsBatchResponse {
    pub clips: Vec<AudioClipResponse>,
}

pub struct TtsController {
    tts_service: Arc<FileTtsService>,
    packaged_store: Arc<dyn ContentStore>,
    request_timeout: Duration,
}

impl TtsController {
    pub fn new(
        tts_service: Arc<FileTtsService>,
        packaged_store: Arc<dyn ContentStore>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            tts_service,
            packaged_store,
            request_timeout,
        }
    }

    /// POST /api/tts/synthesize - Resolve text to PCM16LE audio
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        validate_text(&request.text)?;

        let language = request
            .language
            .as_deref()
            .filter(|language| !language.trim().is_empty());

        let (cancel, _guard) = request_deadline(controller.request_timeout);
        let audio = controller
            .tts_service
            .convert_with_cancellation(&request.text, language, &cancel)
            .await?;

        let headers = audio_headers(&audio)?;
        Ok((StatusCode::OK, headers, Body::from(audio.to_pcm16le())))
    }

    /// POST /api/tts/batch - Resolve several (text, language) pairs
    pub async fn synthesize_batch(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsBatchRequest>,
    ) -> AppResult<Json<TtsBatchResponse>> {
        for text in &request.texts {
            validate_text(text)?;
        }

        let (cancel, _guard) = request_deadline(controller.request_timeout);
        let clips = controller
            .tts_service
            .convert_multiple_with_cancellation(&request.texts, &request.languages, &cancel)
            .await?;

        Ok(Json(TtsBatchResponse {
            clips: clips.into_iter().map(AudioClipResponse::from).collect(),
        }))
    }

    /// GET /api/tts/configuration - Current TTS configuration
    pub async fn get_configuration(
        State(controller): State<Arc<TtsController>>,
    ) -> Json<TtsConfiguration> {
        Json(controller.tts_service.configuration().as_ref().clone())
    }

    /// PUT /api/tts/configuration - Replace the TTS configuration
    pub async fn set_configuration(
        State(controller): State<Arc<TtsController>>,
        Json(configuration): Json<TtsConfiguration>,
    ) -> AppResult<Json<TtsConfiguration>> {
        if configuration.cache_directory_name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "cache_directory_name cannot be empty".to_string(),
            ));
        }
        if configuration.sample_rate == 0 {
            return Err(AppError::BadRequest("sample_rate must be positive".to_string()));
        }

        controller.tts_service.set_configuration(configuration.clone());
        Ok(Json(configuration))
    }

    /// POST /api/tts/content/status - Whether every language of a content item is cached
    pub async fn content_status(
        State(controller): State<Arc<TtsController>>,
        Json(content): Json<LocalizedTtsContent>,
    ) -> AppResult<Json<ContentCacheStatus>> {
        let configuration = controller.tts_service.configuration();
        let status = content
            .cache_status(&configuration, controller.packaged_store.as_ref())
            .await?;
        Ok(Json(status))
    }
}

fn validate_text(text: &str) -> AppResult<()> {
    if text.is_empty() {
        return Err(AppError::BadRequest("Text cannot be empty".to_string()));
    }

    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(AppError::PayloadTooLarge(
            "Text must be 10,000 characters or less".to_string(),
        ));
    }

    Ok(())
}

/// Token cancelled once `timeout` elapses or the returned guard is dropped.
///
/// Handlers hold the guard for their whole run, so the timer task ends with
/// the request.
fn request_deadline(timeout: Duration) -> (CancellationToken, DropGuard) {
    let cancel = CancellationToken::new();
    let timer = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "TTS request deadline reached, cancelling"
                );
                timer.cancel();
            }
            _ = timer.cancelled() => {}
        }
    });

    let guard = cancel.clone().drop_guard();
    (cancel, guard)
}

fn audio_headers(audio: &AudioBuffer) -> AppResult<HeaderMap> {
    let header_value = |value: String| {
        HeaderValue::from_str(&value).map_err(|e| AppError::Internal(e.to_string()))
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header_value(format!(
            "audio/L16; rate={}; channels={}",
            audio.sample_rate, audio.channels
        ))?,
    );
    headers.insert("x-sample-rate", header_value(audio.sample_rate.to_string())?);
    headers.insert("x-sample-count", header_value(audio.len().to_string())?);
    headers.insert("x-audio-source", header_value(audio.source.to_string())?);
    headers.insert(
        "x-audio-label",
        header_value(urlencoding::encode(&audio.label).into_owned())?,
    );
    Ok(headers)
}
