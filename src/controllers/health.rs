use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::tts::FileTtsService;
use crate::infrastructure::runtime::RuntimeContext;

/// What readiness needs to know about the running service
pub struct HealthState {
    pub streaming_assets_path: PathBuf,
    pub tts_service: Arc<FileTtsService>,
    pub runtime: Arc<RuntimeContext>,
    pub fallback_provider: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let configuration = state.tts_service.configuration();
    let cache_directory = state
        .streaming_assets_path
        .join(configuration.streaming_asset_cache_directory_name());
    let cache_present = tokio::fs::metadata(&cache_directory)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let body = json!({
        "status": if cache_present { "ready" } else { "not_ready" },
        "cache_directory": configuration.streaming_asset_cache_directory_name(),
        "cache": if cache_present { "available" } else { "missing" },
        "runtime_mode": state.runtime.mode().as_str(),
        "fallback": state.fallback_provider,
    });

    let status = if cache_present {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(body))
}
