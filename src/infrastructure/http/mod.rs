pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{
    health::{self, HealthState},
    localization::LocalizationController,
    runtime::RuntimeController,
    tts::TtsController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId};

/// Build the application router with all routes configured
pub fn build_router(
    health_state: Arc<HealthState>,
    tts_controller: Arc<TtsController>,
    localization_controller: Arc<LocalizationController>,
    runtime_controller: Arc<RuntimeController>,
) -> Router {
    let tts_routes = Router::new()
        .route("/api/tts/synthesize", post(TtsController::synthesize))
        .route("/api/tts/batch", post(TtsController::synthesize_batch))
        .route(
            "/api/tts/configuration",
            get(TtsController::get_configuration).put(TtsController::set_configuration),
        )
        .route("/api/tts/content/status", post(TtsController::content_status))
        .with_state(tts_controller);

    let localization_routes = Router::new()
        .route(
            "/api/localization/languages",
            get(LocalizationController::get_languages),
        )
        .with_state(localization_controller);

    let runtime_routes = Router::new()
        .route(
            "/api/runtime/mode",
            get(RuntimeController::get_mode).put(RuntimeController::set_mode),
        )
        .with_state(runtime_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state)
        .merge(tts_routes)
        .merge(localization_routes)
        .merge(runtime_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
