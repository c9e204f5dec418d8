use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_file_cache::controllers::{
    health::HealthState, localization::LocalizationController, runtime::RuntimeController,
    tts::TtsController,
};
use tts_file_cache::domain::tts::{FileTtsService, TextToSpeechProvider};
use tts_file_cache::infrastructure::config::{Config, FallbackProvider, LogFormat};
use tts_file_cache::infrastructure::http::{build_router, start_http_server};
use tts_file_cache::infrastructure::repositories::{
    ContentStore, ContentStoreSelector, DisabledTtsRepository, OpenAiTtsRepository,
    PackagedContentStore, PollyTtsRepository, RuntimeContentStore,
};
use tts_file_cache::infrastructure::runtime::RuntimeContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TTS file cache on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        streaming_assets = %config.streaming_assets_path.display(),
        persistent_data = %config.persistent_data_path.display(),
        cache_directory = %config.tts_cache_directory,
        runtime_mode = config.runtime_mode.as_str(),
        development = config.is_development(),
        "Content roots configured"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Content stores
    let runtime = Arc::new(RuntimeContext::new(config.runtime_mode));
    let packaged_store: Arc<dyn ContentStore> =
        Arc::new(PackagedContentStore::new(config.streaming_assets_path.clone()));
    let runtime_store: Arc<dyn ContentStore> = Arc::new(RuntimeContentStore::new(
        config.persistent_data_path.clone(),
        config.streaming_assets_path.clone(),
    ));
    let content_store: Arc<dyn ContentStore> = Arc::new(ContentStoreSelector::new(
        runtime.clone(),
        runtime_store,
        packaged_store.clone(),
    ));

    // 2. Live synthesis fallback
    let fallback = create_fallback_provider(&config).await;

    // 3. Services
    tracing::info!("Instantiating services...");
    let tts_service = Arc::new(FileTtsService::new(
        config.tts_configuration(),
        content_store,
        fallback,
        config.tts_memory_cache_enabled,
    ));

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let tts_controller = Arc::new(TtsController::new(
        tts_service.clone(),
        packaged_store,
        Duration::from_secs(config.tts_request_timeout_secs),
    ));
    let localization_controller =
        Arc::new(LocalizationController::new(config.language_settings()));
    let runtime_controller = Arc::new(RuntimeController::new(runtime.clone()));
    let health_state = Arc::new(HealthState {
        streaming_assets_path: config.streaming_assets_path.clone(),
        tts_service,
        runtime,
        fallback_provider: config.fallback_provider.as_str(),
    });

    let app = build_router(
        health_state,
        tts_controller,
        localization_controller,
        runtime_controller,
    );
    start_http_server(config, app).await?;

    Ok(())
}

async fn create_fallback_provider(config: &Config) -> Arc<dyn TextToSpeechProvider> {
    match config.fallback_provider {
        FallbackProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));

            Arc::new(PollyTtsRepository::new(
                polly_client,
                config.application_language.clone(),
            ))
        }
        FallbackProvider::OpenAi => {
            tracing::info!(
                model = %config.openai_tts_model,
                voice = %config.openai_tts_voice,
                "Initializing OpenAI TTS client"
            );
            let client = Arc::new(async_openai::Client::new());

            Arc::new(OpenAiTtsRepository::new(
                client,
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
                config.application_language.clone(),
            ))
        }
        FallbackProvider::None => {
            tracing::info!("Live TTS fallback disabled, serving cached audio only");
            Arc::new(DisabledTtsRepository)
        }
    }
}

fn init_logging(config: &Config) {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "tts_file_cache=debug,tower_http=debug".into())
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
