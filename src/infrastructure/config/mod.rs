use crate::domain::localization::MultipleLanguagesSettings;
use crate::domain::tts::configuration::{DEFAULT_CACHE_DIRECTORY_NAME, DEFAULT_SAMPLE_RATE};
use crate::domain::tts::TtsConfiguration;
use crate::infrastructure::runtime::RuntimeMode;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Content roots
    pub streaming_assets_path: PathBuf,
    pub persistent_data_path: PathBuf,
    pub runtime_mode: RuntimeMode,
    // TTS cache layout and naming
    pub tts_cache_directory: String,
    pub tts_provider_name: String,
    pub tts_voice: String,
    pub tts_sample_rate: u32,
    pub tts_memory_cache_enabled: bool,
    pub tts_request_timeout_secs: u64,
    // Localization
    pub application_language: String,
    pub active_languages: Vec<String>,
    // Live synthesis fallback
    pub fallback_provider: FallbackProvider,
    pub aws_region: String,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FallbackProvider {
    None,
    Polly,
    OpenAi,
}

impl FallbackProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackProvider::None => "none",
            FallbackProvider::Polly => "polly",
            FallbackProvider::OpenAi => "openai",
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            streaming_assets_path: env_or("STREAMING_ASSETS_PATH", "./StreamingAssets").into(),
            persistent_data_path: env_or("PERSISTENT_DATA_PATH", "./PersistentData").into(),
            runtime_mode: match env_or("RUNTIME_MODE", "playing").to_lowercase().as_str() {
                "editor" => RuntimeMode::Editor,
                _ => RuntimeMode::Playing,
            },
            tts_cache_directory: env_or("TTS_CACHE_DIRECTORY", DEFAULT_CACHE_DIRECTORY_NAME),
            tts_provider_name: env_or("TTS_PROVIDER_NAME", "polly"),
            tts_voice: env_or("TTS_VOICE", "Joanna"),
            tts_sample_rate: env::var("TTS_SAMPLE_RATE")
                .unwrap_or_else(|_| DEFAULT_SAMPLE_RATE.to_string())
                .parse()?,
            tts_memory_cache_enabled: env_or("TTS_MEMORY_CACHE_ENABLED", "false").to_lowercase()
                == "true",
            tts_request_timeout_secs: env::var("TTS_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            application_language: env_or("APPLICATION_LANGUAGE", "en"),
            active_languages: parse_list(&env_or("ACTIVE_LANGUAGES", "")),
            fallback_provider: parse_fallback_provider(&env_or("TTS_FALLBACK_PROVIDER", "none"))?,
            aws_region: env_or("AWS_REGION", "ap-south-1"),
            openai_tts_model: env_or("OPENAI_TTS_MODEL", "tts-1"),
            openai_tts_voice: env_or("OPENAI_TTS_VOICE", "alloy"),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Initial TTS configuration, replaceable at runtime
    pub fn tts_configuration(&self) -> TtsConfiguration {
        TtsConfiguration {
            provider: self.tts_provider_name.clone(),
            voice: self.tts_voice.clone(),
            language: self.application_language.clone(),
            cache_directory_name: self.tts_cache_directory.clone(),
            sample_rate: self.tts_sample_rate,
        }
    }

    pub fn language_settings(&self) -> MultipleLanguagesSettings {
        MultipleLanguagesSettings::new(&self.application_language, self.active_languages.clone())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_fallback_provider(value: &str) -> Result<FallbackProvider, String> {
    match value.trim().to_lowercase().as_str() {
        "" | "none" => Ok(FallbackProvider::None),
        "polly" => Ok(FallbackProvider::Polly),
        "openai" => Ok(FallbackProvider::OpenAi),
        other => Err(format!("Unknown TTS_FALLBACK_PROVIDER '{}'", other)),
    }
}
