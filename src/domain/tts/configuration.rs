use super::language::normalize_language_tag;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

pub const DEFAULT_CACHE_DIRECTORY_NAME: &str = "TextToSpeech";
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;
const CACHE_FILE_EXTENSION: &str = "pcm";

static UNSAFE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]+").unwrap());

/// Text-to-speech configuration shared by the resolver and the key deriver.
///
/// Cache keys embed the provider and voice, so switching either yields a
/// fresh set of cache slots instead of replaying audio from another voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtsConfiguration {
    /// Name of the synthesis provider the cache was generated with
    pub provider: String,
    pub voice: String,
    /// Default language for requests that do not name one
    pub language: String,
    /// Directory, relative to the content root, holding cache entries
    pub cache_directory_name: String,
    /// Sample rate of the cached PCM entries
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl Default for TtsConfiguration {
    fn default() -> Self {
        Self {
            provider: "polly".to_string(),
            voice: "Joanna".to_string(),
            language: "en".to_string(),
            cache_directory_name: DEFAULT_CACHE_DIRECTORY_NAME.to_string(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl TtsConfiguration {
    pub fn streaming_asset_cache_directory_name(&self) -> &str {
        &self.cache_directory_name
    }

    /// Cache filename for `text` in the configured default language
    pub fn unique_filename(&self, text: &str) -> String {
        let language = normalize_language_tag(&self.language);
        format!(
            "TTS_{}_{}_{}.{}",
            sanitize_segment(&self.provider),
            sanitize_segment(&self.voice),
            self.text_hash(&language, text),
            CACHE_FILE_EXTENSION
        )
    }

    /// Cache filename for `text` spoken in `language`.
    ///
    /// The layout carries an extra language segment, so it never equals the
    /// default-language filename for the same text.
    pub fn unique_filename_for_language(&self, text: &str, language: &str) -> String {
        let language = normalize_language_tag(language);
        format!(
            "TTS_{}_{}_{}_{}.{}",
            sanitize_segment(&self.provider),
            sanitize_segment(&self.voice),
            sanitize_segment(&language),
            self.text_hash(&language, text),
            CACHE_FILE_EXTENSION
        )
    }

    /// Relative location of a cache entry inside the content root
    pub fn cache_path(&self, filename: &str) -> String {
        format!("{}/{}", self.cache_directory_name, filename)
    }

    fn text_hash(&self, language: &str, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.provider.as_bytes());
        hasher.update([0]);
        hasher.update(self.voice.as_bytes());
        hasher.update([0]);
        hasher.update(language.as_bytes());
        hasher.update([0]);
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Replace anything that is not filesystem-safe, including the `_` separator
fn sanitize_segment(segment: &str) -> String {
    let sanitized = UNSAFE_SEGMENT.replace_all(segment.trim(), "-");
    if sanitized.is_empty() {
        "default".to_string()
    } else {
        sanitized.into_owned()
    }
}
