pub mod localization;
pub mod tts;
