pub mod health;
pub mod localization;
pub mod runtime;
pub mod tts;
