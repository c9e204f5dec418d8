use super::pcm::encode_pcm16le;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where an audio buffer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    Cache,
    Synthesized,
}

impl AudioSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioSource::Cache => "cache",
            AudioSource::Synthesized => "synthesized",
        }
    }
}

impl std::fmt::Display for AudioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded, playable audio.
///
/// Samples are shared and never mutated after construction, so cloning a
/// buffer is cheap and clones always observe the same audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Human readable label, the text the audio was rendered from
    pub label: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Arc<[f32]>,
    pub source: AudioSource,
}

impl AudioBuffer {
    pub fn mono(
        label: impl Into<String>,
        sample_rate: u32,
        samples: Vec<f32>,
        source: AudioSource,
    ) -> Self {
        Self {
            label: label.into(),
            channels: 1,
            sample_rate,
            samples: samples.into(),
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / (self.sample_rate as f32 * self.channels as f32)
    }

    /// Re-encode the samples as PCM16LE for delivery
    pub fn to_pcm16le(&self) -> Vec<u8> {
        encode_pcm16le(&self.samples)
    }
}
