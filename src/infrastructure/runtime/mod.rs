use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Tooling context, content comes straight from the packaged assets
    Editor,
    /// Application is running, content goes through the runtime file manager
    Playing,
}

impl RuntimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Editor => "editor",
            RuntimeMode::Playing => "playing",
        }
    }
}

/// Shared view of whether the application is currently playing.
///
/// The state can flip at any time (entering or leaving play mode), so callers
/// read it per operation instead of caching it.
#[derive(Debug)]
pub struct RuntimeContext {
    playing: AtomicBool,
}

impl RuntimeContext {
    pub fn new(mode: RuntimeMode) -> Self {
        Self {
            playing: AtomicBool::new(mode == RuntimeMode::Playing),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn set_playing(&self, playing: bool) {
        let previous = self.playing.swap(playing, Ordering::AcqRel);
        if previous != playing {
            tracing::info!(playing, "Runtime mode changed");
        }
    }

    pub fn set_mode(&self, mode: RuntimeMode) {
        self.set_playing(mode == RuntimeMode::Playing);
    }

    pub fn mode(&self) -> RuntimeMode {
        if self.is_playing() {
            RuntimeMode::Playing
        } else {
            RuntimeMode::Editor
        }
    }
}
