use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::infrastructure::runtime::{RuntimeContext, RuntimeMode};

/// Body of GET and PUT /api/runtime/mode
#[derive(Debug, Serialize, Deserialize)]
pub struct RuntimeModeBody {
    pub mode: RuntimeMode,
}

pub struct RuntimeController {
    runtime: Arc<RuntimeContext>,
}

impl RuntimeController {
    pub fn new(runtime: Arc<RuntimeContext>) -> Self {
        Self { runtime }
    }

    /// GET /api/runtime/mode - Whether content is served as in the editor or while playing
    pub async fn get_mode(State(controller): State<Arc<RuntimeController>>) -> Json<RuntimeModeBody> {
        Json(RuntimeModeBody {
            mode: controller.runtime.mode(),
        })
    }

    /// PUT /api/runtime/mode - Enter or leave play mode
    pub async fn set_mode(
        State(controller): State<Arc<RuntimeController>>,
        Json(request): Json<RuntimeModeBody>,
    ) -> Json<RuntimeModeBody> {
        controller.runtime.set_mode(request.mode);
        Json(RuntimeModeBody {
            mode: controller.runtime.mode(),
        })
    }
}
