use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::localization::MultipleLanguagesSettings;

/// Response for GET /api/localization/languages
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub application_language: String,
    pub active_languages: Vec<String>,
    pub active_or_default_languages: Vec<String>,
}

pub struct LocalizationController {
    settings: MultipleLanguagesSettings,
}

impl LocalizationController {
    pub fn new(settings: MultipleLanguagesSettings) -> Self {
        Self { settings }
    }

    /// GET /api/localization/languages - Languages for the current session
    pub async fn get_languages(
        State(controller): State<Arc<LocalizationController>>,
    ) -> Json<LanguagesResponse> {
        let settings = &controller.settings;
        Json(LanguagesResponse {
            application_language: settings.application_language.clone(),
            active_languages: settings.active_languages.clone(),
            active_or_default_languages: settings.active_or_default_languages(),
        })
    }
}
