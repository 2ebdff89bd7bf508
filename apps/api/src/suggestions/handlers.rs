//! Axum route handlers for the Suggestions API.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::competency::CompetencySuggestion;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub values: HashMap<i32, i32>,
    #[serde(default)]
    pub notes: HashMap<i32, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub competency_type: String,
    pub generated_at: DateTime<Utc>,
    pub suggestions: Vec<CompetencySuggestion>,
}

/// POST /api/v1/competencies/:competency_type/suggestions
///
/// Loads the sliders for the type and asks the model for one suggestion each.
/// Per-slider failures come back as fallback suggestions, never as an error.
pub async fn handle_generate_suggestions(
    State(state): State<AppState>,
    Path(competency_type): Path<String>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let generator = state.suggestions.as_ref().ok_or(AppError::FeatureDisabled)?;

    let sliders = state.loader.load_sliders(&competency_type).await;
    let suggestions = generator
        .generate_suggestions(&sliders, &request.values, &request.notes)
        .await;

    Ok(Json(SuggestionsResponse {
        competency_type,
        generated_at: Utc::now(),
        suggestions,
    }))
}
