use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::models::competency::Slider;
use crate::sliders::loader::competency_display_name;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyTypeSummary {
    pub code: String,
    pub display_name: String,
}

/// GET /api/v1/competencies
pub async fn handle_list_competencies(
    State(state): State<AppState>,
) -> Json<Vec<CompetencyTypeSummary>> {
    let types = state.loader.list_available_competency_types().await;
    Json(
        types
            .into_iter()
            .map(|code| CompetencyTypeSummary {
                display_name: competency_display_name(&code).to_string(),
                code,
            })
            .collect(),
    )
}

/// GET /api/v1/competencies/:competency_type/sliders
pub async fn handle_get_sliders(
    State(state): State<AppState>,
    Path(competency_type): Path<String>,
) -> Json<Vec<Slider>> {
    Json(state.loader.load_sliders(&competency_type).await)
}
