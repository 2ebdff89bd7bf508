pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::chart::handlers as chart;
use crate::sliders::handlers as sliders;
use crate::state::AppState;
use crate::storage::handlers as storage;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Competency configuration
        .route("/api/v1/competencies", get(sliders::handle_list_competencies))
        .route(
            "/api/v1/competencies/:competency_type/sliders",
            get(sliders::handle_get_sliders),
        )
        // AI suggestions
        .route(
            "/api/v1/competencies/:competency_type/suggestions",
            post(suggestions::handle_generate_suggestions),
        )
        // Saved assessment
        .route(
            "/api/v1/assessment/values",
            get(storage::handle_get_values).put(storage::handle_put_values),
        )
        .route(
            "/api/v1/assessment/notes",
            get(storage::handle_get_notes).put(storage::handle_put_notes),
        )
        .route("/api/v1/assessment", delete(storage::handle_clear_assessment))
        // Chart rendering
        .route("/api/v1/chart", post(chart::handle_render_chart))
        .with_state(state)
}
