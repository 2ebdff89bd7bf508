//! Axum route handlers for saved assessment values and notes.

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{NOTES_KEY, VALUES_KEY};

pub type SliderValues = BTreeMap<i32, i32>;
pub type SliderNotes = BTreeMap<i32, String>;

fn encode<T: Serialize>(map: &T) -> Result<String, AppError> {
    serde_json::to_string(map).map_err(|e| AppError::Validation(format!("unserializable map: {e}")))
}

/// Absent or unreadable blobs read as an empty map.
fn decode<T: DeserializeOwned + Default>(key: &str, blob: Option<String>) -> T {
    match blob {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable '{key}' blob: {e}");
            T::default()
        }),
        None => T::default(),
    }
}

/// GET /api/v1/assessment/values
pub async fn handle_get_values(
    State(state): State<AppState>,
) -> Result<Json<SliderValues>, AppError> {
    let blob = state.store.get_values().await?;
    Ok(Json(decode(VALUES_KEY, blob)))
}

/// PUT /api/v1/assessment/values
pub async fn handle_put_values(
    State(state): State<AppState>,
    Json(values): Json<SliderValues>,
) -> Result<Json<SliderValues>, AppError> {
    state.store.set_values(&encode(&values)?).await?;
    Ok(Json(values))
}

/// GET /api/v1/assessment/notes
pub async fn handle_get_notes(
    State(state): State<AppState>,
) -> Result<Json<SliderNotes>, AppError> {
    let blob = state.store.get_notes().await?;
    Ok(Json(decode(NOTES_KEY, blob)))
}

/// PUT /api/v1/assessment/notes
pub async fn handle_put_notes(
    State(state): State<AppState>,
    Json(notes): Json<SliderNotes>,
) -> Result<Json<SliderNotes>, AppError> {
    state.store.set_notes(&encode(&notes)?).await?;
    Ok(Json(notes))
}

/// DELETE /api/v1/assessment
pub async fn handle_clear_assessment(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.store.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
