use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::chart::{draw_radar_chart, ChartData, SvgCanvas};
use crate::errors::AppError;

const DEFAULT_SIZE: u32 = 600;
const MIN_SIZE: u32 = 200;
const MAX_SIZE: u32 = 4000;

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    #[serde(flatten)]
    pub data: ChartData,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

fn dimension(name: &str, value: Option<u32>) -> Result<f64, AppError> {
    let value = value.unwrap_or(DEFAULT_SIZE);
    if !(MIN_SIZE..=MAX_SIZE).contains(&value) {
        return Err(AppError::Validation(format!(
            "{name} must be between {MIN_SIZE} and {MAX_SIZE}, got {value}"
        )));
    }
    Ok(value as f64)
}

/// POST /api/v1/chart
///
/// Renders the radar chart as SVG. Invalid chart data yields a blank canvas,
/// not an error.
pub async fn handle_render_chart(Json(request): Json<ChartRequest>) -> Result<Response, AppError> {
    let width = dimension("width", request.width)?;
    let height = dimension("height", request.height)?;

    let mut canvas = SvgCanvas::new(width, height);
    draw_radar_chart(&mut canvas, &request.data);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], canvas.into_document()).into_response())
}
