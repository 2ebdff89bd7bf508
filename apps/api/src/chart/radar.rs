//! Radar chart geometry.
//!
//! `draw_radar_chart` is a pure function of its inputs: it clears the canvas and
//! redraws everything on every call. Invalid input draws nothing at all.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Values are plotted on the Dreyfus scale.
const CHART_MAX_VALUE: f64 = 5.0;
/// Space reserved around the plot for category labels.
const LABEL_MARGIN: f64 = 80.0;
const LABEL_OFFSET: f64 = 40.0;
const LABEL_LINE_SPACING: f64 = 6.0;
const POINT_OUTER_RADIUS: f64 = 6.0;
const POINT_INNER_RADIUS: f64 = 4.0;

const RING_LABEL_COLOR: &str = "#6c757d";
const TEXT_COLOR: &str = "#212529";
const POINT_INNER_COLOR: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub color: &'a str,
    pub size: f64,
    pub bold: bool,
}

/// Drawing surface. Text is always centered on its anchor point.
pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str, line_width: f64);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64);
    fn polygon(&mut self, points: &[Point], stroke: &str, fill: &str, line_width: f64);
    fn text(&mut self, anchor: Point, text: &str, style: TextStyle<'_>);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColors {
    pub line: String,
    pub fill: String,
    pub point: String,
    pub grid: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            line: "#007bff".to_string(),
            fill: "rgba(0, 123, 255, 0.2)".to_string(),
            point: "#007bff".to_string(),
            grid: "#e9ecef".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default)]
    pub colors: Option<ChartColors>,
}

/// Checks the drawing preconditions: non-empty, equal-length arrays.
pub fn validate(data: &ChartData) -> Result<(), String> {
    if data.categories.is_empty() {
        return Err("Invalid or empty chart data provided".to_string());
    }
    if data.categories.len() != data.values.len() {
        return Err(format!(
            "Categories and values arrays must have the same length ({} vs {})",
            data.categories.len(),
            data.values.len()
        ));
    }
    Ok(())
}

/// Splits a category name into at most two label lines.
fn wrap_label(category: &str) -> Vec<String> {
    let words: Vec<&str> = category.split(' ').collect();
    match words.len() {
        0 | 1 => vec![category.to_string()],
        2 => vec![words[0].to_string(), words[1].to_string()],
        _ => vec![words[..2].join(" "), words[2..].join(" ")],
    }
}

/// Draws the chart. Returns `false` (and touches nothing) when `data` is invalid.
pub fn draw_radar_chart(canvas: &mut dyn Canvas, data: &ChartData) -> bool {
    if let Err(reason) = validate(data) {
        warn!("Radar chart not drawn: {reason}");
        return false;
    }

    let center = Point {
        x: canvas.width() / 2.0,
        y: canvas.height() / 2.0,
    };
    let radius = (center.x.min(center.y) - LABEL_MARGIN).max(0.0);
    let default_colors = ChartColors::default();
    let colors = data.colors.as_ref().unwrap_or(&default_colors);

    canvas.clear();

    // Grid rings with level labels.
    let ring_step = radius / CHART_MAX_VALUE;
    for level in 1..=CHART_MAX_VALUE as u32 {
        let ring_radius = ring_step * level as f64;
        canvas.stroke_circle(center, ring_radius, &colors.grid, 1.0);
        canvas.text(
            Point {
                x: center.x,
                y: center.y - ring_radius + 5.0,
            },
            &level.to_string(),
            TextStyle {
                color: RING_LABEL_COLOR,
                size: 12.0,
                bold: false,
            },
        );
    }

    // Axes and category labels, starting at 12 o'clock.
    let count = data.categories.len();
    let angle_step = 2.0 * PI / count as f64;
    let polar = |index: usize, distance: f64| {
        let angle = index as f64 * angle_step - PI / 2.0;
        Point {
            x: center.x + angle.cos() * distance,
            y: center.y + angle.sin() * distance,
        }
    };

    for (i, category) in data.categories.iter().enumerate() {
        canvas.line(center, polar(i, radius), &colors.grid, 1.0);

        let anchor = polar(i, radius + LABEL_OFFSET);
        let style = TextStyle {
            color: TEXT_COLOR,
            size: 11.0,
            bold: true,
        };
        match wrap_label(category).as_slice() {
            [first, second] => {
                canvas.text(
                    Point {
                        y: anchor.y - LABEL_LINE_SPACING,
                        ..anchor
                    },
                    first,
                    style,
                );
                canvas.text(
                    Point {
                        y: anchor.y + LABEL_LINE_SPACING,
                        ..anchor
                    },
                    second,
                    style,
                );
            }
            lines => {
                for line in lines {
                    canvas.text(anchor, line, style);
                }
            }
        }
    }

    // Data polygon and point markers.
    let clamped: Vec<f64> = data
        .values
        .iter()
        .map(|v| v.clamp(0.0, CHART_MAX_VALUE))
        .collect();
    let points: Vec<Point> = clamped
        .iter()
        .enumerate()
        .map(|(i, value)| polar(i, ring_step * value))
        .collect();

    canvas.polygon(&points, &colors.line, &colors.fill, 3.0);

    for (point, value) in points.iter().zip(&clamped) {
        canvas.fill_circle(*point, POINT_OUTER_RADIUS, &colors.point);
        canvas.fill_circle(*point, POINT_INNER_RADIUS, POINT_INNER_COLOR);
        canvas.text(
            *point,
            &format!("{value:.1}"),
            TextStyle {
                color: TEXT_COLOR,
                size: 9.0,
                bold: true,
            },
        );
    }

    debug!("Radar chart drawn with {count} categories");
    true
}
