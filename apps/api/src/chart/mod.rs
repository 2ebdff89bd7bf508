// Radar chart rendering: geometry against a `Canvas` trait, with an SVG backend.

pub mod handlers;
pub mod radar;
pub mod svg;

pub use radar::{draw_radar_chart, ChartData};
pub use svg::SvgCanvas;
