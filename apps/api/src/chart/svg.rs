use std::fmt::Write;

use crate::chart::radar::{Canvas, Point, TextStyle};

/// Canvas that records drawing calls as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Renders the complete SVG document.
    pub fn into_document(self) -> String {
        let mut doc = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        for element in &self.elements {
            doc.push('\n');
            doc.push_str(element);
        }
        doc.push_str("\n</svg>\n");
        doc
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn fmt_num(value: f64) -> String {
    format!("{:.2}", value)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

impl Canvas for SvgCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str, line_width: f64) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            escape(color),
            fmt_num(line_width)
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            escape(color)
        ));
    }

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            escape(color),
            fmt_num(line_width)
        ));
    }

    fn polygon(&mut self, points: &[Point], stroke: &str, fill: &str, line_width: f64) {
        let mut coords = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                coords.push(' ');
            }
            let _ = write!(coords, "{},{}", fmt_num(p.x), fmt_num(p.y));
        }
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round"/>"#,
            coords,
            escape(fill),
            escape(stroke),
            fmt_num(line_width)
        ));
    }

    fn text(&mut self, anchor: Point, text: &str, style: TextStyle<'_>) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" fill="{}" font-family="Arial" font-size="{}"{} text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            fmt_num(anchor.x),
            fmt_num(anchor.y),
            escape(style.color),
            fmt_num(style.size),
            if style.bold { r#" font-weight="bold""# } else { "" },
            escape(text)
        ));
    }
}
