//! Cover document rendering.
//!
//! Wraps a normalized pattern into a complete SVG document: the pattern fills
//! the whole canvas and a rounded, translucent panel sits behind the centered
//! title and optional subtitle. Every caller-supplied string is XML-escaped
//! before it lands in text or attribute position.

use crate::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_HEIGHT, DEFAULT_SUBTITLE_SIZE, DEFAULT_TEXT_BG,
    DEFAULT_TEXT_BG_OPACITY, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_X, DEFAULT_TEXT_Y,
    DEFAULT_TITLE_SIZE, DEFAULT_WIDTH, PATTERN_ID,
};
use anyhow::{bail, Result};
use std::fmt::Write as _;

/// Text styling for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Title and subtitle fill
    pub color: String,
    /// Font stack
    pub font_family: String,
    /// Title font size
    pub title_size: f64,
    /// Subtitle font size
    pub subtitle_size: f64,
    /// Readability panel fill
    pub panel_color: String,
    /// Readability panel opacity
    pub panel_opacity: f64,
    /// Horizontal anchor, a percentage or absolute coordinate
    pub x: String,
    /// Vertical anchor, a percentage or absolute coordinate
    pub y: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_TEXT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            title_size: DEFAULT_TITLE_SIZE,
            subtitle_size: DEFAULT_SUBTITLE_SIZE,
            panel_color: DEFAULT_TEXT_BG.to_string(),
            panel_opacity: DEFAULT_TEXT_BG_OPACITY,
            x: DEFAULT_TEXT_X.to_string(),
            y: DEFAULT_TEXT_Y.to_string(),
        }
    }
}

/// Everything needed to render one cover.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverRequest {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Normalized pattern block (must carry the fixed pattern id)
    pub pattern: String,
    /// Title text, required
    pub title: String,
    /// Optional subtitle shown below the title
    pub subtitle: Option<String>,
    /// Overlay styling
    pub style: TextStyle,
}

impl CoverRequest {
    /// Creates a request with default canvas size and styling.
    pub fn new(pattern: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pattern: pattern.into(),
            title: title.into(),
            subtitle: None,
            style: TextStyle::default(),
        }
    }

    fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref().filter(|s| !s.is_empty())
    }
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Position and size of the readability panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    /// Left edge
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Panel width
    pub width: i64,
    /// Panel height
    pub height: i64,
    /// Corner radius for both `rx` and `ry`
    pub radius: i64,
}

impl Panel {
    /// Centered horizontally, a bit above the middle, taller with a subtitle.
    #[must_use]
    pub fn for_canvas(width: f64, height: f64, has_subtitle: bool) -> Self {
        let panel_width = round(width * 0.86);
        let panel_height = round(height * if has_subtitle { 0.30 } else { 0.22 });
        Self {
            x: round((width - panel_width as f64) / 2.0),
            y: round(height * 0.36),
            width: panel_width,
            height: panel_height,
            radius: round(width.min(height) * 0.02),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Renders a full cover document.
///
/// Fails only when the title is empty.
pub fn render_cover(request: &CoverRequest) -> Result<String> {
    if request.title.trim().is_empty() {
        bail!("Cover title must not be empty");
    }

    let mut svg = document_head(request.width, request.height, &request.pattern);
    write_text_layer(&mut svg, request);
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Renders the pattern alone over the whole canvas, without any text.
#[must_use]
pub fn render_background(width: f64, height: f64, pattern: &str) -> String {
    let mut svg = document_head(width, height, pattern);
    svg.push_str("</svg>\n");
    svg
}

fn document_head(width: f64, height: f64, pattern: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
  <defs>
    {pattern}
  </defs>
  <rect width="100%" height="100%" fill="url(#{PATTERN_ID})"/>
"#
    )
}

fn write_text_layer(svg: &mut String, request: &CoverRequest) {
    let style = &request.style;
    let subtitle = request.subtitle();
    let panel = Panel::for_canvas(request.width, request.height, subtitle.is_some());

    let x = escape_xml(&style.x);
    let y = escape_xml(&style.y);
    let font_family = escape_xml(&style.font_family);
    let color = escape_xml(&style.color);

    svg.push_str("  <g>\n");
    let _ = writeln!(
        svg,
        r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" fill-opacity="{}"/>"#,
        panel.x,
        panel.y,
        panel.width,
        panel.height,
        escape_xml(&style.panel_color),
        style.panel_opacity,
        r = panel.radius,
    );

    let title_stroke = round(style.title_size * 0.14).max(6);
    let _ = writeln!(
        svg,
        r#"    <text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="middle" font-family="{font_family}" font-size="{}" font-weight="800" fill="{color}" style="paint-order:stroke;stroke:#000;stroke-opacity:0.35;stroke-width:{title_stroke}">{}</text>"#,
        style.title_size,
        escape_xml(&request.title),
    );

    if let Some(subtitle) = subtitle {
        let dy = round(style.title_size * 0.75);
        let subtitle_stroke = round(style.subtitle_size * 0.12).max(4);
        let _ = writeln!(
            svg,
            r#"    <text x="{x}" y="{y}" dy="{dy}" text-anchor="middle" dominant-baseline="middle" font-family="{font_family}" font-size="{}" font-weight="600" fill="{color}" style="paint-order:stroke;stroke:#000;stroke-opacity:0.25;stroke-width:{subtitle_stroke}">{}</text>"#,
            style.subtitle_size,
            escape_xml(subtitle),
        );
    }

    svg.push_str("  </g>\n");
}
