//! Paint styles handed to [`Surface`](crate::surface::Surface).
//!
//! Widths and sizes here are in pixels. Draw options carry them in canvas
//! units instead, which the `in_canvas_units` constructors convert.

use crate::color::Color;

/// Line width unit: 1/600 of the canvas height.
pub const LINE_WIDTH_UNIT: f64 = 1.0 / 600.0;
/// Marker radius unit: 1/200 of the canvas height.
pub const MARKER_SIZE_UNIT: f64 = 1.0 / 200.0;

/// Fill + stroke style for rectangles and polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, opacity: 1.0 }
    }
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Default::default() }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Default::default() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineDash {
    /// SVG `stroke-dasharray`, in multiples of the line width.
    fn pattern(self, width: f64) -> Option<String> {
        let w = width.max(1.0);
        match self {
            LineDash::Solid => None,
            LineDash::Dashed => Some(format!("{} {}", 6.0 * w, 3.0 * w)),
            LineDash::Dotted => Some(format!("{} {}", 2.0 * w, 2.0 * w)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Option<String>,
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f64, dash: LineDash) -> Self {
        Self { color, width, dash: dash.pattern(width) }
    }

    /// `width_units` is a multiple of [`LINE_WIDTH_UNIT`].
    pub fn in_canvas_units(color: Color, width_units: f64, dash: LineDash, canvas_h: f64) -> Self {
        Self::dashed(color, width_units * LINE_WIDTH_UNIT * canvas_h, dash)
    }
}

/// Text style. `size` is in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Color::BLACK,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Central,
    Hanging,
}

impl TextBaseline {
    pub fn as_str(&self) -> &str {
        match self {
            TextBaseline::Alphabetic => "auto",
            TextBaseline::Central => "central",
            TextBaseline::Hanging => "hanging",
        }
    }
}

/// Solid data marker; `size` is the radius in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub size: f64,
    pub color: Color,
}

impl MarkerStyle {
    /// `size_units` is a multiple of [`MARKER_SIZE_UNIT`].
    pub fn in_canvas_units(shape: MarkerShape, color: Color, size_units: f64, canvas_h: f64) -> Self {
        Self { shape, size: size_units * MARKER_SIZE_UNIT * canvas_h, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Diamond,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn marker_radius_follows_canvas_height() {
        let m = MarkerStyle::in_canvas_units(MarkerShape::Circle, Color::BLACK, 1.0, 600.0);
        assert_relative_eq!(m.size, 3.0);
        let big = MarkerStyle::in_canvas_units(MarkerShape::Square, Color::BLACK, 1.5, 1200.0);
        assert_relative_eq!(big.size, 9.0);
    }

    #[test]
    fn line_width_follows_canvas_height() {
        let l = LineStyle::in_canvas_units(Color::BLACK, 2.0, LineDash::Solid, 600.0);
        assert_relative_eq!(l.width, 2.0);
        assert!(l.dash.is_none());
    }

    #[test]
    fn dash_pattern_scales_with_thick_lines() {
        let thin = LineStyle::dashed(Color::BLACK, 0.5, LineDash::Dashed);
        assert_eq!(thin.dash.as_deref(), Some("6 3"));
        let thick = LineStyle::dashed(Color::BLACK, 2.0, LineDash::Dotted);
        assert_eq!(thick.dash.as_deref(), Some("4 4"));
    }
}
