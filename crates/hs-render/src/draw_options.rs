//! Typed per-item draw options.
//!
//! Options may be given programmatically through the builder methods or as
//! `key=value` pairs (`mode=P`, `lcolor=azure+2`, `fstyle=0`), which is how
//! command-line and config driven plots pass them.

use std::str::FromStr;

use crate::RenderError;
use crate::color::Color;
pub use crate::primitives::LineDash;
use crate::primitives::{LineStyle, MarkerShape, MarkerStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Step outline (and fill, when a fill colour is set).
    #[default]
    Hist,
    /// Markers with vertical error bars at bin centres.
    Points,
    /// Filled area without outline.
    Fill,
    /// Polyline through bin centres.
    Line,
    /// 2D heat map with colour scale.
    Colz,
}

impl FromStr for DrawMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hist" | "h" => Ok(DrawMode::Hist),
            "p" | "points" | "pe" | "e" => Ok(DrawMode::Points),
            "f" | "fill" => Ok(DrawMode::Fill),
            "l" | "c" | "line" => Ok(DrawMode::Line),
            "colz" => Ok(DrawMode::Colz),
            _ => Err(invalid("mode", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillStyle {
    #[default]
    Solid,
    Hollow,
    Hatched,
}

impl FromStr for FillStyle {
    type Err = RenderError;

    /// Accepts names or the common ROOT codes (1001 solid, 0 hollow, 3xxx hatched).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "solid" | "1001" => Ok(FillStyle::Solid),
            "hollow" | "none" | "0" => Ok(FillStyle::Hollow),
            "hatched" => Ok(FillStyle::Hatched),
            _ if t.len() == 4 && t.starts_with('3') && t.chars().all(|c| c.is_ascii_digit()) => {
                Ok(FillStyle::Hatched)
            }
            _ => Err(invalid("fstyle", s)),
        }
    }
}

impl FromStr for LineDash {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" | "1" => Ok(LineDash::Solid),
            "dashed" | "2" => Ok(LineDash::Dashed),
            "dotted" | "3" => Ok(LineDash::Dotted),
            _ => Err(invalid("lstyle", s)),
        }
    }
}

/// How a series is drawn. Unset colours fall back to the style's data colour.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    pub mode: DrawMode,
    pub marker_color: Option<Color>,
    pub marker_shape: MarkerShape,
    /// Marker radius in units of 1/200 of the canvas height.
    pub marker_size: f64,
    pub line_color: Option<Color>,
    pub line_width: f64,
    pub line_dash: LineDash,
    pub fill_color: Option<Color>,
    pub fill_style: FillStyle,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            mode: DrawMode::Hist,
            marker_color: None,
            marker_shape: MarkerShape::Circle,
            marker_size: 1.0,
            line_color: None,
            line_width: 1.0,
            line_dash: LineDash::Solid,
            fill_color: None,
            fill_style: FillStyle::Solid,
        }
    }
}

impl DrawOptions {
    pub fn hist() -> Self {
        Self::default()
    }

    pub fn points() -> Self {
        Self { mode: DrawMode::Points, ..Self::default() }
    }

    pub fn line() -> Self {
        Self { mode: DrawMode::Line, ..Self::default() }
    }

    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_marker_color(mut self, color: Color) -> Self {
        self.marker_color = Some(color);
        self
    }

    pub fn with_marker_shape(mut self, shape: MarkerShape) -> Self {
        self.marker_shape = shape;
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_dash(mut self, dash: LineDash) -> Self {
        self.line_dash = dash;
        self
    }

    pub fn with_fill(mut self, color: Color, style: FillStyle) -> Self {
        self.fill_color = Some(color);
        self.fill_style = style;
        self
    }

    pub fn with_fill_style(mut self, style: FillStyle) -> Self {
        self.fill_style = style;
        self
    }

    /// Build options from `key=value` pairs. Later keys override earlier ones.
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> crate::Result<Self> {
        let mut opts = Self::default();
        for (k, v) in pairs {
            opts.set(k.as_ref(), v.as_ref())?;
        }
        Ok(opts)
    }

    pub fn set(&mut self, key: &str, value: &str) -> crate::Result<()> {
        match key {
            "mode" | "style" => self.mode = value.parse()?,
            "mcolor" => self.marker_color = Some(parse_color(key, value)?),
            "mstyle" => self.marker_shape = parse_marker(value)?,
            "msize" => self.marker_size = parse_positive(key, value)?,
            "lcolor" => self.line_color = Some(parse_color(key, value)?),
            "lwidth" => self.line_width = parse_positive(key, value)?,
            "lstyle" => self.line_dash = value.parse()?,
            "fcolor" => self.fill_color = Some(parse_color(key, value)?),
            "fstyle" => self.fill_style = value.parse()?,
            _ => return Err(RenderError::UnknownStyleKey(key.to_string())),
        }
        Ok(())
    }

    pub(crate) fn resolved_line(&self, fallback: Color, canvas_h: f64) -> LineStyle {
        let color = self.line_color.unwrap_or(fallback);
        LineStyle::in_canvas_units(color, self.line_width, self.line_dash, canvas_h)
    }

    pub(crate) fn resolved_marker(&self, fallback: Color, canvas_h: f64) -> MarkerStyle {
        let color = self.marker_color.unwrap_or(fallback);
        MarkerStyle::in_canvas_units(self.marker_shape, color, self.marker_size, canvas_h)
    }
}

fn invalid(key: &str, value: &str) -> RenderError {
    RenderError::InvalidStyleValue { key: key.to_string(), value: value.to_string() }
}

fn parse_color(key: &str, value: &str) -> crate::Result<Color> {
    value.parse::<Color>().map_err(|_| invalid(key, value))
}

fn parse_positive(key: &str, value: &str) -> crate::Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(key, value)),
    }
}

fn parse_marker(value: &str) -> crate::Result<MarkerShape> {
    match value.trim().to_ascii_lowercase().as_str() {
        "circle" | "20" | "8" => Ok(MarkerShape::Circle),
        "square" | "21" => Ok(MarkerShape::Square),
        "triangle" | "22" => Ok(MarkerShape::Triangle),
        "diamond" | "33" => Ok(MarkerShape::Diamond),
        _ => Err(invalid("mstyle", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_build_options() {
        let o = DrawOptions::from_pairs(&[("mode", "hist"), ("lcolor", "azure+2"), ("lwidth", "2"), ("fstyle", "0")])
            .unwrap();
        assert_eq!(o.mode, DrawMode::Hist);
        assert_eq!(o.line_color, Some(Color::hex("#3f90da")));
        assert_eq!(o.line_width, 2.0);
        assert_eq!(o.fill_style, FillStyle::Hollow);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = DrawOptions::from_pairs(&[("colour", "red")]).unwrap_err();
        assert!(matches!(err, RenderError::UnknownStyleKey(k) if k == "colour"));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            DrawOptions::from_pairs(&[("lwidth", "-1")]),
            Err(RenderError::InvalidStyleValue { .. })
        ));
        assert!(matches!(
            DrawOptions::from_pairs(&[("mcolor", "notacolour")]),
            Err(RenderError::InvalidStyleValue { .. })
        ));
        assert!(matches!("zz".parse::<DrawMode>(), Err(RenderError::InvalidStyleValue { .. })));
    }

    #[test]
    fn root_fill_codes() {
        assert_eq!("3354".parse::<FillStyle>().unwrap(), FillStyle::Hatched);
        assert_eq!("1001".parse::<FillStyle>().unwrap(), FillStyle::Solid);
        assert!("3".parse::<FillStyle>().is_err());
    }
}
