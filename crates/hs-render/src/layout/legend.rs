use std::str::FromStr;

use crate::color::Color;
use crate::draw_options::FillStyle;
use crate::layout::geometry::PlotArea;
use crate::markup;
use crate::primitives::*;
use crate::surface::Surface;
use crate::RenderError;

/// Which parts of a drawn item are repeated in its legend swatch.
///
/// Parsed from ROOT-style option letters: `l` line, `p` marker, `f` fill,
/// `e` error bar. An empty string gives a text-only entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegendMarker {
    pub line: bool,
    pub marker: bool,
    pub fill: bool,
    pub error: bool,
}

impl LegendMarker {
    pub const FILL: LegendMarker = LegendMarker { line: false, marker: false, fill: true, error: false };
    pub const LINE: LegendMarker = LegendMarker { line: true, marker: false, fill: false, error: false };
    pub const POINTS: LegendMarker = LegendMarker { line: true, marker: true, fill: false, error: false };
}

impl FromStr for LegendMarker {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut m = LegendMarker::default();
        for c in s.chars() {
            match c.to_ascii_lowercase() {
                'l' => m.line = true,
                'p' => m.marker = true,
                'f' => m.fill = true,
                'e' => m.error = true,
                _ => {
                    return Err(RenderError::InvalidStyleValue {
                        key: "legend marker".into(),
                        value: s.into(),
                    });
                }
            }
        }
        Ok(m)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Name of the drawn series whose style the swatch copies.
    pub source: String,
    pub label: String,
    pub marker: LegendMarker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendHeader {
    pub text: String,
    /// Fraction of the pad height; `None` uses the entry text size.
    pub text_size: Option<f64>,
}

/// Multi-column legend box. Coordinates are pad fractions, y up.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Entry text size as a fraction of the pad height.
    pub text_size: f64,
    columns: usize,
    header: Option<LegendHeader>,
    entries: Vec<LegendEntry>,
}

/// Position of one entry inside the legend box, pad fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendCell {
    pub entry: usize,
    pub row: usize,
    pub column: usize,
    /// Left edge of the swatch.
    pub x: f64,
    /// Vertical centre of the row.
    pub y: f64,
    /// Left edge of the label text.
    pub text_x: f64,
}

/// Fraction of a column taken by the swatch.
const SWATCH_FRACTION: f64 = 0.25;

impl Legend {
    pub fn create(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        text_size: f64,
        columns: usize,
        header: Option<&str>,
    ) -> crate::Result<Self> {
        if !(x1 < x2 && y1 < y2) || [x1, y1, x2, y2].iter().any(|v| !v.is_finite()) {
            return Err(RenderError::InvalidRange(format!(
                "legend box ({x1}, {y1}, {x2}, {y2}) is not ordered"
            )));
        }
        if columns == 0 {
            return Err(RenderError::GeometryConflict("legend needs at least one column".into()));
        }
        if !(text_size > 0.0) {
            return Err(RenderError::InvalidStyleValue {
                key: "text_size".into(),
                value: text_size.to_string(),
            });
        }
        let header = header.map(|text| LegendHeader { text: text.to_string(), text_size: None });
        Ok(Self { x1, y1, x2, y2, text_size, columns, header, entries: Vec::new() })
    }

    pub fn set_header(&mut self, text: impl Into<String>, text_size: Option<f64>) {
        self.header = Some(LegendHeader { text: text.into(), text_size });
    }

    pub fn add_entry(&mut self, source: &str, label: impl Into<String>, marker: LegendMarker) {
        self.entries.push(LegendEntry { source: source.to_string(), label: label.into(), marker });
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn header(&self) -> Option<&LegendHeader> {
        self.header.as_ref()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Entry rows, not counting the header.
    pub fn rows(&self) -> usize {
        self.entries.len().div_ceil(self.columns)
    }

    fn header_rows(&self) -> usize {
        usize::from(self.header.is_some())
    }

    /// Rows that fit in the box at the configured text size.
    pub fn capacity_rows(&self) -> usize {
        ((self.y2 - self.y1) / self.text_size).floor() as usize
    }

    pub fn row_height(&self) -> f64 {
        (self.y2 - self.y1) / (self.rows() + self.header_rows()).max(1) as f64
    }

    /// Baseline position of the header row, if any.
    pub fn header_position(&self) -> Option<(f64, f64)> {
        self.header.as_ref().map(|_| (self.x1, self.y2 - 0.5 * self.row_height()))
    }

    /// Cell of every entry; entries fill columns top to bottom, left to right.
    pub fn cells(&self) -> Vec<LegendCell> {
        let rows = self.rows().max(1);
        let row_h = self.row_height();
        let col_w = (self.x2 - self.x1) / self.columns as f64;
        let skip = self.header_rows() as f64;
        (0..self.entries.len())
            .map(|entry| {
                let column = entry / rows;
                let row = entry % rows;
                let x = self.x1 + column as f64 * col_w;
                LegendCell {
                    entry,
                    row,
                    column,
                    x,
                    y: self.y2 - (skip + row as f64 + 0.5) * row_h,
                    text_x: x + SWATCH_FRACTION * col_w,
                }
            })
            .collect()
    }

    fn check_capacity(&self) {
        let needed = self.rows() + self.header_rows();
        if needed > self.capacity_rows() {
            log::warn!(
                "legend needs {needed} rows but only {} fit at text size {}; entries will overlap",
                self.capacity_rows(),
                self.text_size
            );
        }
    }
}

/// Visual style copied from a drawn item into its legend swatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swatch {
    pub line: Option<LineStyle>,
    pub marker: Option<MarkerStyle>,
    pub fill: Option<(Color, FillStyle)>,
}

/// Draw a legend inside `pad` (pixel rectangle of the owning pad).
///
/// `resolve` maps an entry's source name to the style it was drawn with;
/// entries whose source is unknown are drawn text-only.
pub fn draw_legend(
    surface: &mut Surface,
    pad: &PlotArea,
    legend: &Legend,
    resolve: impl Fn(&str) -> Option<Swatch>,
) {
    legend.check_capacity();

    let text_px = legend.text_size * pad.height;
    let row_px = legend.row_height() * pad.height;
    let col_px = (legend.x2 - legend.x1) / legend.columns as f64 * pad.width;
    let swatch_w = SWATCH_FRACTION * col_px * 0.8;
    let swatch_h = (row_px * 0.7).min(text_px);

    if let (Some(header), Some((hx, hy))) = (legend.header(), legend.header_position()) {
        let size = header.text_size.unwrap_or(legend.text_size) * pad.height;
        let (px, py) = pad.ndc_to_px(hx, hy);
        let style = TextStyle { size, baseline: TextBaseline::Central, ..Default::default() };
        surface.text(px, py, &markup::to_unicode(&header.text), &style);
    }

    let text_style = TextStyle { size: text_px, baseline: TextBaseline::Central, ..Default::default() };
    for cell in legend.cells() {
        let entry = &legend.entries()[cell.entry];
        let (sx, cy) = pad.ndc_to_px(cell.x, cell.y);
        let (tx, _) = pad.ndc_to_px(cell.text_x, cell.y);

        if let Some(swatch) = resolve(&entry.source) {
            let m = entry.marker;
            if m.fill
                && let Some((color, fill_style)) = swatch.fill
            {
                let (y, h) = (cy - swatch_h / 2.0, swatch_h);
                match fill_style {
                    FillStyle::Solid => surface.rect(sx, y, swatch_w, h, &Style::filled(color)),
                    FillStyle::Hatched => surface.hatch_rect(sx, y, swatch_w, h, color, 4.0),
                    FillStyle::Hollow => {}
                }
                if let Some(line) = &swatch.line {
                    surface.rect(sx, y, swatch_w, h, &Style::stroked(line.color, line.width));
                }
            }
            if m.line
                && !m.fill
                && let Some(line) = &swatch.line
            {
                surface.line(sx, cy, sx + swatch_w, cy, line);
            }
            if m.error
                && let Some(line) = &swatch.line
            {
                surface.line(sx + swatch_w / 2.0, cy - swatch_h / 2.0, sx + swatch_w / 2.0, cy + swatch_h / 2.0, line);
            }
            if m.marker
                && let Some(marker) = &swatch.marker
            {
                surface.marker(sx + swatch_w / 2.0, cy, marker);
            }
        }

        surface.text(tx, cy, &markup::to_unicode(&entry.label), &text_style);
    }
}
