//! Experiment label, luminosity text and annotation lines around the frame.

use crate::RenderError;
use crate::annotation::AnnotationStack;
use crate::config::StyleConfig;
use crate::layout::geometry::PlotArea;
use crate::markup;
use crate::primitives::*;
use crate::surface::Surface;
use crate::text::measure_styled;

/// Horizontal placement used by the in-frame position codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

impl HAlign {
    fn from_digit(d: i32) -> Option<Self> {
        match d {
            1 => Some(HAlign::Left),
            2 => Some(HAlign::Center),
            3 => Some(HAlign::Right),
            _ => None,
        }
    }

    fn digit(self) -> i32 {
        match self {
            HAlign::Left => 1,
            HAlign::Center => 2,
            HAlign::Right => 3,
        }
    }

    fn anchor(self) -> TextAnchor {
        match self {
            HAlign::Left => TextAnchor::Start,
            HAlign::Center => TextAnchor::Middle,
            HAlign::Right => TextAnchor::End,
        }
    }
}

/// Where the experiment label goes.
///
/// Integer codes: `0` is out of frame. Two-digit codes `XY` with both digits
/// in `1..=3` place the block inside the frame below its top edge; the tens
/// digit picks the text alignment and the units digit the column
/// (1 left, 2 centre, 3 right). `11`, `22` and `33` are the usual corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionCode {
    /// Above the frame, left-aligned, with the extra text on the same line.
    OutOfFrame,
    Inside { align: HAlign, column: HAlign },
}

impl PositionCode {
    pub const TOP_LEFT: Self = PositionCode::Inside { align: HAlign::Left, column: HAlign::Left };
    pub const TOP_CENTER: Self = PositionCode::Inside { align: HAlign::Center, column: HAlign::Center };
    pub const TOP_RIGHT: Self = PositionCode::Inside { align: HAlign::Right, column: HAlign::Right };

    /// Anchor x and text anchor of in-frame text; out of frame uses the left column.
    fn anchor_point(self, frame: &PlotArea, rel_pos_x: f64) -> (f64, TextAnchor) {
        let (align, column) = match self {
            PositionCode::OutOfFrame => (HAlign::Left, HAlign::Left),
            PositionCode::Inside { align, column } => (align, column),
        };
        let x = match column {
            HAlign::Left => frame.left + rel_pos_x * frame.width,
            HAlign::Center => frame.left + frame.width / 2.0,
            HAlign::Right => frame.right() - rel_pos_x * frame.width,
        };
        (x, align.anchor())
    }
}

impl TryFrom<i32> for PositionCode {
    type Error = RenderError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        if code == 0 {
            return Ok(PositionCode::OutOfFrame);
        }
        let digits = (10..=39)
            .contains(&code)
            .then(|| HAlign::from_digit(code / 10).zip(HAlign::from_digit(code % 10)))
            .flatten();
        match digits {
            Some((align, column)) => Ok(PositionCode::Inside { align, column }),
            None => Err(RenderError::UnknownPositionCode(code)),
        }
    }
}

impl From<PositionCode> for i32 {
    fn from(p: PositionCode) -> i32 {
        match p {
            PositionCode::OutOfFrame => 0,
            PositionCode::Inside { align, column } => 10 * align.digit() + column.digit(),
        }
    }
}

/// A positioned piece of header text, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub style: TextStyle,
}

impl HeaderText {
    fn new(text: &str, x: f64, y: f64, style: TextStyle) -> Self {
        Self { text: markup::to_unicode(text), x, y, style }
    }

    pub fn width(&self) -> f64 {
        measure_styled(&self.text, &self.style).width
    }

    /// Vertical extent `(top, bottom)` in pixels.
    pub fn extent(&self) -> (f64, f64) {
        let m = measure_styled(&self.text, &self.style);
        match self.style.baseline {
            TextBaseline::Hanging => (self.y, self.y + m.height),
            TextBaseline::Central => (self.y - m.height / 2.0, self.y + m.height / 2.0),
            TextBaseline::Alphabetic => (self.y - m.ascent, self.y + (m.height - m.ascent)),
        }
    }

    /// Horizontal extent `(left, right)` in pixels.
    pub fn span(&self) -> (f64, f64) {
        let w = self.width();
        match self.style.anchor {
            TextAnchor::Start => (self.x, self.x + w),
            TextAnchor::Middle => (self.x - w / 2.0, self.x + w / 2.0),
            TextAnchor::End => (self.x - w, self.x),
        }
    }
}

/// Resolved positions of every header element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CornerLayout {
    pub lumi: Option<HeaderText>,
    pub experiment: Option<HeaderText>,
    pub extra: Option<HeaderText>,
    pub info: Vec<HeaderText>,
}

impl CornerLayout {
    pub fn texts(&self) -> impl Iterator<Item = &HeaderText> {
        self.lumi.iter().chain(self.experiment.iter()).chain(self.extra.iter()).chain(self.info.iter())
    }
}

/// Compute the header layout for a frame.
///
/// `top_margin_px` is the distance from the pad top to the frame; all header
/// text sizes scale with it.
pub fn corner_layout(
    style: &StyleConfig,
    frame: &PlotArea,
    top_margin_px: f64,
    position: PositionCode,
    lumi_scale: f64,
    annotations: &AnnotationStack,
) -> CornerLayout {
    let hc = &style.header;
    let exp = &style.experiment;
    let t = top_margin_px;
    let color = style.colors.frame;

    let above_frame = frame.top - hc.lumi_text_offset * t;
    let lumi_text = exp.lumi_text();
    let lumi = (!lumi_text.is_empty()).then(|| {
        let s = TextStyle {
            size: hc.lumi_text_size * t * lumi_scale,
            color,
            anchor: TextAnchor::End,
            baseline: TextBaseline::Alphabetic,
            ..Default::default()
        };
        HeaderText::new(&lumi_text, frame.right(), above_frame, s)
    });

    let cms_size = hc.cms_text_size * t;
    let extra_size = hc.extra_over_cms_text_size * cms_size;
    let info_size = extra_size;
    let experiment_style = TextStyle { size: cms_size, color, weight: FontWeight::Bold, ..Default::default() };
    let extra_style = TextStyle { size: extra_size, color, style: FontStyle::Italic, ..Default::default() };
    let info_style = TextStyle { size: info_size, color, ..Default::default() };

    let mut layout = CornerLayout { lumi, ..Default::default() };

    // Bottom of the block the annotation lines continue from.
    let block_bottom = match position {
        PositionCode::OutOfFrame => {
            let s = TextStyle { baseline: TextBaseline::Alphabetic, ..experiment_style };
            let experiment = (!exp.cms_text.is_empty())
                .then(|| HeaderText::new(&exp.cms_text, frame.left, above_frame, s));
            let extra_x = experiment.as_ref().map_or(frame.left, |e| e.span().1 + 0.25 * cms_size);
            let s = TextStyle { baseline: TextBaseline::Alphabetic, ..extra_style };
            layout.extra = (!exp.extra_text.is_empty())
                .then(|| HeaderText::new(&exp.extra_text, extra_x, above_frame, s));
            layout.experiment = experiment;
            frame.top + hc.rel_pos_y * frame.height - (hc.info_line_spacing - 1.0) * info_size
        }
        PositionCode::Inside { .. } => {
            let (x, anchor) = position.anchor_point(frame, hc.rel_pos_x);
            let top = frame.top + hc.rel_pos_y * frame.height;
            let s = TextStyle { anchor, baseline: TextBaseline::Hanging, ..experiment_style };
            layout.experiment =
                (!exp.cms_text.is_empty()).then(|| HeaderText::new(&exp.cms_text, x, top, s));
            let extra_top =
                if layout.experiment.is_some() { top + hc.rel_extra_dy * cms_size } else { top };
            let s = TextStyle { anchor, baseline: TextBaseline::Hanging, ..extra_style };
            layout.extra = (!exp.extra_text.is_empty())
                .then(|| HeaderText::new(&exp.extra_text, x, extra_top, s));
            layout
                .extra
                .as_ref()
                .or(layout.experiment.as_ref())
                .map_or(top, |h| h.extent().1)
        }
    };

    let (info_x, info_anchor) = position.anchor_point(frame, hc.rel_pos_x);
    let s = TextStyle { anchor: info_anchor, baseline: TextBaseline::Hanging, ..info_style };
    layout.info = annotations
        .lines()
        .iter()
        .zip(annotations.offsets(info_size, hc.info_line_spacing))
        .map(|(line, dy)| HeaderText::new(line, info_x, block_bottom + dy, s.clone()))
        .collect();
    layout
}

pub fn draw_corner(surface: &mut Surface, layout: &CornerLayout) {
    for t in layout.texts() {
        surface.text(t.x, t.y, &t.text, &t.style);
    }
}
