//! Single-pad canvas.

use hs_hist::Series;

use crate::annotation::AnnotationStack;
use crate::config::StyleConfig;
use crate::draw_options::DrawOptions;
use crate::header::{self, PositionCode};
use crate::layout::axes::{self, AxisSpec};
use crate::layout::geometry::PadGeometry;
use crate::layout::legend::Legend;
use crate::pad::{ItemHandle, Pad};
use crate::paint::paint_pad;
use crate::surface::Surface;
use crate::{Render, RenderError};

/// Everything needed to build a [`Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasParams {
    pub name: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_title: String,
    pub y_title: String,
    /// Square (600x600) or rectangular (800x600) preset.
    pub square: bool,
    /// Extra left margin, fraction of the canvas width, for long y labels.
    pub extra_space: f64,
    /// Header position code: 0, 11, 22 or 33.
    pub position: i32,
    /// Reserve a right margin for a colour scale.
    pub with_z_axis: bool,
    pub lumi_scale: f64,
}

impl CanvasParams {
    pub fn new(
        name: impl Into<String>,
        x_range: (f64, f64),
        y_range: (f64, f64),
        x_title: impl Into<String>,
        y_title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            x_range,
            y_range,
            x_title: x_title.into(),
            y_title: y_title.into(),
            square: true,
            extra_space: 0.0,
            position: 11,
            with_z_axis: false,
            lumi_scale: 1.0,
        }
    }

    pub fn square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    pub fn position(mut self, code: i32) -> Self {
        self.position = code;
        self
    }

    pub fn extra_space(mut self, extra: f64) -> Self {
        self.extra_space = extra;
        self
    }

    pub fn with_z_axis(mut self, with_z: bool) -> Self {
        self.with_z_axis = with_z;
        self
    }

    pub fn lumi_scale(mut self, scale: f64) -> Self {
        self.lumi_scale = scale;
        self
    }
}

/// A single-frame plot with header block.
///
/// Canvases are built, never mutated into a different geometry: margins and
/// size are fixed at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    name: String,
    width: f64,
    height: f64,
    style: StyleConfig,
    position: PositionCode,
    lumi_scale: f64,
    annotations: AnnotationStack,
    with_z_axis: bool,
    pad: Pad,
}

pub struct CanvasBuilder;

impl CanvasBuilder {
    /// Validate `params` and lay out a canvas using a snapshot of `style`
    /// and `annotations`.
    pub fn build(
        params: &CanvasParams,
        style: &StyleConfig,
        annotations: &AnnotationStack,
    ) -> crate::Result<Canvas> {
        let position = PositionCode::try_from(params.position)?;
        check_extras(params.extra_space, params.lumi_scale)?;
        let preset = style.preset(params.square);

        let x_axis = AxisSpec::new(params.x_range.0, params.x_range.1, params.x_title.clone())?
            .with_divisions(style.axes.x_divisions);
        let y_axis = AxisSpec::new(params.y_range.0, params.y_range.1, params.y_title.clone())?
            .with_divisions(style.axes.y_divisions)
            .with_title_offset(y_title_offset(preset.y_title_offset, params.extra_space));

        let mut margins = preset.margins;
        margins.left += params.extra_space;
        if params.with_z_axis {
            margins.right = preset.z_axis_right_margin;
        }
        margins.validate()?;

        let pad = Pad::new(
            params.name.clone(),
            PadGeometry::FULL,
            margins,
            axes::shared(x_axis),
            y_axis,
            style.colors.clone(),
            style.palette_2d.clone(),
        );
        log::debug!(
            "built canvas '{}' ({}x{}, position {}, z axis {})",
            params.name,
            preset.width,
            preset.height,
            params.position,
            params.with_z_axis
        );
        Ok(Canvas {
            name: params.name.clone(),
            width: preset.width,
            height: preset.height,
            style: style.clone(),
            position,
            lumi_scale: params.lumi_scale,
            annotations: annotations.clone(),
            with_z_axis: params.with_z_axis,
            pad,
        })
    }
}

pub(crate) fn check_extras(extra_space: f64, lumi_scale: f64) -> crate::Result<()> {
    if !(0.0..0.5).contains(&extra_space) {
        return Err(RenderError::InvalidRange(format!("extra space {extra_space} outside [0, 0.5)")));
    }
    if !(lumi_scale.is_finite() && lumi_scale > 0.0) {
        return Err(RenderError::InvalidRange(format!("lumi scale must be positive, got {lumi_scale}")));
    }
    Ok(())
}

/// Title offset grows with the extra left space so the title follows the frame edge.
pub(crate) fn y_title_offset(base: f64, extra_space: f64) -> f64 {
    base + 10.0 * extra_space
}

impl Canvas {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn position(&self) -> PositionCode {
        self.position
    }

    pub fn annotations(&self) -> &AnnotationStack {
        &self.annotations
    }

    pub fn has_z_axis(&self) -> bool {
        self.with_z_axis
    }

    pub fn pad(&self) -> &Pad {
        &self.pad
    }

    pub fn pad_mut(&mut self) -> &mut Pad {
        &mut self.pad
    }

    pub fn set_log_y(&mut self, log: bool) -> crate::Result<()> {
        self.pad.set_log_y(log)
    }

    pub fn set_log_x(&mut self, log: bool) -> crate::Result<()> {
        self.pad.set_log_x(log)
    }

    pub fn draw(&mut self, series: &Series, options: DrawOptions) -> crate::Result<ItemHandle> {
        self.pad.draw(series, options)
    }

    pub fn draw_2d(&mut self, series: &Series, z_title: &str) -> crate::Result<ItemHandle> {
        self.pad.draw_2d(series, z_title)
    }

    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: DrawOptions) -> ItemHandle {
        self.pad.draw_line(x1, y1, x2, y2, options)
    }

    pub fn add_legend(&mut self, legend: Legend) -> ItemHandle {
        self.pad.add_legend(legend)
    }

    pub fn header_layout(&self) -> header::CornerLayout {
        let area = self.pad.area_px(self.width, self.height);
        let frame = self.pad.frame_px(self.width, self.height);
        header::corner_layout(
            &self.style,
            &frame,
            frame.top - area.top,
            self.position,
            self.lumi_scale,
            &self.annotations,
        )
    }
}

impl Render for Canvas {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn paint(&self, surface: &mut Surface) {
        paint_pad(surface, &self.pad, self.width, self.height, &self.style);
        header::draw_corner(surface, &self.header_layout());
    }

    fn fix_overlay(&mut self) {
        self.pad.axes_on_top = true;
    }
}
