//! Two-pad canvas: a main pad above a ratio pad sharing one x axis.

use std::rc::Rc;

use crate::annotation::AnnotationStack;
use crate::canvas::{check_extras, y_title_offset};
use crate::config::StyleConfig;
use crate::header::{self, PositionCode};
use crate::layout::axes::{self, AxisSpec, SharedAxis};
use crate::layout::geometry::Margins;
use crate::layout::multi_panel::MainRatioLayout;
use crate::pad::Pad;
use crate::paint::paint_pad;
use crate::surface::Surface;
use crate::{Render, RenderError};

/// A ratio canvas is this much taller than the single-pad preset.
const HEIGHT_SCALE: f64 = 1.3;

#[derive(Debug, Clone, PartialEq)]
pub struct DiCanvasParams {
    pub name: String,
    pub x_range: (f64, f64),
    pub y_range_main: (f64, f64),
    pub y_range_ratio: (f64, f64),
    pub x_title: String,
    pub y_title_main: String,
    pub y_title_ratio: String,
    pub square: bool,
    pub extra_space: f64,
    pub position: i32,
    pub lumi_scale: f64,
    /// Share of the canvas height given to the ratio pad.
    pub ratio_height_frac: f64,
    /// Gap between the pads, fraction of the canvas height.
    pub seam: f64,
}

impl DiCanvasParams {
    pub fn new(
        name: impl Into<String>,
        x_range: (f64, f64),
        y_range_main: (f64, f64),
        y_range_ratio: (f64, f64),
        titles: (&str, &str, &str),
    ) -> Self {
        Self {
            name: name.into(),
            x_range,
            y_range_main,
            y_range_ratio,
            x_title: titles.0.to_string(),
            y_title_main: titles.1.to_string(),
            y_title_ratio: titles.2.to_string(),
            square: true,
            extra_space: 0.0,
            position: 11,
            lumi_scale: 1.0,
            ratio_height_frac: 0.3,
            seam: 0.01,
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

    pub fn ratio_height_frac(mut self, frac: f64) -> Self {
        self.ratio_height_frac = frac;
        self
    }

    pub fn seam(mut self, seam: f64) -> Self {
        self.seam = seam;
        self
    }
}

/// Pad selector for [`DiCanvas::cd`]: 1 is the main pad, 2 the ratio pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadIndex {
    Main,
    Ratio,
}

impl TryFrom<usize> for PadIndex {
    type Error = RenderError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(PadIndex::Main),
            2 => Ok(PadIndex::Ratio),
            _ => Err(RenderError::GeometryConflict(format!(
                "ratio canvas has pads 1 (main) and 2 (ratio), not {index}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiCanvas {
    name: String,
    width: f64,
    height: f64,
    style: StyleConfig,
    position: PositionCode,
    lumi_scale: f64,
    annotations: AnnotationStack,
    main: Pad,
    ratio: Pad,
    cursor: PadIndex,
}

pub struct DiCanvasLayout;

impl DiCanvasLayout {
    pub fn build(
        params: &DiCanvasParams,
        style: &StyleConfig,
        annotations: &AnnotationStack,
    ) -> crate::Result<DiCanvas> {
        let position = PositionCode::try_from(params.position)?;
        check_extras(params.extra_space, params.lumi_scale)?;
        let split = MainRatioLayout::new(params.ratio_height_frac, params.seam)?;
        let preset = style.preset(params.square);
        let width = preset.width;
        let height = preset.height * HEIGHT_SCALE;

        // Keep the preset's absolute top and bottom margins on the taller canvas.
        let canvas_margins = Margins {
            left: preset.margins.left + params.extra_space,
            right: preset.margins.right,
            top: preset.margins.top * preset.height / height,
            bottom: preset.margins.bottom * preset.height / height,
        };
        let (main_margins, ratio_margins) = split.margins(&canvas_margins)?;

        let title_offset = y_title_offset(preset.y_title_offset, params.extra_space);
        let x_main = AxisSpec::new(params.x_range.0, params.x_range.1, params.x_title.clone())?
            .with_divisions(style.axes.x_divisions);
        let x_ratio = x_main.clone();
        let y_main = AxisSpec::new(params.y_range_main.0, params.y_range_main.1, params.y_title_main.clone())?
            .with_divisions(style.axes.y_divisions)
            .with_title_offset(title_offset);
        let y_ratio =
            AxisSpec::new(params.y_range_ratio.0, params.y_range_ratio.1, params.y_title_ratio.clone())?
                .with_divisions(style.axes.ratio_y_divisions)
                .with_title_offset(title_offset);

        let mut main = Pad::new(
            format!("{}_main", params.name),
            split.main,
            main_margins,
            axes::shared(x_main),
            y_main,
            style.colors.clone(),
            style.palette_2d.clone(),
        );
        let mut ratio = Pad::new(
            format!("{}_ratio", params.name),
            split.ratio,
            ratio_margins,
            axes::shared(x_ratio),
            y_ratio,
            style.colors.clone(),
            style.palette_2d.clone(),
        );
        DiCanvas::link(&mut main, &mut ratio)?;

        log::debug!(
            "built ratio canvas '{}' ({}x{}, ratio {:.2}, seam {:.3})",
            params.name,
            width,
            height,
            params.ratio_height_frac,
            params.seam
        );
        Ok(DiCanvas {
            name: params.name.clone(),
            width,
            height,
            style: style.clone(),
            position,
            lumi_scale: params.lumi_scale,
            annotations: annotations.clone(),
            main,
            ratio,
            cursor: PadIndex::Main,
        })
    }
}

impl DiCanvas {
    /// Make both pads use `main`'s x axis.
    ///
    /// Fails without touching either pad when their x ranges or scales differ.
    pub fn link(main: &mut Pad, ratio: &mut Pad) -> crate::Result<()> {
        let shared = main.x_axis();
        if Rc::ptr_eq(&shared, &ratio.x_axis()) {
            return Ok(());
        }
        {
            let a = shared.borrow();
            let other = ratio.x_axis();
            let b = other.borrow();
            let tol = 1e-9 * (a.max() - a.min()).abs().max(1.0);
            let same_range = (a.min() - b.min()).abs() <= tol && (a.max() - b.max()).abs() <= tol;
            if !same_range || a.is_log() != b.is_log() {
                return Err(RenderError::GeometryConflict(format!(
                    "pads '{}' and '{}' disagree on the x axis: {:?} vs {:?}",
                    main.name(),
                    ratio.name(),
                    a.range(),
                    b.range()
                )));
            }
        }
        ratio.set_x_axis(shared);
        Ok(())
    }

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

    /// Select the active pad: 1 main, 2 ratio.
    pub fn cd(&mut self, index: usize) -> crate::Result<&mut Pad> {
        self.cursor = PadIndex::try_from(index)?;
        Ok(self.current_mut())
    }

    pub fn current(&self) -> PadIndex {
        self.cursor
    }

    pub fn current_pad(&self) -> &Pad {
        self.pad(self.cursor)
    }

    pub fn current_mut(&mut self) -> &mut Pad {
        self.pad_mut(self.cursor)
    }

    pub fn pad(&self, index: PadIndex) -> &Pad {
        match index {
            PadIndex::Main => &self.main,
            PadIndex::Ratio => &self.ratio,
        }
    }

    pub fn pad_mut(&mut self, index: PadIndex) -> &mut Pad {
        match index {
            PadIndex::Main => &mut self.main,
            PadIndex::Ratio => &mut self.ratio,
        }
    }

    pub fn main(&self) -> &Pad {
        &self.main
    }

    pub fn ratio(&self) -> &Pad {
        &self.ratio
    }

    pub fn shared_x_axis(&self) -> SharedAxis {
        self.main.x_axis()
    }

    pub fn header_layout(&self) -> header::CornerLayout {
        let area = self.main.area_px(self.width, self.height);
        let frame = self.main.frame_px(self.width, self.height);
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

impl Render for DiCanvas {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn paint(&self, surface: &mut Surface) {
        paint_pad(surface, &self.main, self.width, self.height, &self.style);
        paint_pad(surface, &self.ratio, self.width, self.height, &self.style);
        header::draw_corner(surface, &self.header_layout());
    }

    /// Only the lowest pad keeps x tick labels and title; axes go on top everywhere.
    fn fix_overlay(&mut self) {
        let lowest = if self.ratio.geometry().y1 <= self.main.geometry().y1 {
            PadIndex::Ratio
        } else {
            PadIndex::Main
        };
        for index in [PadIndex::Main, PadIndex::Ratio] {
            let keep = index == lowest;
            let pad = self.pad_mut(index);
            pad.show_x_labels = keep;
            pad.show_x_title = keep;
            pad.axes_on_top = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params() -> DiCanvasParams {
        DiCanvasParams::new("r", (10.0, 90.0), (0.0, 0.2), (0.0, 2.0), ("X", "A.U.", "Data/Pred."))
            .extra_space(0.1)
    }

    fn build() -> DiCanvas {
        DiCanvasLayout::build(&params(), &StyleConfig::default(), &AnnotationStack::new()).unwrap()
    }

    #[test]
    fn pads_share_frame_edges() {
        let d = build();
        let m = d.main().frame_px(d.width(), d.height());
        let r = d.ratio().frame_px(d.width(), d.height());
        assert_abs_diff_eq!(m.left, r.left, epsilon = 1e-9);
        assert_abs_diff_eq!(m.right(), r.right(), epsilon = 1e-9);
        let g = (d.main().geometry(), d.ratio().geometry());
        assert_abs_diff_eq!(g.0.height() + g.1.height() + 0.01, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.main().margins().bottom, 0.0);
        assert_abs_diff_eq!(d.ratio().margins().top, 0.0);
    }

    #[test]
    fn cd_moves_cursor() {
        let mut d = build();
        assert_eq!(d.current(), PadIndex::Main);
        assert!(d.cd(2).unwrap().name().ends_with("_ratio"));
        assert_eq!(d.current(), PadIndex::Ratio);
        assert!(matches!(d.cd(3), Err(RenderError::GeometryConflict(_))));
        assert_eq!(d.current(), PadIndex::Ratio);
    }

    #[test]
    fn x_axis_is_shared() {
        let mut d = build();
        d.cd(1).unwrap().x_axis().borrow_mut().set_range(20.0, 80.0).unwrap();
        assert_eq!(d.ratio().x_range(), (20.0, 80.0));
        assert!(Rc::ptr_eq(&d.main().x_axis(), &d.ratio().x_axis()));
    }

    #[test]
    fn overlay_fix_hides_upper_labels_once() {
        let mut d = build();
        assert!(d.main().x_labels_visible());
        d.fix_overlay();
        let once = d.clone();
        d.fix_overlay();
        assert_eq!(once, d);
        assert!(!d.main().x_labels_visible());
        assert!(!d.main().x_title_visible());
        assert!(d.ratio().x_labels_visible());
        assert!(d.main().axes_on_top() && d.ratio().axes_on_top());
    }

    #[test]
    fn bad_ratio_fraction() {
        let p = params().ratio_height_frac(1.2);
        assert!(matches!(
            DiCanvasLayout::build(&p, &StyleConfig::default(), &AnnotationStack::new()),
            Err(RenderError::GeometryConflict(_))
        ));
    }
}
