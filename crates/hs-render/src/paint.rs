//! Pad painting: frame, ticks, labels and the recorded items.

use hs_hist::Series;

use crate::color::Color;
use crate::config::StyleConfig;
use crate::draw_options::{DrawMode, DrawOptions, FillStyle};
use crate::layout::axes::AxisSpec;
use crate::layout::geometry::PlotArea;
use crate::layout::legend::draw_legend;
use crate::markup;
use crate::pad::{Heatmap, Pad, PadItem};
use crate::primitives::*;
use crate::surface::Surface;

/// Steps used to approximate the colour scale gradient.
const SCALE_STEPS: usize = 64;

pub(crate) fn paint_pad(surface: &mut Surface, pad: &Pad, canvas_w: f64, canvas_h: f64, style: &StyleConfig) {
    let area = pad.area_px(canvas_w, canvas_h);
    let frame = pad.frame_px(canvas_w, canvas_h);
    let x_axis = pad.x_axis();
    let x_axis = x_axis.borrow();
    let y_axis = pad.y_axis();
    let axes = AxesPaint {
        frame,
        x: &x_axis,
        y: y_axis,
        show_x_labels: pad.x_labels_visible(),
        show_x_title: pad.x_title_visible(),
        canvas_w,
        canvas_h,
        style,
    };

    if !pad.axes_on_top() {
        axes.draw(surface);
    }

    surface.push_clip(frame.left, frame.top, frame.width, frame.height);
    for item in pad.items() {
        match item {
            PadItem::Series { series, options, baseline } => {
                paint_series(surface, &frame, &x_axis, y_axis, series, options, baseline.as_deref(), style, canvas_h);
            }
            PadItem::Heatmap(h) => paint_heatmap(surface, &frame, &x_axis, y_axis, h),
            PadItem::Line { x1, y1, x2, y2, options } => {
                let line = options.resolved_line(style.colors.data, canvas_h);
                let (px1, py1) = to_px(&frame, &x_axis, y_axis, *x1, *y1);
                let (px2, py2) = to_px(&frame, &x_axis, y_axis, *x2, *y2);
                surface.line(px1, py1, px2, py2, &line);
            }
            PadItem::Legend(_) => {}
        }
    }
    surface.pop_clip();

    for item in pad.items() {
        match item {
            PadItem::Heatmap(h) => paint_color_scale(surface, &area, h, canvas_h, style),
            PadItem::Legend(legend) => {
                draw_legend(surface, &area, legend, |name| pad.swatch_for(name, canvas_h));
            }
            _ => {}
        }
    }

    if pad.axes_on_top() {
        axes.draw(surface);
    }
}

fn to_px(frame: &PlotArea, x: &AxisSpec, y: &AxisSpec, vx: f64, vy: f64) -> (f64, f64) {
    (
        x.data_to_pixel(x.clamp(vx), frame.left, frame.right()),
        y.data_to_pixel(y.clamp(vy), frame.bottom(), frame.top),
    )
}

struct AxesPaint<'a> {
    frame: PlotArea,
    x: &'a AxisSpec,
    y: &'a AxisSpec,
    show_x_labels: bool,
    show_x_title: bool,
    canvas_w: f64,
    canvas_h: f64,
    style: &'a StyleConfig,
}

impl AxesPaint<'_> {
    /// Frame box, inward ticks on all four sides, tick labels and titles.
    fn draw(&self, surface: &mut Surface) {
        let area = &self.frame;
        let color = self.style.colors.frame;
        let frame_style = LineStyle::solid(color, 1.0);
        let tick_style = LineStyle::solid(color, 0.8);
        let minor_style = LineStyle::solid(color, 0.6);

        let unit = self.canvas_w.min(self.canvas_h);
        let tl = self.style.axes.tick_length * unit;
        let mtl = self.style.axes.minor_tick_length * unit;
        let label_px = self.style.font.label_size * self.canvas_h;
        let title_px = self.style.font.title_size * self.canvas_h;

        // Frame rectangle
        surface.line(area.left, area.top, area.right(), area.top, &frame_style);
        surface.line(area.left, area.bottom(), area.right(), area.bottom(), &frame_style);
        surface.line(area.left, area.top, area.left, area.bottom(), &frame_style);
        surface.line(area.right(), area.top, area.right(), area.bottom(), &frame_style);

        // --- X axis ---
        let x_ticks = self.x.ticks();
        let x_label_style = TextStyle {
            size: label_px,
            color,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Hanging,
            ..Default::default()
        };
        for (i, &val) in x_ticks.major.iter().enumerate() {
            let px = self.x.data_to_pixel(val, area.left, area.right());
            surface.line(px, area.bottom(), px, area.bottom() - tl, &tick_style);
            surface.line(px, area.top, px, area.top + tl, &tick_style);
            if self.show_x_labels
                && let Some(label) = x_ticks.labels.get(i)
            {
                surface.text(px, area.bottom() + 0.4 * label_px, label, &x_label_style);
            }
        }
        for &val in &x_ticks.minor {
            let px = self.x.data_to_pixel(val, area.left, area.right());
            surface.line(px, area.bottom(), px, area.bottom() - mtl, &minor_style);
            surface.line(px, area.top, px, area.top + mtl, &minor_style);
        }

        // --- Y axis ---
        let y_ticks = self.y.ticks();
        let y_label_style = TextStyle {
            size: label_px,
            color,
            anchor: TextAnchor::End,
            baseline: TextBaseline::Central,
            ..Default::default()
        };
        for (i, &val) in y_ticks.major.iter().enumerate() {
            let py = self.y.data_to_pixel(val, area.bottom(), area.top);
            surface.line(area.left, py, area.left + tl, py, &tick_style);
            surface.line(area.right(), py, area.right() - tl, py, &tick_style);
            if let Some(label) = y_ticks.labels.get(i) {
                surface.text(area.left - 0.4 * label_px, py, label, &y_label_style);
            }
        }
        for &val in &y_ticks.minor {
            let py = self.y.data_to_pixel(val, area.bottom(), area.top);
            surface.line(area.left, py, area.left + mtl, py, &minor_style);
            surface.line(area.right(), py, area.right() - mtl, py, &minor_style);
        }

        // --- Titles, right/top aligned ---
        let title_style = TextStyle { size: title_px, color, anchor: TextAnchor::End, ..Default::default() };
        if self.show_x_title && !self.x.title.is_empty() {
            let style = TextStyle { baseline: TextBaseline::Hanging, ..title_style.clone() };
            let y = area.bottom() + 0.4 * label_px + 1.2 * label_px;
            surface.text(area.right(), y, &markup::to_unicode(&self.x.title), &style);
        }
        if !self.y.title.is_empty() {
            let style = TextStyle { baseline: TextBaseline::Central, ..title_style };
            let x = area.left - self.y.title_offset * 1.6 * title_px;
            surface.text_rotated(x, area.top, &markup::to_unicode(&self.y.title), &style, -90.0);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_series(
    surface: &mut Surface,
    frame: &PlotArea,
    x: &AxisSpec,
    y: &AxisSpec,
    series: &Series,
    options: &DrawOptions,
    baseline: Option<&[f64]>,
    style: &StyleConfig,
    canvas_h: f64,
) {
    let edges = series.edges_x();
    let values = series.values();
    let base = |i: usize| baseline.and_then(|b| b.get(i).copied()).unwrap_or(0.0);
    let px = |v: f64| x.data_to_pixel(x.clamp(v), frame.left, frame.right());
    let py = |v: f64| y.data_to_pixel(y.clamp(v), frame.bottom(), frame.top);
    let data = style.colors.data;

    match options.mode {
        DrawMode::Hist | DrawMode::Fill => {
            if let Some(fill) = options.fill_color {
                for (i, &v) in values.iter().enumerate() {
                    let (lo, hi) = (base(i), base(i) + v);
                    let (x0, x1) = (px(edges[i]), px(edges[i + 1]));
                    let (y_top, y_bot) = (py(lo.max(hi)), py(lo.min(hi)));
                    match options.fill_style {
                        FillStyle::Solid => surface.rect(x0, y_top, x1 - x0, y_bot - y_top, &Style::filled(fill)),
                        FillStyle::Hatched => surface.hatch_rect(x0, y_top, x1 - x0, y_bot - y_top, fill, 4.0),
                        FillStyle::Hollow => {}
                    }
                }
            }
            let outline = options.mode == DrawMode::Hist
                && (options.line_color.is_some()
                    || options.fill_color.is_none()
                    || options.fill_style == FillStyle::Hollow);
            if outline {
                let mut points = Vec::with_capacity(2 * values.len() + 2);
                points.push((px(edges[0]), py(base(0))));
                for (i, &v) in values.iter().enumerate() {
                    let top = py(base(i) + v);
                    points.push((px(edges[i]), top));
                    points.push((px(edges[i + 1]), top));
                }
                if let Some(&last) = edges.last() {
                    points.push((px(last), py(base(values.len().saturating_sub(1)))));
                }
                surface.polyline(&points, &options.resolved_line(data, canvas_h));
            }
        }
        DrawMode::Points => {
            let marker = options.resolved_marker(data, canvas_h);
            let err = options.resolved_line(marker.color, canvas_h);
            for (i, &v) in values.iter().enumerate() {
                if v == 0.0 {
                    continue;
                }
                let Some(center) = series.bin_center(i) else { continue };
                let e = series.error(i).unwrap_or(0.0);
                let cx = px(center);
                surface.error_bar(cx, py(v - e), py(v + e), 0.0, &err);
                surface.marker(cx, py(v), &marker);
            }
        }
        DrawMode::Line => {
            let points: Vec<(f64, f64)> = values
                .iter()
                .enumerate()
                .filter_map(|(i, &v)| series.bin_center(i).map(|c| (px(c), py(base(i) + v))))
                .collect();
            surface.polyline(&points, &options.resolved_line(data, canvas_h));
        }
        DrawMode::Colz => {}
    }
}

fn paint_heatmap(surface: &mut Surface, frame: &PlotArea, x: &AxisSpec, y: &AxisSpec, h: &Heatmap) {
    let Some(edges_y) = h.series.edges_y() else { return };
    let edges_x = h.series.edges_x();
    let (z_lo, z_hi) = h.z_range();
    let ramp = h.palette.ramp();
    for iy in 0..h.series.n_bins_y() {
        for ix in 0..h.series.n_bins_x() {
            let Some(v) = h.series.value_2d(ix, iy) else { continue };
            // Empty cells stay transparent.
            if v <= 0.0 {
                continue;
            }
            let t = (v - z_lo) / (z_hi - z_lo);
            let color = ramp.sample(t);
            let (x0, y0) = to_px(frame, x, y, edges_x[ix], edges_y[iy + 1]);
            let (x1, y1) = to_px(frame, x, y, edges_x[ix + 1], edges_y[iy]);
            let cell = Style { fill: Some(color), opacity: h.opacity, ..Default::default() };
            surface.rect(x0, y0, x1 - x0, y1 - y0, &cell);
        }
    }
}

fn paint_color_scale(surface: &mut Surface, pad: &PlotArea, h: &Heatmap, canvas_h: f64, style: &StyleConfig) {
    let (x0, y_top) = pad.ndc_to_px(h.scale.x1, h.scale.y2);
    let (x1, y_bot) = pad.ndc_to_px(h.scale.x2, h.scale.y1);
    let (w, height) = (x1 - x0, y_bot - y_top);
    let ramp = h.palette.ramp();
    let step = height / SCALE_STEPS as f64;
    for k in 0..SCALE_STEPS {
        let t = (k as f64 + 0.5) / SCALE_STEPS as f64;
        let c: Color = ramp.sample(t);
        let cell = Style { fill: Some(c), opacity: h.opacity, ..Default::default() };
        surface.rect(x0, y_bot - (k + 1) as f64 * step, w, step + 0.5, &cell);
    }
    surface.rect(x0, y_top, w, height, &Style::stroked(style.colors.frame, 0.8));

    let (z_lo, z_hi) = h.z_range();
    let label_px = style.font.label_size * canvas_h;
    let label_style = TextStyle {
        size: label_px,
        color: style.colors.frame,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    if let Ok(z_axis) = AxisSpec::new(z_lo, z_hi, "") {
        let ticks = z_axis.ticks();
        for (val, label) in ticks.major.iter().zip(&ticks.labels) {
            let py = z_axis.data_to_pixel(*val, y_bot, y_top);
            surface.line(x1 - 0.3 * w, py, x1, py, &LineStyle::solid(style.colors.frame, 0.6));
            surface.text(x1 + 0.2 * label_px, py, label, &label_style);
        }
    }
    if !h.z_title.is_empty() {
        let title_px = style.font.title_size * canvas_h;
        let title = TextStyle {
            size: title_px,
            color: style.colors.frame,
            anchor: TextAnchor::End,
            baseline: TextBaseline::Central,
            ..Default::default()
        };
        surface.text_rotated(pad.right() - 0.6 * title_px, y_top, &markup::to_unicode(&h.z_title), &title, -90.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorsConfig, Palette2dConfig};
    use crate::layout::axes::shared;
    use crate::layout::geometry::{Margins, PadGeometry};

    fn painted_polylines(options: DrawOptions) -> usize {
        let mut pad = Pad::new(
            "p",
            PadGeometry::FULL,
            Margins { left: 0.1, right: 0.05, top: 0.07, bottom: 0.12 },
            shared(AxisSpec::new(0.0, 3.0, "x").unwrap()),
            AxisSpec::new(0.0, 10.0, "y").unwrap(),
            ColorsConfig::default(),
            Palette2dConfig::default(),
        );
        let h = Series::from_values("h", vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 4.0, 2.0]).unwrap();
        pad.draw(&h, options).unwrap();
        let mut surface = Surface::new(600.0, 600.0);
        paint_pad(&mut surface, &pad, 600.0, 600.0, &StyleConfig::default());
        surface.finish_svg().matches("<polyline").count()
    }

    #[test]
    fn hollow_fill_keeps_outline() {
        let hollow = DrawOptions::from_pairs(&[("fcolor", "red"), ("fstyle", "0")]).unwrap();
        assert_eq!(painted_polylines(hollow), 1);
    }

    #[test]
    fn solid_fill_without_line_colour_has_no_outline() {
        let solid = DrawOptions::from_pairs(&[("fcolor", "red"), ("fstyle", "solid")]).unwrap();
        assert_eq!(painted_polylines(solid), 0);
        assert_eq!(painted_polylines(DrawOptions::hist()), 1);
    }
}
