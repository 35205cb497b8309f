//! A pad: one frame with its axes and the items drawn into it.
//!
//! Items are recorded, not painted, when drawn. Painting happens once at
//! export time, so axis changes made after drawing (range, log scale,
//! overlay fix) apply to everything already in the pad.

use hs_hist::{HistError, Series};

use crate::config::{ColorsConfig, Palette2dConfig};
use crate::draw_options::{DrawMode, DrawOptions, FillStyle};
use crate::layout::axes::{AxisSpec, SharedAxis};
use crate::layout::geometry::{Margins, PadGeometry, PlotArea};
use crate::layout::legend::{Legend, Swatch};
use crate::palette::{ColorScale, PaletteId};
use crate::RenderError;

/// Index of an item within its pad, returned by the draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(pub(crate) usize);

impl ItemHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub series: Series,
    pub palette: PaletteId,
    pub opacity: f64,
    pub z_title: String,
    pub scale: ColorScale,
}

impl Heatmap {
    /// Colour range: smallest positive bin to the largest bin.
    pub fn z_range(&self) -> (f64, f64) {
        let (lo, hi) = self.series.value_range();
        let lo = self.series.min_positive().unwrap_or(lo);
        if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PadItem {
    Series {
        series: Series,
        options: DrawOptions,
        /// Per-bin lower edge when the series sits on top of others in a stack.
        baseline: Option<Vec<f64>>,
    },
    Heatmap(Heatmap),
    /// Straight line in data coordinates.
    Line { x1: f64, y1: f64, x2: f64, y2: f64, options: DrawOptions },
    Legend(Legend),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    name: String,
    geometry: PadGeometry,
    margins: Margins,
    x_axis: SharedAxis,
    y_axis: AxisSpec,
    items: Vec<PadItem>,
    colors: ColorsConfig,
    palette_2d: Palette2dConfig,
    pub(crate) show_x_labels: bool,
    pub(crate) show_x_title: bool,
    pub(crate) axes_on_top: bool,
}

impl Pad {
    pub(crate) fn new(
        name: impl Into<String>,
        geometry: PadGeometry,
        margins: Margins,
        x_axis: SharedAxis,
        y_axis: AxisSpec,
        colors: ColorsConfig,
        palette_2d: Palette2dConfig,
    ) -> Self {
        Self {
            name: name.into(),
            geometry,
            margins,
            x_axis,
            y_axis,
            items: Vec::new(),
            colors,
            palette_2d,
            show_x_labels: true,
            show_x_title: true,
            axes_on_top: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &PadGeometry {
        &self.geometry
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    /// Handle to the x axis; shared with the sibling pad on ratio canvases.
    pub fn x_axis(&self) -> SharedAxis {
        self.x_axis.clone()
    }

    pub(crate) fn set_x_axis(&mut self, axis: SharedAxis) {
        self.x_axis = axis;
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_axis.borrow().range()
    }

    pub fn y_axis(&self) -> &AxisSpec {
        &self.y_axis
    }

    pub fn y_axis_mut(&mut self) -> &mut AxisSpec {
        &mut self.y_axis
    }

    pub fn items(&self) -> &[PadItem] {
        &self.items
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&PadItem> {
        self.items.get(handle.0)
    }

    pub fn x_labels_visible(&self) -> bool {
        self.show_x_labels
    }

    pub fn x_title_visible(&self) -> bool {
        self.show_x_title
    }

    pub fn axes_on_top(&self) -> bool {
        self.axes_on_top
    }

    pub(crate) fn colors(&self) -> &ColorsConfig {
        &self.colors
    }

    pub fn set_log_y(&mut self, log: bool) -> crate::Result<()> {
        self.y_axis.set_log(log)
    }

    pub fn set_log_x(&mut self, log: bool) -> crate::Result<()> {
        self.x_axis.borrow_mut().set_log(log)
    }

    /// Record a 1D series. `DrawMode::Colz` records a 2D heat map instead.
    pub fn draw(&mut self, series: &Series, options: DrawOptions) -> crate::Result<ItemHandle> {
        if options.mode == DrawMode::Colz {
            return self.draw_2d(series, "");
        }
        expect_dim(series, 1)?;
        log::debug!("pad '{}': draw '{}' as {:?}", self.name, series.name(), options.mode);
        Ok(self.push(PadItem::Series { series: series.clone(), options, baseline: None }))
    }

    /// Record a 2D series as a heat map with the style's default palette.
    pub fn draw_2d(&mut self, series: &Series, z_title: &str) -> crate::Result<ItemHandle> {
        expect_dim(series, 2)?;
        log::debug!("pad '{}': draw '{}' as heat map", self.name, series.name());
        let heatmap = Heatmap {
            series: series.clone(),
            palette: self.palette_2d.default,
            opacity: 1.0,
            z_title: z_title.to_string(),
            scale: ColorScale::unplaced(&self.margins),
        };
        Ok(self.push(PadItem::Heatmap(heatmap)))
    }

    pub(crate) fn draw_stacked(
        &mut self,
        series: &Series,
        options: DrawOptions,
        baseline: Vec<f64>,
    ) -> ItemHandle {
        self.push(PadItem::Series { series: series.clone(), options, baseline: Some(baseline) })
    }

    /// Straight line in data coordinates, e.g. the unity line of a ratio pad.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: DrawOptions) -> ItemHandle {
        self.push(PadItem::Line { x1, y1, x2, y2, options })
    }

    pub fn add_legend(&mut self, legend: Legend) -> ItemHandle {
        self.push(PadItem::Legend(legend))
    }

    pub fn legend_mut(&mut self, handle: ItemHandle) -> crate::Result<&mut Legend> {
        match self.items.get_mut(handle.0) {
            Some(PadItem::Legend(l)) => Ok(l),
            _ => Err(RenderError::UnknownItem(handle.0)),
        }
    }

    pub fn heatmap(&self, handle: ItemHandle) -> crate::Result<&Heatmap> {
        match self.items.get(handle.0) {
            Some(PadItem::Heatmap(h)) => Ok(h),
            _ => Err(RenderError::UnknownItem(handle.0)),
        }
    }

    pub(crate) fn heatmap_mut(&mut self, handle: ItemHandle) -> crate::Result<&mut Heatmap> {
        match self.items.get_mut(handle.0) {
            Some(PadItem::Heatmap(h)) => Ok(h),
            _ => Err(RenderError::UnknownItem(handle.0)),
        }
    }

    fn push(&mut self, item: PadItem) -> ItemHandle {
        self.items.push(item);
        ItemHandle(self.items.len() - 1)
    }

    /// Pixel rectangle of the whole pad.
    pub fn area_px(&self, canvas_w: f64, canvas_h: f64) -> PlotArea {
        PlotArea::of_pad(&self.geometry, canvas_w, canvas_h)
    }

    /// Pixel rectangle of the frame (pad minus margins).
    pub fn frame_px(&self, canvas_w: f64, canvas_h: f64) -> PlotArea {
        self.area_px(canvas_w, canvas_h).inset(&self.margins)
    }

    /// Style of the most recent series drawn under `name`, for legend swatches.
    pub(crate) fn swatch_for(&self, name: &str, canvas_h: f64) -> Option<Swatch> {
        let data = self.colors.data;
        self.items.iter().rev().find_map(|item| match item {
            PadItem::Series { series, options, .. } if series.name() == name => {
                let fill = options
                    .fill_color
                    .filter(|_| options.fill_style != FillStyle::Hollow)
                    .map(|c| (c, options.fill_style));
                Some(Swatch {
                    line: Some(options.resolved_line(data, canvas_h)),
                    marker: Some(options.resolved_marker(data, canvas_h)),
                    fill,
                })
            }
            _ => None,
        })
    }
}

fn expect_dim(series: &Series, expected: u8) -> crate::Result<()> {
    let got = series.dimensionality();
    if got != expected {
        return Err(RenderError::Hist(HistError::DimensionMismatch { expected, got }));
    }
    Ok(())
}
