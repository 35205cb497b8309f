//! Colour palettes for 2D heat maps and placement of their colour scale.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::canvas::Canvas;
use crate::color::{self, ColorRamp};
use crate::layout::geometry::Margins;
use crate::pad::{ItemHandle, Pad};
use crate::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteId {
    Viridis,
    Bird,
    CmsAlternative,
    Greyscale,
    RdBu,
}

impl PaletteId {
    pub const ALL: [PaletteId; 5] =
        [PaletteId::Viridis, PaletteId::Bird, PaletteId::CmsAlternative, PaletteId::Greyscale, PaletteId::RdBu];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteId::Viridis => "viridis",
            PaletteId::Bird => "bird",
            PaletteId::CmsAlternative => "cms-alternative",
            PaletteId::Greyscale => "greyscale",
            PaletteId::RdBu => "rdbu",
        }
    }

    pub fn ramp(&self) -> ColorRamp {
        ColorRamp::even(match self {
            PaletteId::Viridis => color::VIRIDIS,
            PaletteId::Bird => color::BIRD,
            PaletteId::CmsAlternative => color::CMS_ALTERNATIVE,
            PaletteId::Greyscale => color::GREYSCALE,
            PaletteId::RdBu => color::RDBU,
        })
    }
}

impl FromStr for PaletteId {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "viridis" => Ok(PaletteId::Viridis),
            "bird" => Ok(PaletteId::Bird),
            "cms-alternative" | "alternative" => Ok(PaletteId::CmsAlternative),
            "greyscale" | "grayscale" => Ok(PaletteId::Greyscale),
            "rdbu" => Ok(PaletteId::RdBu),
            _ => Err(RenderError::UnknownPalette(s.to_string())),
        }
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaletteId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Colour scale strip of a heat map, in pad fractions (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ColorScale {
    /// Placement before repositioning: a fixed strip near the right pad edge,
    /// independent of the margin reserved for it.
    pub(crate) fn unplaced(margins: &Margins) -> Self {
        Self { x1: 0.905, y1: margins.bottom, x2: 0.95, y2: 1.0 - margins.top }
    }

    /// Strip centred in the right margin, leaving room for its labels.
    pub(crate) fn in_margin(margins: &Margins) -> Self {
        Self {
            x1: 1.0 - 0.95 * margins.right,
            y1: margins.bottom,
            x2: 1.0 - 0.7 * margins.right,
            y2: 1.0 - margins.top,
        }
    }
}

/// Switch the palette of a drawn heat map. The series itself is untouched.
pub fn apply(pad: &mut Pad, handle: ItemHandle, palette: PaletteId) -> crate::Result<()> {
    let heatmap = pad.heatmap_mut(handle)?;
    log::debug!("heat map '{}': palette {} -> {}", heatmap.series.name(), heatmap.palette, palette);
    heatmap.palette = palette;
    Ok(())
}

/// Use the style's alternative 2D palette and opacity for a drawn heat map.
pub fn set_alternative_2d_color(canvas: &mut Canvas, handle: ItemHandle) -> crate::Result<()> {
    let cfg = canvas.style().palette_2d.clone();
    apply(canvas.pad_mut(), handle, cfg.alternative)?;
    canvas.pad_mut().heatmap_mut(handle)?.opacity = cfg.opacity.clamp(0.0, 1.0);
    Ok(())
}

/// Move the colour scale of a heat map into the margin reserved for it.
///
/// Canvas geometry is fixed at build time, so the result stays valid for the
/// lifetime of the canvas. Fails when the canvas was built without a z axis.
pub fn reposition_color_scale(canvas: &mut Canvas, handle: ItemHandle) -> crate::Result<()> {
    if !canvas.has_z_axis() {
        return Err(RenderError::GeometryConflict(format!(
            "canvas '{}' has no margin reserved for a colour scale; build it with a z axis",
            canvas.name()
        )));
    }
    let margins = *canvas.pad().margins();
    canvas.pad_mut().heatmap_mut(handle)?.scale = ColorScale::in_margin(&margins);
    Ok(())
}
