//! # hs-render
//!
//! House-style layout engine for publication comparison plots: single and
//! ratio canvases, deterministic stacks, legends, corner annotations and
//! palette handling for 2D heat maps.
//!
//! ```
//! use hs_render::{AnnotationStack, CanvasBuilder, CanvasParams, StyleConfig};
//!
//! let style = StyleConfig::default();
//! let params = CanvasParams::new("example", (0.0, 90.0), (1e-3, 2.0), "X", "A.U.");
//! let mut canv = CanvasBuilder::build(&params, &style, &AnnotationStack::default()).unwrap();
//! canv.set_log_y(true).unwrap();
//! ```

pub mod annotation;
pub mod canvas;
pub mod color;
pub mod config;
pub mod dicanvas;
pub mod draw_options;
pub mod header;
pub mod layout;
pub mod markup;
pub mod output;
pub mod pad;
mod paint;
pub mod palette;
pub mod primitives;
pub mod stack;
pub mod surface;
pub mod text;

pub use annotation::AnnotationStack;
pub use canvas::{Canvas, CanvasBuilder, CanvasParams};
pub use config::{StyleConfig, resolve_config};
pub use dicanvas::{DiCanvas, DiCanvasLayout, DiCanvasParams, PadIndex};
pub use draw_options::{DrawMode, DrawOptions, FillStyle, LineDash};
pub use header::{HAlign, PositionCode};
pub use layout::axes::{AxisSpec, SharedAxis};
pub use layout::geometry::{Margins, PadGeometry};
pub use layout::legend::{Legend, LegendEntry, LegendMarker};
pub use pad::{ItemHandle, Pad, PadItem};
pub use palette::PaletteId;
pub use stack::{Stack, StackEntry, draw_stack};
pub use surface::Surface;

use std::path::PathBuf;

use hs_hist::HistError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("unknown position code: {0} (expected 0, 11, 22 or 33)")]
    UnknownPositionCode(i32),
    #[error("unknown palette: {0}")]
    UnknownPalette(String),
    #[error("geometry conflict: {0}")]
    GeometryConflict(String),
    #[error("no drawn item #{0} of the requested kind")]
    UnknownItem(usize),
    #[error("unrecognised style option '{0}'")]
    UnknownStyleKey(String),
    #[error("invalid value '{value}' for style option '{key}'")]
    InvalidStyleValue { key: String, value: String },
    #[error("config error: {0}")]
    Config(String),
    #[error("series error: {0}")]
    Hist(#[from] HistError),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to write {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Anything that can be painted onto a [`Surface`] and exported.
pub trait Render {
    fn name(&self) -> &str;

    /// Canvas size in pixels.
    fn size(&self) -> (f64, f64);

    fn paint(&self, surface: &mut Surface);

    /// Post-draw pass: axes on top of content, no duplicate labels at pad seams.
    fn fix_overlay(&mut self);

    fn to_svg(&self) -> String {
        let (w, h) = self.size();
        let mut surface = Surface::new(w, h);
        self.paint(&mut surface);
        surface.finish_svg()
    }
}
