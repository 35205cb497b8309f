use serde::Deserialize;

use crate::RenderError;

/// Pad margins as fractions of the pad size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn validate(&self) -> crate::Result<()> {
        let all = [self.left, self.right, self.top, self.bottom];
        if all.iter().any(|m| !m.is_finite() || *m < 0.0 || *m >= 1.0) {
            return Err(RenderError::GeometryConflict(format!(
                "margins must lie in [0, 1): {self:?}"
            )));
        }
        if self.left + self.right >= 1.0 || self.top + self.bottom >= 1.0 {
            return Err(RenderError::GeometryConflict(format!(
                "margins leave no room for the frame: {self:?}"
            )));
        }
        Ok(())
    }
}

/// Pad position in canvas-fraction coordinates, y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PadGeometry {
    pub const FULL: PadGeometry = PadGeometry { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 };

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> crate::Result<Self> {
        let inside = |v: f64| (0.0..=1.0).contains(&v);
        if !(inside(x1) && inside(x2) && inside(y1) && inside(y2)) || x1 >= x2 || y1 >= y2 {
            return Err(RenderError::GeometryConflict(format!(
                "pad ({x1}, {y1}, {x2}, {y2}) is not an ordered box inside the canvas"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Rectangular area within the canvas, in pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Pixel rectangle of a pad on a `canvas_w` x `canvas_h` canvas.
    pub fn of_pad(geom: &PadGeometry, canvas_w: f64, canvas_h: f64) -> Self {
        Self {
            left: geom.x1 * canvas_w,
            top: (1.0 - geom.y2) * canvas_h,
            width: geom.width() * canvas_w,
            height: geom.height() * canvas_h,
        }
    }

    /// Frame (axis box) inside this pad rectangle.
    pub fn inset(&self, m: &Margins) -> Self {
        Self {
            left: self.left + m.left * self.width,
            top: self.top + m.top * self.height,
            width: self.width * (1.0 - m.left - m.right),
            height: self.height * (1.0 - m.top - m.bottom),
        }
    }

    /// Map pad-normalised coordinates (y up) to pixels.
    pub fn ndc_to_px(&self, x: f64, y: f64) -> (f64, f64) {
        (self.left + x * self.width, self.top + (1.0 - y) * self.height)
    }
}
