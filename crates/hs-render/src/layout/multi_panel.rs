use crate::RenderError;
use crate::layout::geometry::{Margins, PadGeometry};

/// Main + ratio pad split of a canvas.
///
/// The seam is carved out of the two pads rather than added on top, so
/// `main.height() + ratio.height() + seam == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainRatioLayout {
    pub main: PadGeometry,
    pub ratio: PadGeometry,
    pub seam: f64,
}

impl MainRatioLayout {
    pub fn new(ratio_frac: f64, seam: f64) -> crate::Result<Self> {
        if !(ratio_frac > 0.0 && ratio_frac < 1.0) {
            return Err(RenderError::GeometryConflict(format!(
                "ratio height fraction must be in (0, 1), got {ratio_frac}"
            )));
        }
        if !(0.0..0.2).contains(&seam) {
            return Err(RenderError::GeometryConflict(format!(
                "seam must be in [0, 0.2), got {seam}"
            )));
        }
        let half = seam / 2.0;
        if ratio_frac - half <= 0.0 || ratio_frac + half >= 1.0 {
            return Err(RenderError::GeometryConflict(format!(
                "seam {seam} does not fit around a ratio pad of {ratio_frac}"
            )));
        }
        Ok(Self {
            main: PadGeometry::new(0.0, ratio_frac + half, 1.0, 1.0)?,
            ratio: PadGeometry::new(0.0, 0.0, 1.0, ratio_frac - half)?,
            seam,
        })
    }

    /// Per-pad margins from canvas-level ones.
    ///
    /// Left/right are copied verbatim so the frames of both pads line up; the
    /// top margin goes to the main pad and the bottom margin to the ratio pad,
    /// rescaled so they keep their absolute size.
    pub fn margins(&self, canvas: &Margins) -> crate::Result<(Margins, Margins)> {
        let main = Margins {
            left: canvas.left,
            right: canvas.right,
            top: canvas.top / self.main.height(),
            bottom: 0.0,
        };
        let ratio = Margins {
            left: canvas.left,
            right: canvas.right,
            top: 0.0,
            bottom: canvas.bottom / self.ratio.height(),
        };
        main.validate()?;
        ratio.validate().map_err(|_| {
            RenderError::GeometryConflict(format!(
                "ratio pad of height {:.3} cannot hold a bottom margin of {:.3}",
                self.ratio.height(),
                canvas.bottom
            ))
        })?;
        Ok((main, ratio))
    }
}
