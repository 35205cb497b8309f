//! # hs-hist
//!
//! Binned series consumed by the hepstyle plotting engine.
//!
//! The engine only reads bin edges, per-bin values and the integral; how a
//! series was produced (random fill, file load, analysis output) is up to the
//! caller. Arithmetic follows the usual histogram conventions (`add` sums
//! bin-by-bin, `divide` yields zero where the denominator is zero).
//!
//! ## Example
//!
//! ```
//! use hs_hist::Series;
//!
//! let mut bkg = Series::uniform_1d("bkg", 3, 0.0, 3.0).unwrap();
//! bkg.fill(0.5);
//! bkg.fill(1.5);
//! bkg.scale(1.0 / bkg.integral());
//! assert!((bkg.integral() - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod series;

pub use error::{HistError, Result};
pub use series::Series;
