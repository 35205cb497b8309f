//! Binned 1D/2D series with fill, scale and bin-by-bin arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{HistError, Result};

/// A binned dataset with known edges and per-bin values.
///
/// 2D values are stored row-major: `index = iy * nx + ix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRepr", into = "SeriesRepr")]
pub struct Series {
    name: String,
    title: String,
    edges_x: Vec<f64>,
    edges_y: Option<Vec<f64>>,
    values: Vec<f64>,
    sumw2: Vec<f64>,
    entries: u64,
}

/// Wire representation; validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SeriesRepr {
    name: String,
    #[serde(default)]
    title: String,
    edges_x: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edges_y: Option<Vec<f64>>,
    values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sumw2: Option<Vec<f64>>,
    #[serde(default)]
    entries: u64,
}

impl TryFrom<SeriesRepr> for Series {
    type Error = HistError;

    fn try_from(r: SeriesRepr) -> Result<Self> {
        let mut s = match r.edges_y {
            Some(ey) => Series::new_2d(r.name, r.edges_x, ey)?,
            None => Series::new_1d(r.name, r.edges_x)?,
        };
        if r.values.len() != s.values.len() {
            return Err(HistError::ValueCount { expected: s.values.len(), got: r.values.len() });
        }
        let sumw2 = match r.sumw2 {
            Some(w2) if w2.len() == r.values.len() => w2,
            Some(w2) => {
                return Err(HistError::ValueCount { expected: r.values.len(), got: w2.len() });
            }
            None => r.values.iter().map(|v| v.abs()).collect(),
        };
        s.title = r.title;
        s.values = r.values;
        s.sumw2 = sumw2;
        s.entries = r.entries;
        Ok(s)
    }
}

impl From<Series> for SeriesRepr {
    fn from(s: Series) -> Self {
        SeriesRepr {
            name: s.name,
            title: s.title,
            edges_x: s.edges_x,
            edges_y: s.edges_y,
            values: s.values,
            sumw2: Some(s.sumw2),
            entries: s.entries,
        }
    }
}

fn validate_edges(axis: &str, edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(HistError::InvalidEdges(format!(
            "{axis}: need at least 2 edges, got {}",
            edges.len()
        )));
    }
    if edges.iter().any(|e| !e.is_finite()) {
        return Err(HistError::InvalidEdges(format!("{axis}: non-finite edge")));
    }
    if let Some(w) = edges.windows(2).find(|w| w[1] <= w[0]) {
        return Err(HistError::InvalidEdges(format!(
            "{axis}: edges must be strictly increasing ({} >= {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

fn uniform_edges(n_bins: usize, lo: f64, hi: f64) -> Vec<f64> {
    let step = (hi - lo) / n_bins as f64;
    (0..=n_bins).map(|i| if i == n_bins { hi } else { lo + step * i as f64 }).collect()
}

/// Bin lookup over `[edges[0], edges[last])`.
fn find_bin(edges: &[f64], val: f64) -> Option<usize> {
    if !(val >= edges[0] && val < edges[edges.len() - 1]) {
        return None;
    }
    match edges.binary_search_by(|e| e.total_cmp(&val)) {
        Ok(i) => (i < edges.len() - 1).then_some(i),
        Err(i) => (i > 0 && i < edges.len()).then(|| i - 1),
    }
}

impl Series {
    /// Empty 1D series over explicit edges.
    pub fn new_1d(name: impl Into<String>, edges: Vec<f64>) -> Result<Self> {
        validate_edges("x", &edges)?;
        let n = edges.len() - 1;
        Ok(Self {
            name: name.into(),
            title: String::new(),
            edges_x: edges,
            edges_y: None,
            values: vec![0.0; n],
            sumw2: vec![0.0; n],
            entries: 0,
        })
    }

    /// Empty 1D series with `n_bins` equal-width bins.
    pub fn uniform_1d(name: impl Into<String>, n_bins: usize, lo: f64, hi: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(HistError::InvalidEdges("x: n_bins must be > 0".into()));
        }
        Self::new_1d(name, uniform_edges(n_bins, lo, hi))
    }

    /// 1D series with given per-bin values (sumw2 = |value|, i.e. Poisson-like).
    pub fn from_values(name: impl Into<String>, edges: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        let mut s = Self::new_1d(name, edges)?;
        if values.len() != s.values.len() {
            return Err(HistError::ValueCount { expected: s.values.len(), got: values.len() });
        }
        s.sumw2 = values.iter().map(|v| v.abs()).collect();
        s.values = values;
        Ok(s)
    }

    /// Empty 2D series.
    pub fn new_2d(name: impl Into<String>, edges_x: Vec<f64>, edges_y: Vec<f64>) -> Result<Self> {
        validate_edges("x", &edges_x)?;
        validate_edges("y", &edges_y)?;
        let n = (edges_x.len() - 1) * (edges_y.len() - 1);
        Ok(Self {
            name: name.into(),
            title: String::new(),
            edges_x,
            edges_y: Some(edges_y),
            values: vec![0.0; n],
            sumw2: vec![0.0; n],
            entries: 0,
        })
    }

    /// Empty 2D series with uniform binning on both axes.
    #[allow(clippy::too_many_arguments)]
    pub fn uniform_2d(
        name: impl Into<String>,
        nx: usize,
        x_lo: f64,
        x_hi: f64,
        ny: usize,
        y_lo: f64,
        y_hi: f64,
    ) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(HistError::InvalidEdges("n_bins must be > 0".into()));
        }
        Self::new_2d(name, uniform_edges(nx, x_lo, x_hi), uniform_edges(ny, y_lo, y_hi))
    }

    /// Builder-style title setter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Copy of this series under a new name.
    pub fn clone_named(&self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self.clone() }
    }

    // --- Accessors ---

    /// Identifier used in legends and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form display title; empty unless set.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 1 or 2.
    pub fn dimensionality(&self) -> u8 {
        if self.edges_y.is_some() { 2 } else { 1 }
    }

    /// Strictly increasing x bin edges (`n_bins_x + 1` of them).
    pub fn edges_x(&self) -> &[f64] {
        &self.edges_x
    }

    /// Y bin edges, `None` for a 1D series.
    pub fn edges_y(&self) -> Option<&[f64]> {
        self.edges_y.as_deref()
    }

    /// Number of x bins.
    pub fn n_bins_x(&self) -> usize {
        self.edges_x.len() - 1
    }

    /// Number of y bins (1 for a 1D series).
    pub fn n_bins_y(&self) -> usize {
        self.edges_y.as_ref().map_or(1, |e| e.len() - 1)
    }

    /// Total number of bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series has no bins.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Per-bin values, row-major for 2D.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-bin sum of squared weights.
    pub fn sumw2(&self) -> &[f64] {
        &self.sumw2
    }

    /// Number of in-range fills.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Value of a bin by flat index.
    pub fn value(&self, bin: usize) -> Option<f64> {
        self.values.get(bin).copied()
    }

    /// Value at `(ix, iy)` of a 2D series.
    pub fn value_2d(&self, ix: usize, iy: usize) -> Option<f64> {
        let nx = self.n_bins_x();
        if self.edges_y.is_none() || ix >= nx || iy >= self.n_bins_y() {
            return None;
        }
        self.values.get(iy * nx + ix).copied()
    }

    /// Statistical error of a bin (`sqrt(sumw2)`).
    pub fn error(&self, bin: usize) -> Option<f64> {
        self.sumw2.get(bin).map(|w2| w2.sqrt())
    }

    /// Sum of all in-range bin values.
    pub fn integral(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Midpoint of x bin `ix`.
    pub fn bin_center(&self, ix: usize) -> Option<f64> {
        let e = &self.edges_x;
        (ix + 1 < e.len()).then(|| 0.5 * (e[ix] + e[ix + 1]))
    }

    /// Width of x bin `ix`.
    pub fn bin_width(&self, ix: usize) -> Option<f64> {
        let e = &self.edges_x;
        (ix + 1 < e.len()).then(|| e[ix + 1] - e[ix])
    }

    /// Index of the x bin containing `x`; `None` for under/overflow.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        find_bin(&self.edges_x, x)
    }

    /// `(min, max)` over all bins.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Smallest strictly positive bin value, if any.
    pub fn min_positive(&self) -> Option<f64> {
        self.values.iter().copied().filter(|v| *v > 0.0).min_by(f64::total_cmp)
    }

    /// Edges match exactly on every axis.
    pub fn same_binning(&self, other: &Series) -> bool {
        self.edges_x == other.edges_x && self.edges_y == other.edges_y
    }

    // --- Filling ---

    /// Fill a 1D series with unit weight. Out-of-range values are dropped.
    pub fn fill(&mut self, x: f64) -> Option<usize> {
        self.fill_weighted(x, 1.0)
    }

    /// Fill a 1D series with weight `w`; returns the bin hit.
    pub fn fill_weighted(&mut self, x: f64, w: f64) -> Option<usize> {
        if self.edges_y.is_some() {
            return None;
        }
        let bin = find_bin(&self.edges_x, x)?;
        self.values[bin] += w;
        self.sumw2[bin] += w * w;
        self.entries += 1;
        Some(bin)
    }

    /// Fill a 2D series. Out-of-range values are dropped.
    pub fn fill_2d(&mut self, x: f64, y: f64, w: f64) -> Option<usize> {
        let ey = self.edges_y.as_ref()?;
        let iy = find_bin(ey, y)?;
        let ix = find_bin(&self.edges_x, x)?;
        let idx = iy * self.n_bins_x() + ix;
        self.values[idx] += w;
        self.sumw2[idx] += w * w;
        self.entries += 1;
        Some(idx)
    }

    // --- Arithmetic ---

    /// Multiply every bin by `factor` (errors scale linearly).
    pub fn scale(&mut self, factor: f64) {
        let f2 = factor * factor;
        for v in &mut self.values {
            *v *= factor;
        }
        for w2 in &mut self.sumw2 {
            *w2 *= f2;
        }
    }

    /// Scaled copy.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut s = self.clone();
        s.scale(factor);
        s
    }

    fn check_compatible(&self, other: &Series) -> Result<()> {
        if self.dimensionality() != other.dimensionality() {
            return Err(HistError::DimensionMismatch {
                expected: self.dimensionality(),
                got: other.dimensionality(),
            });
        }
        if !self.same_binning(other) {
            return Err(HistError::BinningMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }
        Ok(())
    }

    /// Bin-by-bin sum; errors add in quadrature.
    pub fn add(&mut self, other: &Series) -> Result<()> {
        self.check_compatible(other)?;
        for (v, o) in self.values.iter_mut().zip(&other.values) {
            *v += o;
        }
        for (w2, o) in self.sumw2.iter_mut().zip(&other.sumw2) {
            *w2 += o;
        }
        self.entries += other.entries;
        Ok(())
    }

    /// Sum as a new series called `name`.
    pub fn added(&self, other: &Series, name: impl Into<String>) -> Result<Self> {
        let mut s = self.clone_named(name);
        s.add(other)?;
        Ok(s)
    }

    /// Bin-by-bin ratio `self / other`. Bins with a zero denominator are set to zero.
    pub fn divide(&mut self, other: &Series) -> Result<()> {
        self.check_compatible(other)?;
        for i in 0..self.values.len() {
            let a = self.values[i];
            let b = other.values[i];
            if b == 0.0 {
                self.values[i] = 0.0;
                self.sumw2[i] = 0.0;
                continue;
            }
            let b2 = b * b;
            self.values[i] = a / b;
            self.sumw2[i] = (self.sumw2[i] * b2 + other.sumw2[i] * a * a) / (b2 * b2);
        }
        Ok(())
    }

    /// Ratio as a new series called `name`.
    pub fn divided(&self, other: &Series, name: impl Into<String>) -> Result<Self> {
        let mut s = self.clone_named(name);
        s.divide(other)?;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn find_bin_edge_cases() {
        let edges = vec![0.0, 1.0, 2.0, 3.0];
        assert_eq!(find_bin(&edges, -0.5), None);
        assert_eq!(find_bin(&edges, 3.0), None);
        assert_eq!(find_bin(&edges, 0.0), Some(0));
        assert_eq!(find_bin(&edges, 1.0), Some(1));
        assert_eq!(find_bin(&edges, 2.99), Some(2));
        assert_eq!(find_bin(&edges, f64::NAN), None);
    }

    #[test]
    fn rejects_bad_edges() {
        assert!(matches!(Series::new_1d("a", vec![0.0]), Err(HistError::InvalidEdges(_))));
        assert!(matches!(
            Series::new_1d("a", vec![0.0, 1.0, 1.0]),
            Err(HistError::InvalidEdges(_))
        ));
        assert!(matches!(Series::uniform_1d("a", 0, 0.0, 1.0), Err(HistError::InvalidEdges(_))));
    }

    #[test]
    fn uniform_edges_hit_upper_bound_exactly() {
        let s = Series::uniform_1d("a", 50, 0.0, 100.0).unwrap();
        assert_eq!(s.edges_x().len(), 51);
        assert_eq!(*s.edges_x().last().unwrap(), 100.0);
        assert_abs_diff_eq!(s.bin_width(0).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn fill_and_integral() {
        let mut s = Series::uniform_1d("a", 4, 0.0, 4.0).unwrap();
        s.fill(0.5);
        s.fill(0.7);
        s.fill_weighted(3.2, 2.0);
        assert_eq!(s.fill(9.0), None);
        assert_eq!(s.values(), &[2.0, 0.0, 0.0, 2.0]);
        assert_abs_diff_eq!(s.integral(), 4.0);
        assert_abs_diff_eq!(s.error(3).unwrap(), 2.0);
        assert_eq!(s.entries(), 3);
    }

    #[test]
    fn fill_2d_row_major() {
        let mut s = Series::uniform_2d("h", 2, 0.0, 2.0, 3, 0.0, 3.0).unwrap();
        assert_eq!(s.dimensionality(), 2);
        assert_eq!(s.fill_2d(1.5, 2.5, 1.0), Some(5));
        assert_eq!(s.value_2d(1, 2), Some(1.0));
        assert_eq!(s.fill(0.5), None);
    }

    #[test]
    fn scale_to_unit_integral() {
        let mut s = Series::from_values("a", vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 1.0]).unwrap();
        s.scale(1.0 / s.integral());
        assert_abs_diff_eq!(s.integral(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.values()[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn divide_zero_denominator_gives_zero() {
        let edges = vec![0.0, 1.0, 2.0];
        let a = Series::from_values("a", edges.clone(), vec![2.0, 3.0]).unwrap();
        let b = Series::from_values("b", edges, vec![0.0, 2.0]).unwrap();
        let r = a.divided(&b, "r").unwrap();
        assert_eq!(r.values(), &[0.0, 1.5]);
        assert_eq!(r.name(), "r");
    }

    #[test]
    fn add_rejects_binning_mismatch() {
        let mut a = Series::uniform_1d("a", 2, 0.0, 2.0).unwrap();
        let b = Series::uniform_1d("b", 3, 0.0, 2.0).unwrap();
        assert!(matches!(a.add(&b), Err(HistError::BinningMismatch { .. })));
        let c = Series::uniform_2d("c", 2, 0.0, 2.0, 2, 0.0, 1.0).unwrap();
        assert!(matches!(a.add(&c), Err(HistError::DimensionMismatch { .. })));
    }

    #[test]
    fn min_positive_skips_empty_bins() {
        let s = Series::from_values("a", vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 0.3, 0.1]).unwrap();
        assert_eq!(s.min_positive(), Some(0.1));
        assert_eq!(s.value_range(), (0.0, 0.3));
    }
}
