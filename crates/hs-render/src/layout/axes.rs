use std::cell::RefCell;
use std::rc::Rc;

use crate::RenderError;
use crate::markup::superscript_char;

/// Axis shared between the pads of a ratio canvas.
///
/// Both pads hold a clone of the same handle, so a range or log change made
/// through either pad is seen by the other at paint time.
pub type SharedAxis = Rc<RefCell<AxisSpec>>;

/// Range, scale and title of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    min: f64,
    max: f64,
    log: bool,
    pub title: String,
    /// Target number of major ticks.
    pub divisions: usize,
    /// Distance of the title from the frame, in title heights.
    pub title_offset: f64,
}

/// Computed tick marks for an axis, all within `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub major: Vec<f64>,
    pub labels: Vec<String>,
    pub minor: Vec<f64>,
}

impl AxisSpec {
    pub fn new(min: f64, max: f64, title: impl Into<String>) -> crate::Result<Self> {
        check_range(min, max)?;
        Ok(Self { min, max, log: false, title: title.into(), divisions: 6, title_offset: 1.0 })
    }

    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions.max(2);
        self
    }

    pub fn with_title_offset(mut self, offset: f64) -> Self {
        self.title_offset = offset;
        self
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn is_log(&self) -> bool {
        self.log
    }

    pub fn set_range(&mut self, min: f64, max: f64) -> crate::Result<()> {
        check_range(min, max)?;
        if self.log && min <= 0.0 {
            return Err(RenderError::InvalidRange(format!(
                "log axis needs a positive lower bound, got {min}"
            )));
        }
        self.min = min;
        self.max = max;
        Ok(())
    }

    pub fn set_log(&mut self, log: bool) -> crate::Result<()> {
        if log && self.min <= 0.0 {
            return Err(RenderError::InvalidRange(format!(
                "cannot switch to log scale with lower bound {}",
                self.min
            )));
        }
        self.log = log;
        Ok(())
    }

    pub fn ticks(&self) -> Ticks {
        if self.log { self.log_ticks() } else { self.linear_ticks() }
    }

    fn linear_ticks(&self) -> Ticks {
        let step = nice_step((self.max - self.min) / (self.divisions.max(2) - 1) as f64);
        let Some((first, last)) =
            tick_indices(self.min, self.max, step).filter(|(first, last)| last - first < MAX_MAJOR_TICKS)
        else {
            return self.endpoint_ticks();
        };
        let major: Vec<f64> = (first..=last).map(|k| k as f64 * step).collect();
        let labels = major.iter().map(|&v| format_tick(v, step)).collect();

        // Minor ticks: 5 subdivisions per major
        let minor_step = step / 5.0;
        let minor = match tick_indices(self.min, self.max, minor_step) {
            Some((lo, hi)) => (lo..=hi)
                .map(|k| k as f64 * minor_step)
                .filter(|mv| !major.iter().any(|t| (t - mv).abs() < minor_step * 0.01))
                .collect(),
            None => Vec::new(),
        };
        Ticks { major, labels, minor }
    }

    /// Ticks at the range ends only, for ranges no step grid can resolve.
    fn endpoint_ticks(&self) -> Ticks {
        let major = vec![self.min, self.max];
        let labels = major.iter().map(|&v| format_plain(v)).collect();
        Ticks { major, labels, minor: Vec::new() }
    }

    fn log_ticks(&self) -> Ticks {
        let lo = self.min.log10().floor() as i32;
        let hi = self.max.log10().ceil() as i32;
        let inside = |v: f64| v >= self.min * (1.0 - 1e-9) && v <= self.max * (1.0 + 1e-9);

        let mut major = Vec::new();
        let mut labels = Vec::new();
        let mut minor = Vec::new();
        for exp in lo..=hi {
            let v = 10.0_f64.powi(exp);
            if inside(v) {
                major.push(v);
                labels.push(format_decade(exp));
            }
            // Minor ticks at 2..9
            for m in 2..=9 {
                let mv = m as f64 * v;
                if inside(mv) {
                    minor.push(mv);
                }
            }
        }
        Ticks { major, labels, minor }
    }

    /// Map a data value to pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let log_val = value.max(1e-300).ln();
            let log_min = self.min.ln();
            let log_max = self.max.ln();
            (log_val - log_min) / (log_max - log_min)
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }

    /// Map pixel coordinate to data value (inverse).
    pub fn pixel_to_data(&self, px: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (px - px_min) / (px_max - px_min);
        if self.log {
            let log_min = self.min.ln();
            let log_max = self.max.ln();
            (log_min + frac * (log_max - log_min)).exp()
        } else {
            self.min + frac * (self.max - self.min)
        }
    }

    /// Clamp a value into the drawable range (log axes never see values <= 0).
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub fn shared(axis: AxisSpec) -> SharedAxis {
    Rc::new(RefCell::new(axis))
}

fn check_range(min: f64, max: f64) -> crate::Result<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(RenderError::InvalidRange(format!("[{min}, {max}] is not an increasing range")));
    }
    Ok(())
}

/// Wider grids mean the step no longer describes the range.
const MAX_MAJOR_TICKS: i64 = 100;

/// Multiples of a step beyond 2^52 are no longer distinct floats.
const MAX_TICK_INDEX: f64 = 4_503_599_627_370_496.0;

/// First and last `k` with `k * step` inside `[min, max]`, or `None` when the
/// step is degenerate for this range.
fn tick_indices(min: f64, max: f64, step: f64) -> Option<(i64, i64)> {
    if !(step.is_finite() && step > f64::EPSILON * min.abs().max(max.abs())) {
        return None;
    }
    let first = (min / step - 1e-9).ceil();
    let last = (max / step + 1e-6).floor();
    if !(first.abs() < MAX_TICK_INDEX && last.abs() < MAX_TICK_INDEX) || last < first {
        return None;
    }
    Some((first as i64, last as i64))
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    if value.abs() >= 1e15 {
        return format_plain(value);
    }
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    // Avoid "-0"
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    if decimals == 0 { format!("{}", v.round() as i64) } else { format!("{v:.decimals$}") }
}

fn format_plain(value: f64) -> String {
    let a = value.abs();
    if a != 0.0 && !(1e-3..1e6).contains(&a) { format!("{value:.3e}") } else { format!("{value}") }
}

fn format_decade(exp: i32) -> String {
    match exp {
        0 => "1".into(),
        1 => "10".into(),
        _ => {
            let sup: String = exp.to_string().chars().filter_map(superscript_char).collect();
            format!("10{sup}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linear_ticks_stay_inside_range() {
        let ax = AxisSpec::new(0.0, 90.0, "X").unwrap().with_divisions(7);
        let t = ax.ticks();
        assert_eq!(t.major.first(), Some(&0.0));
        assert!(t.major.iter().all(|v| (0.0..=90.0).contains(v)));
        assert!(t.minor.iter().all(|v| (0.0..=90.0).contains(v)));
        assert_eq!(t.major.len(), t.labels.len());
        assert_eq!(t.labels[1], "10");
    }

    #[test]
    fn ratio_axis_ticks() {
        let ax = AxisSpec::new(0.5, 1.5, "Ratio").unwrap().with_divisions(3);
        let t = ax.ticks();
        assert_eq!(t.labels, vec!["0.5", "1.0", "1.5"]);
    }

    #[test]
    fn data_to_pixel_linear() {
        let ax = AxisSpec::new(0.0, 100.0, "").unwrap();
        assert_abs_diff_eq!(ax.data_to_pixel(50.0, 0.0, 500.0), 250.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ax.pixel_to_data(250.0, 0.0, 500.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn log_ticks_are_decades() {
        let mut ax = AxisSpec::new(1e-3, 2.0, "").unwrap();
        ax.set_log(true).unwrap();
        let t = ax.ticks();
        assert_eq!(t.major.len(), 4);
        for (got, want) in t.major.iter().zip([1e-3, 1e-2, 1e-1, 1.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(t.labels[3], "1");
        assert_eq!(t.labels[0], "10\u{207B}\u{00B3}");
        assert!(t.minor.contains(&2.0));
        assert_abs_diff_eq!(ax.data_to_pixel(1e-3, 0.0, 100.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        assert!(matches!(AxisSpec::new(50.0, 10.0, ""), Err(RenderError::InvalidRange(_))));
        assert!(matches!(AxisSpec::new(f64::NAN, 10.0, ""), Err(RenderError::InvalidRange(_))));
        let mut ax = AxisSpec::new(0.0, 10.0, "").unwrap();
        assert!(matches!(ax.set_log(true), Err(RenderError::InvalidRange(_))));
        assert!(!ax.is_log());
    }

    #[test]
    fn huge_offset_falls_back_to_endpoints() {
        let ax = AxisSpec::new(1e17, 1e17 + 64.0, "").unwrap();
        let t = ax.ticks();
        assert_eq!(t.major, vec![1e17, 1e17 + 64.0]);
        assert_eq!(t.labels.len(), 2);
        assert!(t.minor.is_empty());
    }

    #[test]
    fn overflowing_span_falls_back_to_endpoints() {
        let ax = AxisSpec::new(-1e308, 1e308, "").unwrap();
        let t = ax.ticks();
        assert_eq!(t.major, vec![-1e308, 1e308]);
        assert_eq!(t.labels, vec!["-1.000e308", "1.000e308"]);
    }

    #[test]
    fn large_but_resolvable_range() {
        let ax = AxisSpec::new(0.0, 1e20, "").unwrap();
        let t = ax.ticks();
        assert!(t.major.len() >= 3 && t.major.len() < 20);
        assert!(t.labels.iter().all(|l| l.contains('e') || l == "0"));
        assert!(t.major.iter().all(|v| (0.0..=1e20).contains(v)));
    }

    #[test]
    fn nice_step_values() {
        assert!((nice_step(3.2) - 2.0).abs() < 1e-9);
        assert!((nice_step(0.7) - 0.5).abs() < 1e-9);
        assert!((nice_step(15.0) - 10.0).abs() < 1e-9);
        assert!((nice_step(4.5) - 5.0).abs() < 1e-9);
        assert!((nice_step(1.2) - 1.0).abs() < 1e-9);
    }
}
