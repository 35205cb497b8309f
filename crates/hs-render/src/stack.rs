//! Cumulative stacked histograms.

use hs_hist::{HistError, Series};

use crate::color::Color;
use crate::draw_options::{DrawOptions, FillStyle};
use crate::layout::legend::{Legend, LegendMarker};
use crate::pad::Pad;

#[derive(Debug, Clone, PartialEq)]
pub struct StackEntry {
    pub label: String,
    pub series: Series,
    /// Position in the stack; ties keep insertion order.
    pub draw_order: usize,
    /// Overrides the style's stack colour cycle.
    pub fill_color: Option<Color>,
}

impl StackEntry {
    pub fn new(label: impl Into<String>, series: Series, draw_order: usize) -> Self {
        Self { label: label.into(), series, draw_order, fill_color: None }
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }
}

/// Ordered list of stack entries; the first pushed sits at the bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    pub name: String,
    entries: Vec<StackEntry>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    pub fn push(&mut self, label: impl Into<String>, series: Series) -> &mut Self {
        let order = self.entries.len();
        self.entries.push(StackEntry::new(label, series, order));
        self
    }

    pub fn push_colored(&mut self, label: impl Into<String>, series: Series, color: Color) -> &mut Self {
        let order = self.entries.len();
        self.entries.push(StackEntry::new(label, series, order).with_fill_color(color));
        self
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-bin sum of every entry, named after the stack. `None` when empty.
    pub fn total(&self) -> crate::Result<Option<Series>> {
        let Some(first) = self.entries.first() else {
            return Ok(None);
        };
        let mut sum = first.series.clone_named(self.name.clone());
        for e in &self.entries[1..] {
            sum.add(&e.series)?;
        }
        Ok(Some(sum))
    }

    pub fn draw(&self, pad: &mut Pad, legend: &mut Legend) -> crate::Result<()> {
        draw_stack(pad, &self.entries, legend)
    }
}

/// Entries sorted by `draw_order`, stable for ties.
fn ordered(entries: &[StackEntry]) -> Vec<&StackEntry> {
    let mut sorted: Vec<&StackEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.draw_order);
    sorted
}

fn check_binning(entries: &[&StackEntry]) -> crate::Result<()> {
    let Some(first) = entries.first() else {
        return Ok(());
    };
    for e in entries {
        let got = e.series.dimensionality();
        if got != 1 {
            return Err(HistError::DimensionMismatch { expected: 1, got }.into());
        }
        if !first.series.same_binning(&e.series) {
            return Err(HistError::BinningMismatch {
                left: first.series.name().to_string(),
                right: e.series.name().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Lower edge of every entry, in draw order: entry `i` sits on the sum of entries `0..i`.
pub fn cumulative_baselines(entries: &[StackEntry]) -> crate::Result<Vec<Vec<f64>>> {
    let sorted = ordered(entries);
    check_binning(&sorted)?;
    Ok(baselines(&sorted))
}

fn baselines(sorted: &[&StackEntry]) -> Vec<Vec<f64>> {
    let n_bins = sorted.first().map_or(0, |e| e.series.values().len());
    let mut running = vec![0.0; n_bins];
    sorted
        .iter()
        .map(|e| {
            let base = running.clone();
            for (acc, v) in running.iter_mut().zip(e.series.values()) {
                *acc += v;
            }
            base
        })
        .collect()
}

/// Draw `entries` as a cumulative filled stack and add one fill entry per
/// series to `legend`, in draw order.
///
/// All entries are validated before anything is drawn. An empty list is a no-op.
pub fn draw_stack(pad: &mut Pad, entries: &[StackEntry], legend: &mut Legend) -> crate::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let sorted = ordered(entries);
    check_binning(&sorted)?;
    let bases = baselines(&sorted);

    let outline = pad.colors().frame;
    for (i, (entry, base)) in sorted.iter().zip(bases).enumerate() {
        if entry.series.values().iter().any(|v| *v < 0.0) {
            log::warn!(
                "stack entry '{}' has negative bins; regions below it will overlap",
                entry.label
            );
        }
        let fill = entry.fill_color.unwrap_or_else(|| pad.colors().stack_color(i));
        let options = DrawOptions::hist().with_fill(fill, FillStyle::Solid).with_line_color(outline);
        pad.draw_stacked(&entry.series, options, base);
        legend.add_entry(entry.series.name(), entry.label.clone(), LegendMarker::FILL);
    }
    log::debug!("pad '{}': stacked {} entries", pad.name(), sorted.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderError;
    use crate::annotation::AnnotationStack;
    use crate::canvas::{CanvasBuilder, CanvasParams};
    use crate::config::StyleConfig;
    use crate::pad::PadItem;
    use proptest::prelude::*;

    fn series(name: &str, values: Vec<f64>) -> Series {
        let edges = (0..=values.len()).map(|i| i as f64).collect();
        Series::from_values(name, edges, values).unwrap()
    }

    fn legend() -> Legend {
        Legend::create(0.6, 0.7, 0.9, 0.9, 0.04, 1, None).unwrap()
    }

    fn pad() -> Pad {
        let params = CanvasParams::new("c", (0.0, 3.0), (0.0, 5.0), "x", "y");
        let canvas = CanvasBuilder::build(&params, &StyleConfig::default(), &AnnotationStack::new()).unwrap();
        canvas.pad().clone()
    }

    #[test]
    fn baselines_accumulate_in_insertion_order() {
        let mut stack = Stack::new("bkg");
        stack.push("Background", series("b", vec![1.0, 2.0, 1.0]));
        stack.push("Signal", series("s", vec![0.0, 1.0, 0.0]));
        let bases = cumulative_baselines(stack.entries()).unwrap();
        assert_eq!(bases, vec![vec![0.0; 3], vec![1.0, 2.0, 1.0]]);
        assert_eq!(stack.total().unwrap().unwrap().values(), &[1.0, 3.0, 1.0]);
    }

    #[test]
    fn draws_and_registers_legend_entries() {
        let mut p = pad();
        let mut leg = legend();
        let mut stack = Stack::new("bkg");
        stack.push("Background", series("b", vec![1.0, 2.0, 1.0]));
        stack.push_colored("Signal", series("s", vec![0.0, 1.0, 0.0]), Color::WHITE);
        stack.draw(&mut p, &mut leg).unwrap();

        let labels: Vec<&str> = leg.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Background", "Signal"]);
        assert!(leg.entries().iter().all(|e| e.marker == LegendMarker::FILL));
        match &p.items()[1] {
            PadItem::Series { baseline: Some(b), options, .. } => {
                assert_eq!(b, &vec![1.0, 2.0, 1.0]);
                assert_eq!(options.fill_color, Some(Color::WHITE));
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn empty_stack_is_a_no_op() {
        let mut p = pad();
        let mut leg = legend();
        draw_stack(&mut p, &[], &mut leg).unwrap();
        assert!(p.items().is_empty());
        assert!(leg.entries().is_empty());
        assert!(Stack::new("x").total().unwrap().is_none());
    }

    #[test]
    fn mismatched_binning_draws_nothing() {
        let mut p = pad();
        let mut leg = legend();
        let entries = [
            StackEntry::new("a", series("a", vec![1.0, 1.0, 1.0]), 0),
            StackEntry::new("b", series("b", vec![1.0, 1.0]), 1),
        ];
        assert!(matches!(
            draw_stack(&mut p, &entries, &mut leg),
            Err(RenderError::Hist(HistError::BinningMismatch { .. }))
        ));
        assert!(p.items().is_empty());
        assert!(leg.entries().is_empty());
    }

    #[test]
    fn draw_order_ties_keep_insertion_order() {
        let entries = [
            StackEntry::new("late", series("late", vec![5.0]), 1),
            StackEntry::new("first", series("first", vec![1.0]), 0),
            StackEntry::new("second", series("second", vec![2.0]), 0),
        ];
        let bases = cumulative_baselines(&entries).unwrap();
        assert_eq!(bases, vec![vec![0.0], vec![1.0], vec![3.0]]);
    }

    proptest! {
        #[test]
        fn baseline_is_sum_of_earlier_entries(
            values in prop::collection::vec(prop::collection::vec(0.0f64..100.0, 4), 1..6)
        ) {
            let entries: Vec<StackEntry> = values
                .iter()
                .enumerate()
                .map(|(i, v)| StackEntry::new(format!("e{i}"), series(&format!("e{i}"), v.clone()), i))
                .collect();
            let bases = cumulative_baselines(&entries).unwrap();
            for (i, base) in bases.iter().enumerate() {
                for bin in 0..4 {
                    let expected: f64 = values[..i].iter().map(|v| v[bin]).sum();
                    prop_assert!((base[bin] - expected).abs() < 1e-9);
                }
            }
            let last = bases.len() - 1;
            for bin in 0..4 {
                let top = bases[last][bin] + values[last][bin];
                let total: f64 = values.iter().map(|v| v[bin]).sum();
                prop_assert!((top - total).abs() < 1e-9);
            }
        }
    }
}
