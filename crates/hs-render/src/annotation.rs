/// Extra lines of text written below the experiment label (channel names,
/// selection summaries, ...).
///
/// Canvas builders copy the stack, so lines appended afterwards only affect
/// canvases built later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStack {
    lines: Vec<String>,
}

impl AnnotationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn reset(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Top of each line below the bottom of the block it continues, in pixels.
    ///
    /// Lines sit `spacing * text_px` apart, and the first one leaves the same
    /// `(spacing - 1) * text_px` gap that separates consecutive lines.
    pub fn offsets(&self, text_px: f64, spacing: f64) -> Vec<f64> {
        let gap = (spacing - 1.0) * text_px;
        (0..self.lines.len()).map(|k| gap + k as f64 * spacing * text_px).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AnnotationStack {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { lines: iter.into_iter().map(Into::into).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_reset() {
        let mut a = AnnotationStack::new();
        a.append("#mu channel");
        a.append("N_{jets} #geq 2");
        assert_eq!(a.len(), 2);
        assert_eq!(a.lines()[0], "#mu channel");
        a.reset();
        assert!(a.is_empty());
    }

    #[test]
    fn offsets_are_evenly_spaced() {
        let a: AnnotationStack = ["a", "b", "c"].into_iter().collect();
        let o = a.offsets(10.0, 1.3);
        assert_eq!(o.len(), 3);
        assert!((o[0] - 3.0).abs() < 1e-9);
        assert!((o[1] - o[0] - 13.0).abs() < 1e-9);
        assert!((o[2] - o[1] - 13.0).abs() < 1e-9);
    }
}
