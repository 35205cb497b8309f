use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Advance width of a glyph in ems for a Helvetica-like face.
fn advance_em(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.28,
        'f' | 't' | 'r' | 'I' | ' ' | '(' | ')' | '[' | ']' | '-' => 0.33,
        'm' | 'w' | 'M' | 'W' => 0.83,
        'A'..='Z' => 0.67,
        '0'..='9' => 0.56,
        _ => 0.52,
    }
}

/// Measure text width and height in pixels.
///
/// No font files are shipped, so widths come from a fixed advance table;
/// accurate to a few percent for sans-serif faces, which is enough to keep
/// neighbouring labels apart.
pub fn measure_text(text: &str, size_px: f64, weight: FontWeight) -> TextMetrics {
    let bold = if weight == FontWeight::Bold { 1.08 } else { 1.0 };
    let em: f64 = text.chars().map(advance_em).sum();
    TextMetrics { width: em * size_px * bold, height: size_px * 1.15, ascent: size_px * 0.93 }
}

/// Measure text with a TextStyle.
pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(text, style.size, style.weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_hello() {
        let m = measure_text("Hello", 12.0, FontWeight::Regular);
        assert!(m.width > 20.0);
        assert!(m.height > 8.0);
        assert!(m.ascent > 0.0);
    }

    #[test]
    fn bold_wider_than_regular() {
        let r = measure_text("CMS", 12.0, FontWeight::Regular);
        let b = measure_text("CMS", 12.0, FontWeight::Bold);
        assert!(b.width > r.width);
    }
}
