//! Retained SVG drawing surface.
//!
//! The surface knows nothing about pads, margins or axes: it receives
//! already-computed pixel geometry and serialises it. Layout lives in
//! [`crate::pad`], [`crate::canvas`] and [`crate::dicanvas`].

use std::fmt::Write as FmtWrite;

use crate::color::Color;
use crate::primitives::*;

/// An SVG element stored for deferred rendering.
#[derive(Debug, Clone, PartialEq)]
enum SvgElement {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        style: LineStyle,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        style: Style,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
        rotate: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    PatternRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        pattern_id: String,
    },
    Group {
        clip_id: String,
        children: Vec<SvgElement>,
    },
}

/// Immediate-mode SVG surface. Coordinates in pixels, origin top-left.
#[derive(Debug, Clone)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    elements: Vec<SvgElement>,
    defs: Vec<String>,
    clip_stack: Vec<(String, Vec<SvgElement>)>,
    next_clip_id: usize,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            defs: Vec::new(),
            clip_stack: Vec::new(),
            next_clip_id: 0,
        }
    }

    // --- Drawing primitives ---

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        self.push(SvgElement::Polyline { points: points.to_vec(), style: style.clone() });
    }

    pub fn polygon(&mut self, points: &[(f64, f64)], style: &Style) {
        self.push(SvgElement::Polygon { points: points.to_vec(), style: style.clone() });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: None,
        });
    }

    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: Some(angle),
        });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        self.push(SvgElement::Circle { cx, cy, r, style: style.clone() });
    }

    /// Error bar: vertical line + optional horizontal caps.
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap_width: f64, style: &LineStyle) {
        self.line(x, y_lo, x, y_hi, style);
        if cap_width > 0.0 {
            let half = cap_width / 2.0;
            self.line(x - half, y_lo, x + half, y_lo, style);
            self.line(x - half, y_hi, x + half, y_hi, style);
        }
    }

    /// Data marker.
    pub fn marker(&mut self, x: f64, y: f64, marker: &MarkerStyle) {
        let style = Style {
            fill: Some(marker.color),
            stroke: Some(marker.color),
            stroke_width: 0.5,
            opacity: 1.0,
        };
        let s = marker.size;
        match marker.shape {
            MarkerShape::Circle => self.circle(x, y, s, &style),
            MarkerShape::Square => self.rect(x - s, y - s, 2.0 * s, 2.0 * s, &style),
            MarkerShape::Triangle => {
                self.polygon(&[(x, y - s * 1.15), (x + s, y + s * 0.85), (x - s, y + s * 0.85)], &style)
            }
            MarkerShape::Diamond => {
                self.polygon(&[(x, y - s * 1.3), (x + s, y), (x, y + s * 1.3), (x - s, y)], &style)
            }
        }
    }

    /// Rectangle filled with a 45° hatch pattern.
    pub fn hatch_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, spacing: f64) {
        let pattern_id =
            format!("hatch_{}_{}", color.to_hex().trim_start_matches('#'), spacing.round() as u32);
        let def = format!(
            r#"<pattern id="{pattern_id}" patternUnits="userSpaceOnUse" width="{sp}" height="{sp}" patternTransform="rotate(45)"><line x1="0" y1="0" x2="0" y2="{sp}" stroke="{c}" stroke-width="0.8"/></pattern>"#,
            sp = spacing,
            c = color.to_svg_fill(),
        );
        if !self.defs.contains(&def) {
            self.defs.push(def);
        }
        self.push(SvgElement::PatternRect { x, y, w, h, pattern_id });
    }

    // --- Clip paths ---

    /// Start clipping subsequent elements to the given rectangle.
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> String {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        self.defs.push(format!(
            r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
        ));
        self.clip_stack.push((id.clone(), Vec::new()));
        id
    }

    pub fn pop_clip(&mut self) {
        if let Some((clip_id, children)) = self.clip_stack.pop() {
            self.push(SvgElement::Group { clip_id, children });
        }
    }

    // --- SVG output ---

    fn push(&mut self, elem: SvgElement) {
        match self.clip_stack.last_mut() {
            Some((_, children)) => children.push(elem),
            None => self.elements.push(elem),
        }
    }

    /// Number of top-level elements (clip groups count once).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(32 * 1024);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );

        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for d in &self.defs {
                out.push_str(d);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }

        let _ =
            writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height);

        for elem in &self.elements {
            render_element(&mut out, elem);
        }
        // Unterminated clips are flushed rather than dropped.
        for (clip_id, children) in &self.clip_stack {
            render_element(
                &mut out,
                &SvgElement::Group { clip_id: clip_id.clone(), children: children.clone() },
            );
        }

        out.push_str("</svg>\n");
        out
    }
}

fn write_points(out: &mut String, points: &[(f64, f64)]) {
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{x:.2},{y:.2}");
    }
}

fn render_element(out: &mut String, elem: &SvgElement) {
    match elem {
        SvgElement::Rect { x, y, w, h, style } => {
            let _ = write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#);
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Line { x1, y1, x2, y2, style } => {
            let _ = write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#);
            write_line_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Polyline { points, style } => {
            out.push_str(r#"<polyline points=""#);
            write_points(out, points);
            out.push_str(r#"" fill="none""#);
            write_line_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Polygon { points, style } => {
            out.push_str(r#"<polygon points=""#);
            write_points(out, points);
            out.push('"');
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Text { x, y, content, style, rotate } => {
            let _ = write!(out, r#"<text x="{x:.2}" y="{y:.2}""#);
            let _ = write!(
                out,
                r#" font-family="Helvetica, Arial, sans-serif" font-size="{:.1}""#,
                style.size
            );
            let _ = write!(out, r#" fill="{}""#, style.color.to_svg_fill());
            let _ = write!(out, r#" text-anchor="{}""#, style.anchor.as_str());
            let _ = write!(out, r#" dominant-baseline="{}""#, style.baseline.as_str());
            if style.weight == FontWeight::Bold {
                out.push_str(r#" font-weight="bold""#);
            }
            if style.style == FontStyle::Italic {
                out.push_str(r#" font-style="italic""#);
            }
            if let Some(angle) = rotate {
                let _ = write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#);
            }
            out.push('>');
            for ch in content.chars() {
                match ch {
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '&' => out.push_str("&amp;"),
                    '"' => out.push_str("&quot;"),
                    _ => out.push(ch),
                }
            }
            out.push_str("</text>\n");
        }
        SvgElement::Circle { cx, cy, r, style } => {
            let _ = write!(out, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#);
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::PatternRect { x, y, w, h, pattern_id } => {
            let _ = writeln!(
                out,
                r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="url(#{pattern_id})" />"#
            );
        }
        SvgElement::Group { clip_id, children } => {
            let _ = writeln!(out, r#"<g clip-path="url(#{clip_id})">"#);
            for child in children {
                render_element(out, child);
            }
            out.push_str("</g>\n");
        }
    }
}

fn write_style_attrs(out: &mut String, style: &Style) {
    match &style.fill {
        Some(fill) => {
            let _ = write!(out, r#" fill="{}""#, fill.to_svg_fill());
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(out, r#" stroke="{}""#, stroke.to_svg_fill());
        let _ = write!(out, r#" stroke-width="{:.2}""#, style.stroke_width);
    }
    if (style.opacity - 1.0).abs() > 1e-4 {
        let _ = write!(out, r#" opacity="{:.3}""#, style.opacity);
    }
}

fn write_line_attrs(out: &mut String, style: &LineStyle) {
    let _ = write!(out, r#" stroke="{}""#, style.color.to_svg_fill());
    let _ = write!(out, r#" stroke-width="{:.2}""#, style.width);
    if let Some(dash) = &style.dash {
        let _ = write!(out, r#" stroke-dasharray="{dash}""#);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_surface() {
        let s = Surface::new(100.0, 50.0);
        let svg = s.finish_svg();
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("height=\"50\""));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn rect_rendering() {
        let mut s = Surface::new(200.0, 100.0);
        s.rect(10.0, 20.0, 50.0, 30.0, &Style::filled(Color::hex("#ff0000")));
        let svg = s.finish_svg();
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains("width=\"50.00\""));
    }

    #[test]
    fn clip_wraps_children() {
        let mut s = Surface::new(200.0, 100.0);
        s.push_clip(0.0, 0.0, 10.0, 10.0);
        s.line(0.0, 0.0, 5.0, 5.0, &LineStyle::solid(Color::BLACK, 1.0));
        s.pop_clip();
        assert_eq!(s.element_count(), 1);
        let svg = s.finish_svg();
        assert!(svg.contains(r#"<g clip-path="url(#clip0)">"#));
        assert!(svg.contains("<clipPath id=\"clip0\">"));
    }

    #[test]
    fn text_is_escaped() {
        let mut s = Surface::new(200.0, 100.0);
        s.text(10.0, 20.0, "a < b & c", &TextStyle::default());
        assert!(s.finish_svg().contains("a &lt; b &amp; c"));
    }
}
