use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`; `None` when malformed.
    pub fn try_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b, a: 1.0 })
    }

    /// Parse `#rrggbb`, falling back to black. For compile-time tables only.
    pub fn hex(s: &str) -> Self {
        Self::try_hex(s).unwrap_or(Self::BLACK)
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors (for colormaps).
    pub fn lerp(a: Color, b: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: (a.r as f64 * (1.0 - t) + b.r as f64 * t).round() as u8,
            g: (a.g as f64 * (1.0 - t) + b.g as f64 * t).round() as u8,
            b: (a.b as f64 * (1.0 - t) + b.b as f64 * t).round() as u8,
            a: a.a * (1.0 - t) + b.a * t,
        }
    }
}

/// Named colours accepted in style options, plus `#rrggbb`.
const NAMED: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#00ff00"),
    ("blue", "#0000ff"),
    ("azure", "#0080ff"),
    ("azure+2", "#3f90da"),
    ("orange", "#ff8000"),
    ("gray", "#999999"),
    ("grey", "#999999"),
];

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Some((_, hex)) = NAMED.iter().find(|(name, _)| *name == key) {
            return Ok(Color::hex(hex));
        }
        Color::try_hex(&key).ok_or_else(|| format!("unrecognised color '{s}'"))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// --- Categorical palettes (stack fills) ---

/// Petroff 6-colour scheme, the house default for stacked samples.
pub const PETROFF6: &[&str] = &["#5790fc", "#f89c20", "#e42536", "#964a8b", "#9c9ca1", "#7a21dd"];

/// Petroff 10-colour scheme for busier stacks.
pub const PETROFF10: &[&str] = &[
    "#3f90da", "#ffa90e", "#bd1f01", "#94a4a2", "#832db6", "#a96b59", "#e76300", "#b9ac70",
    "#717581", "#92dadd",
];

pub fn palette_colors(name: &str) -> Vec<Color> {
    let strs = match name {
        "petroff10" => PETROFF10,
        _ => PETROFF6,
    };
    strs.iter().map(|s| Color::hex(s)).collect()
}

// --- Continuous ramps (2D heat maps) ---

/// Piecewise-linear colour ramp over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f64, Color)>,
}

impl ColorRamp {
    /// Evenly spaced stops from hex strings.
    pub fn even(hex: &[&str]) -> Self {
        let n = hex.len().max(2) - 1;
        Self {
            stops: hex.iter().enumerate().map(|(i, h)| (i as f64 / n as f64, Color::hex(h))).collect(),
        }
    }

    /// Colour at fraction `t` (clamped).
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let Some(first) = self.stops.first() else {
            return Color::BLACK;
        };
        if t <= first.0 {
            return first.1;
        }
        for w in self.stops.windows(2) {
            let (t0, c0) = w[0];
            let (t1, c1) = w[1];
            if t <= t1 {
                let local = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return Color::lerp(c0, c1, local);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

pub const VIRIDIS: &[&str] =
    &["#440154", "#472c7a", "#3b518b", "#2c718e", "#21908d", "#27ad81", "#5cc863", "#aadc32", "#fde725"];

pub const BIRD: &[&str] =
    &["#352a87", "#0f5cdd", "#1481d6", "#06a4ca", "#2eb7a4", "#87bf77", "#d1bb59", "#fec832", "#f9fb0e"];

/// Alternative 2D ramp built on the Petroff hues.
pub const CMS_ALTERNATIVE: &[&str] = &["#ffffff", "#5790fc", "#964a8b", "#e42536", "#f89c20"];

pub const GREYSCALE: &[&str] = &["#ffffff", "#000000"];

/// RdBu diverging ramp: low → blue, mid → white, high → red.
pub const RDBU: &[&str] = &["#2166ac", "#ffffff", "#b2182b"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::hex("#1D4ED8");
        assert_eq!(c.r, 0x1D);
        assert_eq!(c.g, 0x4E);
        assert_eq!(c.b, 0xD8);
        assert!((c.a - 1.0).abs() < 1e-9);
        assert_eq!(Color::try_hex("#12"), None);
    }

    #[test]
    fn svg_fill_alpha() {
        let c = Color::rgb(29, 78, 216).with_alpha(0.5);
        assert_eq!(c.to_svg_fill(), "rgba(29,78,216,0.500)");
    }

    #[test]
    fn named_colors() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("Azure+2".parse::<Color>().unwrap().to_hex(), "#3f90da");
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn palette_lookup() {
        assert_eq!(palette_colors("petroff6").len(), 6);
        assert_eq!(palette_colors("petroff10").len(), 10);
    }

    #[test]
    fn ramp_endpoints_and_midpoint() {
        let ramp = ColorRamp::even(RDBU);
        assert_eq!(ramp.sample(0.0).to_hex(), "#2166ac");
        assert_eq!(ramp.sample(0.5), Color::WHITE);
        assert_eq!(ramp.sample(2.0).to_hex(), "#b2182b");
        assert_eq!(ramp.sample(f64::NAN).to_hex(), "#2166ac");
    }
}
