use serde::Deserialize;

use crate::color::{self, Color};
use crate::layout::geometry::Margins;
use crate::palette::PaletteId;

/// House style configuration (YAML or programmatic).
///
/// Every canvas build takes a snapshot of this struct, so mutating it after a
/// build does not affect canvases that already exist.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub experiment: ExperimentConfig,
    pub header: HeaderConfig,
    pub canvas: CanvasPresets,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub colors: ColorsConfig,
    pub palette_2d: Palette2dConfig,
}

impl StyleConfig {
    pub fn set_lumi(&mut self, lumi: impl Into<String>) {
        self.experiment.lumi = lumi.into();
    }

    pub fn set_energy(&mut self, energy: impl Into<String>) {
        self.experiment.energy = energy.into();
    }

    /// Set the text written next to the experiment label. Empty disables it.
    pub fn set_extra_text(&mut self, text: impl Into<String>) {
        self.experiment.extra_text = text.into();
    }

    pub fn set_cms_text(&mut self, text: impl Into<String>) {
        self.experiment.cms_text = text.into();
    }

    pub fn preset(&self, square: bool) -> &CanvasPreset {
        if square { &self.canvas.square } else { &self.canvas.rectangular }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub cms_text: String,
    pub extra_text: String,
    pub lumi: String,
    pub lumi_unit: String,
    pub energy: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            cms_text: "CMS".into(),
            extra_text: "Preliminary".into(),
            lumi: "138".into(),
            lumi_unit: "fb^{-1}".into(),
            energy: "13".into(),
        }
    }
}

impl ExperimentConfig {
    /// Luminosity/energy string, e.g. `138 fb^{-1} (13 TeV)`.
    pub fn lumi_text(&self) -> String {
        match (self.lumi.is_empty(), self.energy.is_empty()) {
            (false, false) => format!("{} {} ({} TeV)", self.lumi, self.lumi_unit, self.energy),
            (false, true) => format!("{} {}", self.lumi, self.lumi_unit),
            (true, false) => format!("{} TeV", self.energy),
            (true, true) => String::new(),
        }
    }
}

/// Corner block tuning. Sizes are fractions of the pad top margin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub cms_text_size: f64,
    pub extra_over_cms_text_size: f64,
    pub lumi_text_size: f64,
    pub lumi_text_offset: f64,
    /// Horizontal inset of in-frame text, fraction of the frame width.
    pub rel_pos_x: f64,
    /// Vertical inset of in-frame text, fraction of the frame height.
    pub rel_pos_y: f64,
    /// Gap between experiment label and extra text, in experiment-label heights.
    pub rel_extra_dy: f64,
    /// Spacing of annotation lines, in annotation text heights.
    pub info_line_spacing: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            cms_text_size: 0.75,
            extra_over_cms_text_size: 0.76,
            lumi_text_size: 0.6,
            lumi_text_offset: 0.2,
            rel_pos_x: 0.045,
            rel_pos_y: 0.035,
            rel_extra_dy: 1.2,
            info_line_spacing: 1.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasPreset {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Right margin used instead of `margins.right` when a colour scale is drawn.
    pub z_axis_right_margin: f64,
    /// Distance of the y title from the frame, in title heights.
    pub y_title_offset: f64,
}

impl Default for CanvasPreset {
    fn default() -> Self {
        CanvasPresets::default().rectangular
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasPresets {
    pub square: CanvasPreset,
    pub rectangular: CanvasPreset,
}

impl Default for CanvasPresets {
    fn default() -> Self {
        Self {
            square: CanvasPreset {
                width: 600.0,
                height: 600.0,
                margins: Margins { left: 0.13, right: 0.05, top: 0.07, bottom: 0.12 },
                z_axis_right_margin: 0.17,
                y_title_offset: 1.4,
            },
            rectangular: CanvasPreset {
                width: 800.0,
                height: 600.0,
                margins: Margins { left: 0.12, right: 0.04, top: 0.07, bottom: 0.12 },
                z_axis_right_margin: 0.15,
                y_title_offset: 1.2,
            },
        }
    }
}

/// Axis font sizes as fractions of the canvas height.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub title_size: f64,
    pub label_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { title_size: 0.045, label_size: 0.038 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Major tick length, fraction of the smaller canvas dimension.
    pub tick_length: f64,
    pub minor_tick_length: f64,
    pub x_divisions: usize,
    pub y_divisions: usize,
    pub ratio_y_divisions: usize,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_length: 0.03,
            minor_tick_length: 0.015,
            x_divisions: 7,
            y_divisions: 6,
            ratio_y_divisions: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub stack: Vec<Color>,
    pub data: Color,
    pub frame: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { stack: color::palette_colors("petroff6"), data: Color::BLACK, frame: Color::BLACK }
    }
}

impl ColorsConfig {
    /// Fill colour for the `i`-th stack entry, cycling through the palette.
    pub fn stack_color(&self, i: usize) -> Color {
        if self.stack.is_empty() {
            return Color::hex("#888888");
        }
        self.stack[i % self.stack.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette2dConfig {
    pub default: PaletteId,
    pub alternative: PaletteId,
    pub opacity: f64,
}

impl Default for Palette2dConfig {
    fn default() -> Self {
        Self { default: PaletteId::Viridis, alternative: PaletteId::CmsAlternative, opacity: 1.0 }
    }
}

/// Resolve a StyleConfig from optional YAML string.
/// Priority: user YAML overrides → house defaults.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<StyleConfig> {
    match user_yaml {
        None => Ok(StyleConfig::default()),
        Some(yaml) => {
            let config: StyleConfig = serde_yaml_ng::from_str(yaml)
                .map_err(|e| crate::RenderError::Config(e.to_string()))?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lumi_text_variants() {
        let mut e = ExperimentConfig::default();
        assert_eq!(e.lumi_text(), "138 fb^{-1} (13 TeV)");
        e.energy.clear();
        assert_eq!(e.lumi_text(), "138 fb^{-1}");
        e.lumi.clear();
        assert_eq!(e.lumi_text(), "");
    }

    #[test]
    fn yaml_overrides_only_given_fields() {
        let cfg = resolve_config(Some(
            "experiment:\n  extra_text: Simulation Preliminary\npalette_2d:\n  default: bird\n",
        ))
        .unwrap();
        assert_eq!(cfg.experiment.extra_text, "Simulation Preliminary");
        assert_eq!(cfg.experiment.cms_text, "CMS");
        assert_eq!(cfg.palette_2d.default, PaletteId::Bird);
        assert_eq!(cfg.canvas, CanvasPresets::default());
    }

    #[test]
    fn yaml_unknown_palette_is_config_error() {
        let err = resolve_config(Some("palette_2d:\n  default: rainbow\n")).unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }

    #[test]
    fn mutators() {
        let mut cfg = StyleConfig::default();
        cfg.set_lumi("59.8");
        cfg.set_energy("13.6");
        cfg.set_extra_text("Simulation");
        assert_eq!(cfg.experiment.lumi_text(), "59.8 fb^{-1} (13.6 TeV)");
        assert_eq!(cfg.experiment.extra_text, "Simulation");
        assert_eq!(cfg.preset(true).width, 600.0);
        assert_eq!(cfg.preset(false).width, 800.0);
    }

    #[test]
    fn stack_colors_cycle() {
        let c = ColorsConfig::default();
        assert_eq!(c.stack_color(0), c.stack_color(6));
    }
}
