//! The demo plot set: single and ratio canvases in both presets and both
//! header positions, plus 2D heat maps.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hs_render::color::Color;
use hs_render::output::save_canvas;
use hs_render::palette;
use hs_render::{
    AnnotationStack, CanvasBuilder, CanvasParams, DiCanvasLayout, DiCanvasParams, DrawOptions, Legend,
    LegendMarker, LineDash, Stack, StyleConfig,
};

use crate::toy::ToySamples;

pub struct Demo<'a> {
    out_dir: &'a Path,
    extension: &'a str,
    style: StyleConfig,
    notes: AnnotationStack,
    toys: &'a ToySamples,
}

impl<'a> Demo<'a> {
    pub fn new(out_dir: &'a Path, extension: &'a str, style: StyleConfig, toys: &'a ToySamples) -> Self {
        Self { out_dir, extension, style, notes: AnnotationStack::new(), toys }
    }

    /// Write every demo plot and return the written paths in order.
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (square, position) in [(true, 0), (false, 0), (true, 11), (false, 11)] {
            written.extend(self.plot(square, position)?);
        }
        for square in [true, false] {
            written.push(self.plot_2d(square, 0)?);
        }
        Ok(written)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.out_dir.join(format!("{name}.{}", self.extension))
    }

    fn stack(&self) -> Stack {
        let mut stack = Stack::new("stack");
        stack.push("Background", self.toys.bkg.clone());
        stack.push("Signal", self.toys.signal.clone());
        stack
    }

    fn data_options() -> DrawOptions {
        DrawOptions::points().with_marker_color(Color::BLACK)
    }

    fn plot(&mut self, square: bool, position: i32) -> Result<[PathBuf; 2]> {
        let name = format!("example_{}_pos{position}", if square { "square" } else { "rectangle" });
        self.notes.reset();
        self.notes.append("Signal region");
        self.notes.append("#mu-channel");

        let params = CanvasParams::new(name.as_str(), (0.0, 90.0), (1e-3, 2.0), "X", "A.U.")
            .square(square)
            .extra_space(0.01)
            .position(position);
        let mut canv = CanvasBuilder::build(&params, &self.style, &self.notes)?;
        canv.set_log_y(true)?;
        let mut leg = Legend::create(0.60, 0.89 - 0.04 * 4.0, 0.89, 0.89, 0.04, 1, None)?;
        leg.add_entry(self.toys.data.name(), "Data", "lp".parse::<LegendMarker>()?);
        self.stack().draw(canv.pad_mut(), &mut leg)?;
        canv.draw(&self.toys.data, Self::data_options())?;
        canv.add_legend(leg);
        let single = self.path(&name);
        save_canvas(&mut canv, &single).with_context(|| format!("saving {}", single.display()))?;

        let name = format!("{name}_ratio");
        let params = DiCanvasParams::new(name.as_str(), (10.0, 90.0), (0.0, 0.2), (0.0, 2.0), ("X", "A.U.", "Data/Pred."))
            .square(square)
            .extra_space(0.1)
            .position(position);
        let mut dicanv = DiCanvasLayout::build(&params, &self.style, &self.notes)?;

        let main = dicanv.cd(1)?;
        let mut leg = Legend::create(0.60, 0.89 - 0.05 * 5.0, 0.89, 0.89, 0.05, 1, None)?;
        leg.add_entry(self.toys.data.name(), "Data", LegendMarker::POINTS);
        leg.set_header("With title", Some(0.05));
        self.stack().draw(main, &mut leg)?;
        main.draw(&self.toys.data, Self::data_options())?;
        main.add_legend(leg);

        let ratio = dicanv.cd(2)?;
        let band = DrawOptions::from_pairs(&[("style", "hist"), ("lcolor", "azure+2"), ("lwidth", "2"), ("fstyle", "0")])?;
        ratio.draw(&self.toys.ratio_nosignal, band)?;
        ratio.draw(&self.toys.ratio, Self::data_options())?;
        let mut leg = Legend::create(0.67, 0.97 - 0.05 * 5.0, 0.85, 0.97, 0.05, 2, None)?;
        leg.add_entry(self.toys.ratio.name(), "Bkg", LegendMarker::POINTS);
        leg.add_entry(self.toys.ratio_nosignal.name(), "Bkg+Signal", LegendMarker::LINE);
        ratio.add_legend(leg);
        ratio.draw_line(
            10.0,
            1.0,
            90.0,
            1.0,
            DrawOptions::line().with_line_color(Color::BLACK).with_line_dash(LineDash::Dotted),
        );
        let double = self.path(&name);
        save_canvas(&mut dicanv, &double).with_context(|| format!("saving {}", double.display()))?;

        tracing::info!(single = %single.display(), ratio = %double.display(), "wrote comparison plots");
        Ok([single, double])
    }

    fn plot_2d(&mut self, square: bool, position: i32) -> Result<PathBuf> {
        let name = format!("example_2D_{}_pos{position}", if square { "square" } else { "rectangle" });
        self.notes.reset();
        let params = CanvasParams::new(name.as_str(), (0.0, 5.0), (0.0, 5.0), "X", "Y")
            .square(square)
            .extra_space(0.01)
            .position(position)
            .with_z_axis(true)
            .lumi_scale(if square { 0.8 } else { 1.0 });
        let mut canv = CanvasBuilder::build(&params, &self.style, &self.notes)?;
        let heat = canv.draw_2d(&self.toys.hist2d, "Events normalised")?;
        palette::set_alternative_2d_color(&mut canv, heat)?;
        palette::reposition_color_scale(&mut canv, heat)?;

        let path = self.path(&name);
        save_canvas(&mut canv, &path).with_context(|| format!("saving {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote heat map");
        Ok(path)
    }
}
