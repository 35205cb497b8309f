use hs_hist::Series;
use hs_render::palette::{self, PaletteId};
use hs_render::{AnnotationStack, CanvasBuilder, CanvasParams, RenderError, StyleConfig};

fn heat_series() -> Series {
    let mut s = Series::uniform_2d("h2", 5, 0.0, 5.0, 5, 0.0, 5.0).unwrap();
    s.fill_2d(2.5, 2.5, 3.0);
    s.fill_2d(1.5, 2.5, 1.0);
    s
}

#[test]
fn reposition_needs_reserved_margin() {
    let style = StyleConfig::default();
    let params = CanvasParams::new("c", (0.0, 5.0), (0.0, 5.0), "X", "Y");
    let mut c = CanvasBuilder::build(&params, &style, &AnnotationStack::new()).unwrap();
    let h = c.draw_2d(&heat_series(), "Events").unwrap();
    assert!(matches!(palette::reposition_color_scale(&mut c, h), Err(RenderError::GeometryConflict(_))));
}

#[test]
fn reposition_moves_scale_into_right_margin() {
    let style = StyleConfig::default();
    let params = CanvasParams::new("c", (0.0, 5.0), (0.0, 5.0), "X", "Y").with_z_axis(true).lumi_scale(0.8);
    let mut c = CanvasBuilder::build(&params, &style, &AnnotationStack::new()).unwrap();
    let series = heat_series();
    let h = c.draw_2d(&series, "Events normalised").unwrap();
    palette::set_alternative_2d_color(&mut c, h).unwrap();
    palette::reposition_color_scale(&mut c, h).unwrap();

    let right = 1.0 - c.pad().margins().right;
    let heat = c.pad().heatmap(h).unwrap();
    assert_eq!(heat.palette, style.palette_2d.alternative);
    assert!(heat.scale.x1 > right && heat.scale.x2 < 1.0);
    assert_eq!(heat.series, series);
}

#[test]
fn unknown_palette_name() {
    assert!(matches!("rainbow".parse::<PaletteId>(), Err(RenderError::UnknownPalette(_))));
}
