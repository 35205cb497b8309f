use approx::assert_relative_eq;
use hs_hist::Series;
use hs_render::{
    AnnotationStack, CanvasBuilder, CanvasParams, DiCanvasLayout, DiCanvasParams, DrawOptions, Legend,
    LegendMarker, PadItem, Render, Stack, StyleConfig,
};

fn toy(name: &str, values: &[f64]) -> Series {
    Series::from_values(name, vec![0.0, 1.0, 2.0, 3.0], values.to_vec()).unwrap()
}

#[test]
fn raw_toy_ratios() {
    let bkg = toy("bkg", &[1.0, 2.0, 1.0]);
    let signal = toy("signal", &[0.0, 1.0, 0.0]);
    let data = toy("data", &[1.0, 3.0, 1.0]);
    let bkg_tot = bkg.added(&signal, "bkg_tot").unwrap();

    let ratio = data.divided(&bkg_tot, "ratio").unwrap();
    let ratio_nosignal = data.divided(&bkg, "ratio_nosignal").unwrap();
    assert_eq!(ratio.values(), &[1.0, 1.0, 1.0]);
    assert_eq!(ratio_nosignal.values(), &[1.0, 1.5, 1.0]);
}

#[test]
fn normalised_toy_end_to_end() {
    let mut bkg = toy("bkg", &[1.0, 2.0, 1.0]);
    let mut signal = toy("signal", &[0.0, 1.0, 0.0]);
    let mut data = toy("data", &[1.0, 3.0, 1.0]);
    bkg.scale(1.0 / bkg.integral());
    signal.scale(0.1 / signal.integral());
    let bkg_tot = bkg.added(&signal, "bkg_tot").unwrap();
    data.scale(bkg_tot.integral() / data.integral());
    assert_relative_eq!(data.integral(), bkg_tot.integral(), epsilon = 1e-12);

    let ratio = data.divided(&bkg_tot, "ratio").unwrap();
    let ratio_nosignal = data.divided(&bkg, "ratio_nosignal").unwrap();

    let style = StyleConfig::default();
    let notes = AnnotationStack::new();

    let params = CanvasParams::new("single", (0.0, 3.0), (1e-3, 2.0), "X", "A.U.").extra_space(0.01);
    let mut single = CanvasBuilder::build(&params, &style, &notes).unwrap();
    single.set_log_y(true).unwrap();
    let mut leg = Legend::create(0.6, 0.73, 0.89, 0.89, 0.04, 1, None).unwrap();
    leg.add_entry("data", "Data", "lp".parse().unwrap());
    let mut stack = Stack::new("bkg_stack");
    stack.push("Background", bkg.clone());
    stack.push("Signal", signal.clone());
    stack.draw(single.pad_mut(), &mut leg).unwrap();
    single.draw(&data, DrawOptions::points()).unwrap();
    single.add_legend(leg);
    assert!(single.to_svg().contains("Background"));

    let params =
        DiCanvasParams::new("ratio", (0.0, 3.0), (0.0, 1.0), (0.0, 2.0), ("X", "A.U.", "Data/Pred.")).extra_space(0.1);
    let mut dican = DiCanvasLayout::build(&params, &style, &notes).unwrap();
    let ratio_pad = dican.cd(2).unwrap();
    ratio_pad.draw(&ratio_nosignal, DrawOptions::from_pairs(&[("style", "hist"), ("lwidth", "2"), ("fstyle", "0")]).unwrap()).unwrap();
    ratio_pad.draw(&ratio, DrawOptions::points()).unwrap();
    let mut leg = Legend::create(0.67, 0.72, 0.85, 0.97, 0.05, 2, None).unwrap();
    leg.add_entry("ratio", "Bkg", LegendMarker::POINTS);
    leg.add_entry("ratio_nosignal", "Bkg+Signal", LegendMarker::LINE);
    ratio_pad.add_legend(leg);
    ratio_pad.draw_line(0.0, 1.0, 3.0, 1.0, DrawOptions::line());
    dican.fix_overlay();

    let drawn: Vec<&Series> = dican
        .ratio()
        .items()
        .iter()
        .filter_map(|item| match item {
            PadItem::Series { series, .. } => Some(series),
            _ => None,
        })
        .collect();
    assert_eq!(drawn.len(), 2);
    for bin in 0..3 {
        let d = data.values()[bin];
        assert_relative_eq!(drawn[1].values()[bin], d / bkg_tot.values()[bin], epsilon = 1e-12);
        assert_relative_eq!(drawn[0].values()[bin], d / bkg.values()[bin], epsilon = 1e-12);
    }
    assert!(!dican.main().x_labels_visible());
}
