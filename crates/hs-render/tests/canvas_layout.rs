use std::rc::Rc;

use hs_render::{
    AnnotationStack, CanvasBuilder, CanvasParams, DiCanvasLayout, DiCanvasParams, Legend, LegendMarker,
    PadIndex, Render, RenderError, StyleConfig,
};

fn ratio_params() -> DiCanvasParams {
    DiCanvasParams::new("ratio", (10.0, 90.0), (0.0, 0.2), (0.0, 2.0), ("X", "A.U.", "Data/Pred."))
        .extra_space(0.1)
}

#[test]
fn identical_builds_are_identical() {
    let style = StyleConfig::default();
    let mut notes = AnnotationStack::new();
    notes.append("#mu channel");
    let params = CanvasParams::new("c", (0.0, 90.0), (1e-3, 2.0), "X", "A.U.").extra_space(0.01);

    let a = CanvasBuilder::build(&params, &style, &notes).unwrap();
    let b = CanvasBuilder::build(&params, &style, &notes).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_svg(), b.to_svg());

    let d1 = DiCanvasLayout::build(&ratio_params(), &style, &notes).unwrap();
    let d2 = DiCanvasLayout::build(&ratio_params(), &style, &notes).unwrap();
    assert_eq!(d1.main().geometry(), d2.main().geometry());
    assert_eq!(d1.ratio().geometry(), d2.ratio().geometry());
    assert_eq!(d1.to_svg(), d2.to_svg());
}

#[test]
fn ranges_are_validated() {
    let style = StyleConfig::default();
    let notes = AnnotationStack::new();
    let params = CanvasParams::new("c", (50.0, 10.0), (0.0, 1.0), "X", "Y");
    assert!(matches!(CanvasBuilder::build(&params, &style, &notes), Err(RenderError::InvalidRange(_))));

    let params = ratio_params().ratio_height_frac(1.2);
    assert!(matches!(DiCanvasLayout::build(&params, &style, &notes), Err(RenderError::GeometryConflict(_))));

    let mut params = ratio_params();
    params.y_range_ratio = (2.0, 0.0);
    assert!(matches!(DiCanvasLayout::build(&params, &style, &notes), Err(RenderError::InvalidRange(_))));
}

#[test]
fn shared_axis_follows_mutation() {
    let mut d = DiCanvasLayout::build(&ratio_params(), &StyleConfig::default(), &AnnotationStack::new()).unwrap();
    assert!(Rc::ptr_eq(&d.main().x_axis(), &d.ratio().x_axis()));
    assert_eq!(d.main().x_range(), d.ratio().x_range());

    d.cd(2).unwrap().x_axis().borrow_mut().set_range(0.0, 50.0).unwrap();
    assert_eq!(d.main().x_range(), (0.0, 50.0));
    d.shared_x_axis().borrow_mut().set_log(true).unwrap_err();
    assert!(!d.main().x_axis().borrow().is_log());
}

#[test]
fn overlay_fix_twice_equals_once() {
    let mut d = DiCanvasLayout::build(&ratio_params(), &StyleConfig::default(), &AnnotationStack::new()).unwrap();
    d.fix_overlay();
    let once = d.to_svg();
    d.fix_overlay();
    assert_eq!(once, d.to_svg());
    assert!(!d.pad(PadIndex::Main).x_labels_visible());
    assert!(d.pad(PadIndex::Ratio).x_labels_visible());
}

#[test]
fn cursors_are_per_canvas() {
    let style = StyleConfig::default();
    let notes = AnnotationStack::new();
    let mut a = DiCanvasLayout::build(&ratio_params(), &style, &notes).unwrap();
    let b = DiCanvasLayout::build(&ratio_params(), &style, &notes).unwrap();
    a.cd(2).unwrap();
    assert_eq!(a.current(), PadIndex::Ratio);
    assert_eq!(b.current(), PadIndex::Main);
}

#[test]
fn legend_columns_for_five_entries() {
    let mut leg = Legend::create(0.5, 0.5, 0.9, 0.9, 0.04, 2, None).unwrap();
    for i in 0..5 {
        leg.add_entry(&format!("s{i}"), format!("entry {i}"), LegendMarker::LINE);
    }
    let cells = leg.cells();
    let column = |c: usize| cells.iter().filter(|x| x.column == c).map(|x| x.entry).collect::<Vec<_>>();
    assert_eq!(column(0), vec![0, 1, 2]);
    assert_eq!(column(1), vec![3, 4]);
}
