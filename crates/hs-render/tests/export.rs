use std::fs;

use hs_render::output::{Format, save, save_canvas};
use hs_render::{AnnotationStack, CanvasBuilder, CanvasParams, Render, RenderError, StyleConfig};

fn canvas() -> hs_render::Canvas {
    let params = CanvasParams::new("export", (0.0, 1.0), (0.0, 1.0), "x", "y");
    CanvasBuilder::build(&params, &StyleConfig::default(), &AnnotationStack::new()).unwrap()
}

#[test]
fn writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.svg");
    let mut c = canvas();
    save_canvas(&mut c, &path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<svg"));
    assert_eq!(written, c.to_svg());
}

#[test]
fn unsupported_extension_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.gif");
    assert!(matches!(save(&canvas(), &path), Err(RenderError::UnsupportedFormat(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn failed_write_leaves_no_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    // A directory in the way of the destination makes the final rename fail.
    let path = dir.path().join("taken.svg");
    fs::create_dir(&path).unwrap();
    match save(&canvas(), &path) {
        Err(RenderError::ExportIo { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ExportIo, got {other:?}"),
    }
    assert!(path.is_dir());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    let missing = dir.path().join("no/such/dir/plot.svg");
    assert!(matches!(save(&canvas(), &missing), Err(RenderError::ExportIo { .. })));
    assert!(!missing.exists());
}

#[cfg(not(feature = "pdf"))]
#[test]
fn pdf_needs_feature() {
    assert!(matches!(
        Format::from_path(std::path::Path::new("a.pdf")),
        Err(RenderError::UnsupportedFormat(_))
    ));
}

#[cfg(feature = "pdf")]
#[test]
fn writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.pdf");
    save(&canvas(), &path).unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
}
