//! Export of finished canvases. The file extension selects the format.

#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "png")]
pub mod png;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Render, RenderError};

/// Resolution used for raster output.
pub const PNG_DPI: u32 = 144;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    Pdf,
    Png,
}

impl Format {
    /// Format for `path`, checked against the enabled backends.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Ok(Format::Svg),
            #[cfg(feature = "pdf")]
            "pdf" => Ok(Format::Pdf),
            #[cfg(not(feature = "pdf"))]
            "pdf" => Err(RenderError::UnsupportedFormat("pdf (built without the `pdf` feature)".into())),
            #[cfg(feature = "png")]
            "png" => Ok(Format::Png),
            #[cfg(not(feature = "png"))]
            "png" => Err(RenderError::UnsupportedFormat("png (built without the `png` feature)".into())),
            "" => Err(RenderError::UnsupportedFormat(format!("no extension on {}", path.display()))),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serialize `item` without touching the filesystem.
pub fn render_to_bytes(item: &impl Render, format: Format) -> crate::Result<Vec<u8>> {
    let svg = item.to_svg();
    match format {
        Format::Svg => Ok(svg.into_bytes()),
        #[cfg(feature = "pdf")]
        Format::Pdf => pdf::svg_to_pdf(&svg),
        #[cfg(feature = "png")]
        Format::Png => png::svg_to_png(&svg, PNG_DPI),
        #[allow(unreachable_patterns)]
        other => Err(RenderError::UnsupportedFormat(format!("{other:?}"))),
    }
}

/// Write `item` to `path`.
///
/// The document is written to a temporary file next to `path` and renamed
/// into place, so a failed export never leaves a partial file behind.
pub fn save(item: &impl Render, path: &Path) -> crate::Result<()> {
    let format = Format::from_path(path)?;
    let bytes = render_to_bytes(item, format)?;
    write_atomic(path, &bytes)?;
    log::debug!("saved '{}' to {} ({} bytes)", item.name(), path.display(), bytes.len());
    Ok(())
}

/// Apply the overlay fix, then [`save`].
pub fn save_canvas(item: &mut impl Render, path: &Path) -> crate::Result<()> {
    item.fix_overlay();
    save(item, path)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> crate::Result<()> {
    let io_err = |source: std::io::Error| RenderError::ExportIo { path: path.to_path_buf(), source };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.svg")).unwrap(), Format::Svg);
        assert_eq!(Format::from_path(Path::new("B.SVG")).unwrap(), Format::Svg);
        assert!(matches!(Format::from_path(Path::new("x.gif")), Err(RenderError::UnsupportedFormat(_))));
        assert!(matches!(Format::from_path(Path::new("x")), Err(RenderError::UnsupportedFormat(_))));
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        std::fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
