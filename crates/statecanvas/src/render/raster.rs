//! SVG rasterisation
//!
//! Parses SVG with usvg, renders it with resvg into a tiny-skia pixmap and
//! encodes PNG. System fonts are loaded so labels render when a matching
//! family is installed.

use crate::core::{DiagramError, Result};

/// Render `svg` into a `width x height` pixmap
pub fn svg_to_pixmap(svg: &str, width: u32, height: u32) -> Result<tiny_skia::Pixmap> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|e| DiagramError::svg_error(e.to_string()))?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(DiagramError::SurfaceAlloc { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Render `svg` and encode the result as PNG
pub fn svg_to_png(svg: &str, width: u32, height: u32) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, width, height)?;
    pixmap
        .encode_png()
        .map_err(|e| DiagramError::png_error(e.to_string()))
}
