//! Export renderer
//!
//! Computes the tight bounds of the diagram, allocates an independently sized
//! padded surface, and replays the live drawing routines into it with the
//! origin shifted so the bounds' minimum corner lands at `(padding, padding)`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, span, warn, Level};

use super::geometry::{self, Bounds};
use super::model::AutomataModel;
use super::renderer::GeometryRenderer;
use crate::core::{DiagramError, Result, Surface};
use crate::render::{raster, SvgSurface};

/// File name offered for every export
pub const EXPORT_FILE_NAME: &str = "automata.png";
/// Content type that makes browsers save rather than display
pub const EXPORT_CONTENT_TYPE: &str = "image/octet-stream";

/// Size and placement of the export surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportLayout {
    pub bounds: Bounds,
    pub padding: f64,
    pub width: f64,
    pub height: f64,
}

impl ExportLayout {
    pub fn new(bounds: Bounds, padding: f64) -> Self {
        Self {
            bounds,
            padding,
            width: bounds.width() + 2.0 * padding,
            height: bounds.height() + 2.0 * padding,
        }
    }

    /// Translation applied before drawing
    pub fn origin_shift(&self) -> (f64, f64) {
        (
            self.padding - self.bounds.min_x,
            self.padding - self.bounds.min_y,
        )
    }
}

/// An encoded export ready for a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Destination for exported images
pub trait ExportSink {
    fn deliver(&mut self, image: &ExportedImage) -> Result<()>;
}

/// Sink that writes the image into a directory under its suggested name
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, oldest first
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, image: &ExportedImage) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&image.file_name);
        fs::write(&path, &image.bytes)?;
        info!(path = %path.display(), bytes = image.bytes.len(), "Wrote export");
        self.written.push(path);
        Ok(())
    }
}

/// Renders the diagram onto an offscreen surface
#[derive(Debug, Clone, Copy)]
pub struct ExportRenderer<'r> {
    renderer: &'r GeometryRenderer,
}

impl<'r> ExportRenderer<'r> {
    pub fn new(renderer: &'r GeometryRenderer) -> Self {
        Self { renderer }
    }

    /// Layout of the export, or `None` for an empty diagram
    pub fn layout(&self, model: &AutomataModel) -> Option<ExportLayout> {
        let config = self.renderer.config();
        let bounds = geometry::diagram_bounds(model.states().iter().map(|s| s.center()), config)?;
        Some(ExportLayout::new(bounds, config.export_padding))
    }

    /// Draw the diagram onto a surface produced by `allocate`
    ///
    /// `allocate` is not called for an empty diagram, which reports
    /// [`DiagramError::EmptyDiagram`].
    pub fn export_with<S, F>(&self, model: &AutomataModel, allocate: F) -> Result<S>
    where
        S: Surface,
        F: FnOnce(&ExportLayout) -> Result<S>,
    {
        let export_span = span!(Level::INFO, "export", states = model.state_count());
        let _enter = export_span.enter();

        let Some(layout) = self.layout(model) else {
            warn!("Export requested with no states");
            return Err(DiagramError::EmptyDiagram);
        };

        let mut surface = allocate(&layout)?;
        surface.set_fill_color(&self.renderer.config().export_background_color);
        surface.fill_rect(0.0, 0.0, layout.width, layout.height);

        let (dx, dy) = layout.origin_shift();
        surface.save();
        surface.translate(dx, dy);
        self.renderer.draw_diagram(model, &mut surface);
        surface.restore();

        info!(width = layout.width, height = layout.height, "Rendered export surface");
        Ok(surface)
    }

    /// Export as SVG markup
    pub fn export_svg(&self, model: &AutomataModel) -> Result<SvgSurface> {
        self.export_with(model, |layout| {
            Ok(SvgSurface::new(layout.width, layout.height))
        })
    }

    /// Export as a PNG image named [`EXPORT_FILE_NAME`]
    pub fn export_png(&self, model: &AutomataModel) -> Result<ExportedImage> {
        let surface = self.export_svg(model)?;
        let (width, height) = surface.pixel_size();
        let bytes = raster::svg_to_png(&surface.to_svg(), width, height)?;
        Ok(ExportedImage {
            file_name: EXPORT_FILE_NAME.to_string(),
            content_type: EXPORT_CONTENT_TYPE.to_string(),
            width,
            height,
            bytes,
        })
    }

    /// Export as PNG and hand the result to `sink`
    pub fn export_to(&self, model: &AutomataModel, sink: &mut dyn ExportSink) -> Result<()> {
        let image = self.export_png(model)?;
        sink.deliver(&image)
    }
}
