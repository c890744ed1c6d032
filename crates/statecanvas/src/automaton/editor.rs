//! Editor façade
//!
//! Bundles the model, the controller, the renderer and a live surface.
//! The model is only ever mutated through here or through the controller,
//! and the live surface is redrawn from scratch after every change.

use tracing::debug;

use super::controller::InteractionController;
use super::export::{ExportRenderer, ExportSink, ExportedImage};
use super::model::AutomataModel;
use super::renderer::GeometryRenderer;
use crate::core::{Cursor, EditorOptions, Mode, PointerEvent, RenderConfig, Result, Surface, TextPrompt};
use crate::render::SvgSurface;

pub const CLEAR_PROMPT: &str = "Clear the whole diagram?";

/// Interactive automaton editor drawing onto `S`
#[derive(Debug)]
pub struct Editor<S: Surface> {
    model: AutomataModel,
    controller: InteractionController,
    renderer: GeometryRenderer,
    surface: S,
}

impl<S: Surface> Editor<S> {
    /// Editor with the reference look and default options
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, RenderConfig::default(), EditorOptions::default())
    }

    pub fn with_config(surface: S, config: RenderConfig, options: EditorOptions) -> Self {
        let mut editor = Self {
            model: AutomataModel::new(),
            controller: InteractionController::with_options(options),
            renderer: GeometryRenderer::with_config(config),
            surface,
        };
        editor.redraw();
        editor
    }

    pub fn model(&self) -> &AutomataModel {
        &self.model
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn renderer(&self) -> &GeometryRenderer {
        &self.renderer
    }

    /// The live surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
    }

    pub fn set_custom_names(&mut self, enabled: bool) {
        self.controller.set_custom_names(enabled);
    }

    pub fn cursor(&self) -> Cursor {
        self.controller.cursor()
    }

    /// Feed a pointer event; returns true if the surface was redrawn
    pub fn pointer(&mut self, event: PointerEvent, prompt: &mut dyn TextPrompt) -> bool {
        let changed = self
            .controller
            .handle(&mut self.model, &self.renderer, event, prompt);
        if changed {
            self.redraw();
        }
        changed
    }

    /// Clear the diagram after confirmation; returns true if cleared
    pub fn clear(&mut self, prompt: &mut dyn TextPrompt) -> bool {
        if !prompt.confirm(CLEAR_PROMPT) {
            debug!("Clear declined");
            return false;
        }
        self.model.clear();
        self.controller.reset_transient();
        self.redraw();
        true
    }

    /// Re-render the whole diagram onto the live surface
    pub fn redraw(&mut self) {
        self.renderer.render(&self.model, &mut self.surface);
    }

    pub fn exporter(&self) -> ExportRenderer<'_> {
        ExportRenderer::new(&self.renderer)
    }

    /// Export the diagram as PNG
    pub fn export_png(&self) -> Result<ExportedImage> {
        self.exporter().export_png(&self.model)
    }

    /// Export the diagram as an SVG document
    pub fn export_svg(&self) -> Result<String> {
        Ok(self.exporter().export_svg(&self.model)?.to_svg())
    }

    /// Export as PNG into `sink`
    pub fn export_to(&self, sink: &mut dyn ExportSink) -> Result<()> {
        self.exporter().export_to(&self.model, sink)
    }
}

impl Editor<SvgSurface> {
    /// Editor whose live surface is an SVG document of the given size
    pub fn svg(width: f64, height: f64) -> Self {
        Self::new(SvgSurface::new(width, height))
    }
}
