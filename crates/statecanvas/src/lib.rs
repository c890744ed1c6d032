//! Statecanvas - an interactive editor core for finite-state diagrams
//!
//! Place states, connect them with labeled transitions, mark initial and
//! final states, drag nodes around and export the diagram as a PNG. The
//! host supplies a drawing surface, pointer coordinates and a text prompt;
//! everything else lives here.
//!
//! # Quick Start
//!
//! ```rust
//! use statecanvas::prelude::*;
//!
//! let mut editor = Editor::new(RecordingSurface::new(800.0, 600.0));
//! let mut prompt = ScriptedPrompt::new().answer("a");
//!
//! editor.set_mode(Mode::AddState);
//! editor.pointer(PointerEvent::Press(Point::new(100.0, 100.0)), &mut prompt);
//! editor.pointer(PointerEvent::Press(Point::new(250.0, 100.0)), &mut prompt);
//!
//! editor.set_mode(Mode::AddTransition);
//! editor.pointer(PointerEvent::Press(Point::new(100.0, 100.0)), &mut prompt);
//! editor.pointer(PointerEvent::Press(Point::new(250.0, 100.0)), &mut prompt);
//!
//! assert_eq!(editor.model().transition_count(), 1);
//! ```
//!
//! # Headless Rendering
//!
//! ```rust
//! use statecanvas::prelude::*;
//!
//! let mut model = AutomataModel::new();
//! let q0 = model.add_state(Point::new(50.0, 50.0), None).id;
//! model.set_initial(q0);
//! model.add_transition(q0, q0, "a");
//!
//! let renderer = GeometryRenderer::new();
//! let svg = ExportRenderer::new(&renderer).export_svg(&model).unwrap();
//! assert_eq!(svg.pixel_size(), (180, 180));
//! ```

pub mod automaton;
pub mod core;
pub mod render;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::automaton::{
        AutomataModel, Editor, ExportRenderer, ExportSink, ExportedImage, FileSink,
        GeometryRenderer, InteractionController,
    };
    pub use crate::core::{
        CallbackPrompt, Cursor, DeclinePrompt, DiagramError, EditorOptions, Mode, Point, PointerEvent,
        RecordingSurface, RenderConfig, ScriptedPrompt, State, StateId, Surface, TextPrompt,
        Transition, TransitionId,
    };
    pub use crate::render::SvgSurface;
}

/// Export a model as PNG with the reference look
///
/// # Example
/// ```rust
/// use statecanvas::{export_png, automaton::AutomataModel, Point};
///
/// let empty = AutomataModel::new();
/// assert!(export_png(&empty).unwrap_err().is_empty_diagram());
///
/// let mut model = AutomataModel::new();
/// model.add_state(Point::new(0.0, 0.0), None);
/// let image = export_png(&model).unwrap();
/// assert_eq!(image.file_name, "automata.png");
/// ```
pub fn export_png(model: &automaton::AutomataModel) -> Result<automaton::ExportedImage> {
    let renderer = automaton::GeometryRenderer::new();
    automaton::ExportRenderer::new(&renderer).export_png(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomataModel;

    #[test]
    fn test_export_png_empty() {
        let result = export_png(&AutomataModel::new());
        assert!(matches!(result, Err(DiagramError::EmptyDiagram)));
    }

    #[test]
    fn test_export_png_dimensions() {
        let mut model = AutomataModel::new();
        model.add_state(Point::new(50.0, 50.0), None);
        let image = export_png(&model).unwrap();
        assert_eq!((image.width, image.height), (180, 180));
        assert_eq!(image.content_type, "image/octet-stream");
    }
}
