//! Automaton diagram components
//!
//! [`AutomataModel`] owns the data, [`GeometryRenderer`] projects it onto a
//! surface, [`InteractionController`] turns pointer input into mutations and
//! [`ExportRenderer`] produces the downloadable image. [`Editor`] wires them
//! together around a live surface.

pub mod controller;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod model;
pub mod renderer;

pub use controller::{Drag, InteractionController};
pub use editor::{Editor, CLEAR_PROMPT};
pub use export::{
    ExportLayout, ExportRenderer, ExportSink, ExportedImage, FileSink, EXPORT_CONTENT_TYPE,
    EXPORT_FILE_NAME,
};
pub use geometry::{Bounds, CurveGeometry, EdgeGeometry, LoopGeometry};
pub use model::AutomataModel;
pub use renderer::GeometryRenderer;
