//! Core error types for diagram editing and export
//!
//! Editing operations on unknown ids are no-ops, not errors. What remains
//! here is the export path and host-facing input handling.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Nothing to export! Add some states first.")]
    EmptyDiagram,

    #[error("Failed to allocate a {width}x{height} surface")]
    SurfaceAlloc { width: u32, height: u32 },

    #[error("SVG error: {message}")]
    SvgParse { message: String },

    #[error("PNG encoding failed: {message}")]
    PngEncode { message: String },

    #[error("Unknown mode: {mode}")]
    InvalidMode { mode: String },

    #[error("Script error: {message}")]
    Script { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new SVG parse error
    pub fn svg_error(message: impl Into<String>) -> Self {
        Self::SvgParse {
            message: message.into(),
        }
    }

    /// Create a new PNG encoding error
    pub fn png_error(message: impl Into<String>) -> Self {
        Self::PngEncode {
            message: message.into(),
        }
    }

    /// Create a new script error
    pub fn script_error(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }

    /// Returns true for the empty-diagram export condition
    pub fn is_empty_diagram(&self) -> bool {
        matches!(self, Self::EmptyDiagram)
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DiagramError>;
