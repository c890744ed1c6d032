//! Core abstractions shared by the editor components
//!
//! Types and identifiers, rendering configuration, the drawing-surface and
//! text-prompt collaborators, errors and logging.

mod config;
mod error;
pub mod logging;
mod prompt;
mod surface;
mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use prompt::*;
pub use surface::*;
pub use types::*;
