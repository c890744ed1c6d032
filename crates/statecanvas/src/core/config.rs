//! Rendering and editor configuration
//!
//! There is no configuration file: hosts build these structs directly (the
//! CLI maps its flags onto them). Defaults are the reference look of the
//! editor.

use std::f64::consts::PI;

/// Geometry constants, palette and fonts shared by live and export rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Radius of a state circle
    pub state_radius: f64,
    /// Inset of the inner circle drawn for final states
    pub final_inset: f64,
    /// Length of the straight arrow marking the initial state
    pub initial_arrow_length: f64,
    /// Perpendicular displacement of a curve's control point when the
    /// reverse transition exists
    pub control_offset: f64,
    /// Perpendicular displacement of a curve label from its control point
    pub label_offset: f64,
    /// Length of the two back edges of an arrowhead
    pub arrowhead_length: f64,
    /// Half-angle of an arrowhead, in radians
    pub arrowhead_spread: f64,
    /// Gap between the top of a self-loop and its label
    pub loop_label_gap: f64,
    /// Overhang allowance around each state when computing export bounds
    pub export_margin: f64,
    /// Padding around the export bounding box
    pub export_padding: f64,
    pub line_width: f64,
    pub background_color: String,
    pub export_background_color: String,
    pub edge_color: String,
    pub state_stroke_color: String,
    pub state_fill_color: String,
    pub state_label_color: String,
    pub state_font: String,
    pub transition_font: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            state_radius: 30.0,
            final_inset: 6.0,
            initial_arrow_length: 30.0,
            control_offset: 30.0,
            label_offset: 15.0,
            arrowhead_length: 10.0,
            arrowhead_spread: PI / 6.0,
            loop_label_gap: 4.0,
            export_margin: 40.0,
            export_padding: 20.0,
            line_width: 2.0,
            background_color: "#f9fafb".to_string(),
            export_background_color: "#ffffff".to_string(),
            edge_color: "#374151".to_string(),
            state_stroke_color: "#4b5563".to_string(),
            state_fill_color: "white".to_string(),
            state_label_color: "#1f2937".to_string(),
            state_font: "16px Inter".to_string(),
            transition_font: "14px Inter".to_string(),
        }
    }
}

impl RenderConfig {
    /// Default config with a different state radius
    pub fn with_radius(state_radius: f64) -> Self {
        Self {
            state_radius,
            ..Self::default()
        }
    }

    /// Radius of a self-loop arc
    pub fn loop_radius(&self) -> f64 {
        self.state_radius / 2.0
    }
}

/// Behaviour switches for the interaction controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorOptions {
    /// Ask for a name whenever a state is created
    pub custom_names: bool,
    /// A state created into an empty diagram becomes the initial state
    pub mark_first_initial: bool,
}
