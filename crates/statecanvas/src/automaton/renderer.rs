//! Geometry renderer
//!
//! Projects an [`AutomataModel`] onto any [`Surface`]: transitions first,
//! then states in insertion order, so later states draw on top. The same
//! routines drive the live canvas and the export surface.

use tracing::trace;

use super::geometry::{self, EdgeGeometry};
use super::model::AutomataModel;
use crate::core::{
    Point, RenderConfig, State, StateId, Surface, TextAlign, TextBaseline, Transition,
};

/// Renders automaton diagrams onto a surface
#[derive(Debug, Clone, Default)]
pub struct GeometryRenderer {
    config: RenderConfig,
}

impl GeometryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Full live redraw: clear, paint the background, draw the diagram
    pub fn render<S: Surface + ?Sized>(&self, model: &AutomataModel, surface: &mut S) {
        surface.clear();
        surface.set_fill_color(&self.config.background_color);
        surface.fill_rect(0.0, 0.0, surface.width(), surface.height());
        self.draw_diagram(model, surface);
    }

    /// Draw all transitions, then all states
    pub fn draw_diagram<S: Surface + ?Sized>(&self, model: &AutomataModel, surface: &mut S) {
        trace!(
            states = model.state_count(),
            transitions = model.transition_count(),
            "Drawing diagram"
        );
        for transition in model.transitions() {
            self.draw_transition(model, transition, surface);
        }
        for state in model.states() {
            self.draw_state(state, surface);
        }
    }

    /// Top-most state whose circle contains `point`
    ///
    /// Scans in reverse insertion order so the most recently added state wins
    /// on overlap.
    pub fn state_at(&self, model: &AutomataModel, point: Point) -> Option<StateId> {
        model
            .states()
            .iter()
            .rev()
            .find(|s| s.center().distance(point) <= self.config.state_radius)
            .map(|s| s.id)
    }

    /// Geometry of a transition, or `None` if an endpoint no longer exists
    pub fn edge_geometry(
        &self,
        model: &AutomataModel,
        transition: &Transition,
    ) -> Option<EdgeGeometry> {
        let from = model.state(transition.from)?;
        let to = model.state(transition.to)?;

        if from.id == to.id {
            return Some(EdgeGeometry::Loop(geometry::self_loop(
                from.center(),
                &self.config,
            )));
        }

        let reverse_exists = model.has_transition(to.id, from.id);
        Some(EdgeGeometry::Curve(geometry::curve(
            from.center(),
            to.center(),
            reverse_exists,
            &self.config,
        )))
    }

    pub fn draw_transition<S: Surface + ?Sized>(
        &self,
        model: &AutomataModel,
        transition: &Transition,
        surface: &mut S,
    ) {
        let Some(edge) = self.edge_geometry(model, transition) else {
            trace!(id = transition.id.0, "Skipping dangling transition");
            return;
        };

        surface.save();
        surface.set_stroke_color(&self.config.edge_color);
        surface.set_fill_color(&self.config.edge_color);
        surface.set_line_width(self.config.line_width);

        match edge {
            EdgeGeometry::Loop(l) => {
                surface.begin_path();
                surface.arc(l.center, l.radius, l.start_angle, l.end_angle);
                surface.stroke();
                self.draw_arrowhead(l.arrow_tip, l.arrow_angle, surface);

                surface.set_font(&self.config.transition_font);
                surface.set_text_align(TextAlign::Center);
                surface.set_text_baseline(TextBaseline::Bottom);
                surface.fill_text(&transition.symbol, l.label);
            }
            EdgeGeometry::Curve(c) => {
                surface.begin_path();
                surface.move_to(c.start);
                surface.quadratic_curve_to(c.control, c.end);
                surface.stroke();
                self.draw_arrowhead(c.end, c.arrow_angle, surface);

                surface.set_font(&self.config.transition_font);
                surface.set_text_align(TextAlign::Center);
                surface.fill_text(&transition.symbol, c.label);
            }
        }
        surface.restore();
    }

    pub fn draw_state<S: Surface + ?Sized>(&self, state: &State, surface: &mut S) {
        let center = state.center();
        let r = self.config.state_radius;

        surface.save();
        surface.begin_path();
        surface.arc(center, r, 0.0, std::f64::consts::TAU);
        surface.set_fill_color(&self.config.state_fill_color);
        surface.fill();
        surface.set_stroke_color(&self.config.state_stroke_color);
        surface.set_line_width(self.config.line_width);
        surface.stroke();

        if state.is_final {
            surface.begin_path();
            surface.arc(center, r - self.config.final_inset, 0.0, std::f64::consts::TAU);
            surface.stroke();
        }

        surface.set_fill_color(&self.config.state_label_color);
        surface.set_font(&self.config.state_font);
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.fill_text(&state.name, center);

        if state.is_initial {
            let (from, to) = geometry::initial_arrow(center, &self.config);
            self.draw_arrow(from, to, &self.config.state_stroke_color, surface);
        }
        surface.restore();
    }

    /// Straight line with an arrowhead at `to`
    fn draw_arrow<S: Surface + ?Sized>(&self, from: Point, to: Point, color: &str, surface: &mut S) {
        let angle = (to.y - from.y).atan2(to.x - from.x);
        surface.save();
        surface.set_stroke_color(color);
        surface.set_fill_color(color);
        surface.set_line_width(self.config.line_width);
        surface.begin_path();
        surface.move_to(from);
        surface.line_to(to);
        surface.stroke();
        self.draw_arrowhead(to, angle, surface);
        surface.restore();
    }

    /// Filled triangle with its tip at `tip`, pointing along `angle`
    fn draw_arrowhead<S: Surface + ?Sized>(&self, tip: Point, angle: f64, surface: &mut S) {
        let [tip, left, right] = geometry::arrowhead(tip, angle, &self.config);
        surface.begin_path();
        surface.move_to(tip);
        surface.line_to(left);
        surface.line_to(right);
        surface.close_path();
        surface.fill();
    }
}
