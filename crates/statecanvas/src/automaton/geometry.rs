//! Pure geometry for automaton diagrams
//!
//! Everything here is a function of positions and [`RenderConfig`]; the
//! renderer turns the results into surface calls.

use std::f64::consts::PI;

use crate::core::{Point, RenderConfig};

/// Sweep of a self-loop arc, open at the bottom towards the state
pub const LOOP_START_ANGLE: f64 = 0.6 * PI;
pub const LOOP_END_ANGLE: f64 = 2.4 * PI;
/// Arc angle at which the self-loop arrowhead sits
pub const LOOP_ARROW_ANGLE: f64 = 0.4 * PI;

/// Quadratic curve between two distinct states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveGeometry {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    /// Arrowhead orientation, control point towards end point
    pub arrow_angle: f64,
    pub label: Point,
}

/// Arc above a state for a self-transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopGeometry {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub arrow_tip: Point,
    pub arrow_angle: f64,
    /// Bottom-center anchor of the label
    pub label: Point,
}

/// Drawing geometry of a single transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeGeometry {
    Loop(LoopGeometry),
    Curve(CurveGeometry),
}

/// Curve from the boundary of `from` to the boundary of `to`
///
/// The control point sits on the chord midpoint unless the reverse
/// transition exists, in which case it is pushed `control_offset` along the
/// perpendicular `(sin a, -cos a)`. The label is pushed a further
/// `label_offset` along the same perpendicular.
pub fn curve(from: Point, to: Point, reverse_exists: bool, config: &RenderConfig) -> CurveGeometry {
    let r = config.state_radius;
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let (sin, cos) = angle.sin_cos();

    let start = from.offset(r * cos, r * sin);
    let end = to.offset(-r * cos, -r * sin);

    let mut control = start.midpoint(end);
    if reverse_exists {
        control = control.offset(config.control_offset * sin, -config.control_offset * cos);
    }

    let arrow_angle = (end.y - control.y).atan2(end.x - control.x);
    let label = control.offset(config.label_offset * sin, -config.label_offset * cos);

    CurveGeometry {
        start,
        control,
        end,
        arrow_angle,
        label,
    }
}

/// Self-loop arc for a state centered at `state`
pub fn self_loop(state: Point, config: &RenderConfig) -> LoopGeometry {
    let radius = config.loop_radius();
    let center = state.offset(0.0, -(config.state_radius + radius));
    let arrow_tip = center.offset(
        radius * LOOP_ARROW_ANGLE.cos(),
        radius * LOOP_ARROW_ANGLE.sin(),
    );

    LoopGeometry {
        center,
        radius,
        start_angle: LOOP_START_ANGLE,
        end_angle: LOOP_END_ANGLE,
        arrow_tip,
        // Tangent of a clockwise sweep
        arrow_angle: LOOP_ARROW_ANGLE + PI / 2.0,
        label: center.offset(0.0, -(radius + config.loop_label_gap)),
    }
}

/// Triangle `[tip, back_left, back_right]` for an arrowhead at `tip`
pub fn arrowhead(tip: Point, angle: f64, config: &RenderConfig) -> [Point; 3] {
    let len = config.arrowhead_length;
    let spread = config.arrowhead_spread;
    [
        tip,
        tip.offset(-len * (angle - spread).cos(), -len * (angle - spread).sin()),
        tip.offset(-len * (angle + spread).cos(), -len * (angle + spread).sin()),
    ]
}

/// Start and end of the initial-state arrow, approaching from the left
pub fn initial_arrow(state: Point, config: &RenderConfig) -> (Point, Point) {
    let r = config.state_radius;
    (
        state.offset(-r - config.initial_arrow_length, 0.0),
        state.offset(-r, 0.0),
    )
}

/// Axis-aligned box in surface space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Box of half-size `extent` around `center`
    pub fn around(center: Point, extent: f64) -> Self {
        Self {
            min_x: center.x - extent,
            min_y: center.y - extent,
            max_x: center.x + extent,
            max_y: center.y + extent,
        }
    }

    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Union of `[center - R - margin, center + R + margin]` over all centers
pub fn diagram_bounds<I>(centers: I, config: &RenderConfig) -> Option<Bounds>
where
    I: IntoIterator<Item = Point>,
{
    let extent = config.state_radius + config.export_margin;
    centers
        .into_iter()
        .map(|c| Bounds::around(c, extent))
        .reduce(|acc, b| acc.union(&b))
}
