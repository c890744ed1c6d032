//! Core type definitions for automaton diagrams
//!
//! This module contains the fundamental types used throughout Statecanvas:
//! identifiers, states, transitions, tool modes, cursors and pointer events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DiagramError;

/// A point in surface space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Component-wise offset by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifier of a state, allocated by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a transition, allocated by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(pub u32);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the automaton diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub is_initial: bool,
    pub is_final: bool,
}

impl State {
    /// Default display name for a state id: `q<id>`
    pub fn default_name(id: StateId) -> String {
        format!("q{}", id)
    }

    /// Center of the state's circle
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A directed, labeled edge between two states
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub id: TransitionId,
    pub from: StateId,
    pub to: StateId,
    pub symbol: String,
}

impl Transition {
    /// Returns true if the transition starts and ends on the same state
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Returns true if the transition touches the given state at either end
    pub fn touches(&self, state: StateId) -> bool {
        self.from == state || self.to == state
    }
}

/// Editor tool mode
///
/// Exactly one mode is active at a time; every pointer press is dispatched
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Drag states around
    #[default]
    Move,
    /// Place a new state at the pointer
    AddState,
    /// Two-click transition creation
    AddTransition,
    /// Mark the clicked state as the unique initial state
    SetInitial,
    /// Toggle the final flag of the clicked state
    SetFinal,
    /// Remove the clicked state and its transitions
    Delete,
}

impl Mode {
    /// All modes in toolbar order
    pub fn all() -> &'static [Mode] {
        &[
            Mode::Move,
            Mode::AddState,
            Mode::AddTransition,
            Mode::SetInitial,
            Mode::SetFinal,
            Mode::Delete,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Move => "move",
            Mode::AddState => "addState",
            Mode::AddTransition => "addTransition",
            Mode::SetInitial => "setInitial",
            Mode::SetFinal => "setFinal",
            Mode::Delete => "delete",
        }
    }

    /// Cursor shown while the mode is idle
    pub fn idle_cursor(&self) -> Cursor {
        match self {
            Mode::AddState => Cursor::Crosshair,
            Mode::AddTransition | Mode::SetInitial | Mode::SetFinal | Mode::Delete => {
                Cursor::Pointer
            }
            Mode::Move => Cursor::Grab,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DiagramError::InvalidMode {
                mode: s.to_string(),
            })
    }
}

/// Cursor affordance the host should display over the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    Crosshair,
    Pointer,
    Grab,
    Grabbing,
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Crosshair => write!(f, "crosshair"),
            Cursor::Pointer => write!(f, "pointer"),
            Cursor::Grab => write!(f, "grab"),
            Cursor::Grabbing => write!(f, "grabbing"),
        }
    }
}

/// Pointer input in surface-space coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    Leave,
}
