//! Automaton model
//!
//! Sole owner of states and transitions. Every mutation goes through this
//! type so the structural invariants hold:
//!
//! - state ids increase monotonically and restart at zero once the state
//!   collection is empty
//! - at most one state is initial
//! - removing a state removes every transition that touches it

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{Point, State, StateId, Transition, TransitionId};

/// States and transitions in insertion order
///
/// Insertion order is the rendering z-order and the hit-test priority.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AutomataModel {
    states: Vec<State>,
    transitions: Vec<Transition>,
    #[serde(skip)]
    next_state_id: u32,
    #[serde(skip)]
    next_transition_id: u32,
}

impl AutomataModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state centered at `position`
    ///
    /// An empty or missing custom name yields the generated `q<id>` name.
    pub fn add_state(&mut self, position: Point, custom_name: Option<&str>) -> &State {
        let id = StateId(self.next_state_id);
        self.next_state_id += 1;

        let name = match custom_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => State::default_name(id),
        };
        debug!(id = id.0, name = %name, x = position.x, y = position.y, "Added state");

        self.states.push(State {
            id,
            name,
            x: position.x,
            y: position.y,
            is_initial: false,
            is_final: false,
        });
        &self.states[self.states.len() - 1]
    }

    /// Make `id` the only initial state; no-op for unknown ids
    pub fn set_initial(&mut self, id: StateId) {
        if self.state(id).is_none() {
            trace!(id = id.0, "set_initial on unknown state");
            return;
        }
        for state in &mut self.states {
            state.is_initial = state.id == id;
        }
        debug!(id = id.0, "Set initial state");
    }

    /// Flip the final flag of `id`; no-op for unknown ids
    pub fn toggle_final(&mut self, id: StateId) {
        if let Some(state) = self.state_mut(id) {
            state.is_final = !state.is_final;
            debug!(id = id.0, is_final = state.is_final, "Toggled final state");
        }
    }

    /// Reposition a state; no-op for unknown ids
    pub fn move_state(&mut self, id: StateId, position: Point) {
        if let Some(state) = self.state_mut(id) {
            state.x = position.x;
            state.y = position.y;
        }
    }

    /// Remove a state and every transition touching it
    pub fn remove_state(&mut self, id: StateId) {
        let before = self.states.len();
        self.states.retain(|s| s.id != id);
        if self.states.len() == before {
            return;
        }

        let edges_before = self.transitions.len();
        self.transitions.retain(|t| !t.touches(id));
        debug!(
            id = id.0,
            removed_transitions = edges_before - self.transitions.len(),
            "Removed state"
        );

        if self.states.is_empty() {
            self.next_state_id = 0;
            trace!("State collection empty, id counter reset");
        }
    }

    /// Append a transition; parallel edges are never deduplicated
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        symbol: impl Into<String>,
    ) -> &Transition {
        let id = TransitionId(self.next_transition_id);
        self.next_transition_id += 1;
        let symbol = symbol.into();
        debug!(id = id.0, from = from.0, to = to.0, symbol = %symbol, "Added transition");

        self.transitions.push(Transition {
            id,
            from,
            to,
            symbol,
        });
        &self.transitions[self.transitions.len() - 1]
    }

    /// Remove a transition by id; no-op for unknown ids
    pub fn remove_transition(&mut self, id: TransitionId) {
        let before = self.transitions.len();
        self.transitions.retain(|t| t.id != id);
        if self.transitions.len() != before {
            debug!(id = id.0, "Removed transition");
        }
    }

    /// Drop everything and reset both id counters
    pub fn clear(&mut self) {
        self.states.clear();
        self.transitions.clear();
        self.next_state_id = 0;
        self.next_transition_id = 0;
        debug!("Cleared automaton");
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    fn state_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.iter_mut().find(|s| s.id == id)
    }

    /// The initial state, if any
    pub fn initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_initial)
    }

    /// Returns true if a transition `from -> to` exists
    pub fn has_transition(&self, from: StateId, to: StateId) -> bool {
        self.transitions.iter().any(|t| t.from == from && t.to == to)
    }

    /// Id the next `add_state` will allocate
    pub fn next_state_id(&self) -> StateId {
        StateId(self.next_state_id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point {
        Point::new(0.0, 0.0)
    }

    #[test]
    fn test_add_state_defaults() {
        let mut model = AutomataModel::new();
        let state = model.add_state(Point::new(10.0, 20.0), None).clone();
        assert_eq!(state.id, StateId(0));
        assert_eq!(state.name, "q0");
        assert_eq!(state.center(), Point::new(10.0, 20.0));
        assert!(!state.is_initial);
        assert!(!state.is_final);
    }

    #[test]
    fn test_custom_names_may_repeat() {
        let mut model = AutomataModel::new();
        model.add_state(origin(), Some("start"));
        model.add_state(origin(), Some("start"));
        model.add_state(origin(), Some(""));
        let names: Vec<_> = model.states().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["start", "start", "q2"]);
    }

    #[test]
    fn test_off_surface_positions_accepted() {
        let mut model = AutomataModel::new();
        let state = model.add_state(Point::new(-500.0, 1e6), None);
        assert_eq!(state.x, -500.0);
    }

    #[test]
    fn test_ids_not_reused_while_states_survive() {
        let mut model = AutomataModel::new();
        model.add_state(origin(), None);
        let b = model.add_state(origin(), None).id;
        model.remove_state(b);
        let c = model.add_state(origin(), None).id;
        assert_eq!(c, StateId(2));
    }

    #[test]
    fn test_id_counter_resets_when_empty() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        let b = model.add_state(origin(), None).id;
        model.remove_state(a);
        model.remove_state(b);
        assert!(model.is_empty());
        assert_eq!(model.add_state(origin(), None).id, StateId(0));
    }

    #[test]
    fn test_set_initial_is_exclusive() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        let b = model.add_state(origin(), None).id;
        model.set_initial(a);
        model.set_initial(b);
        let initial: Vec<_> = model
            .states()
            .iter()
            .filter(|s| s.is_initial)
            .map(|s| s.id)
            .collect();
        assert_eq!(initial, vec![b]);
        assert_eq!(model.initial_state().map(|s| s.id), Some(b));
    }

    #[test]
    fn test_set_initial_unknown_is_noop() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        model.set_initial(a);
        model.set_initial(StateId(42));
        assert!(model.state(a).unwrap().is_initial);
    }

    #[test]
    fn test_toggle_final() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        let b = model.add_state(origin(), None).id;
        model.toggle_final(a);
        model.toggle_final(b);
        assert!(model.state(a).unwrap().is_final);
        assert!(model.state(b).unwrap().is_final);
        model.toggle_final(a);
        assert!(!model.state(a).unwrap().is_final);
        model.toggle_final(StateId(9));
    }

    #[test]
    fn test_remove_state_cascades() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        let b = model.add_state(origin(), None).id;
        let c = model.add_state(origin(), None).id;
        model.add_transition(a, b, "x");
        model.add_transition(b, a, "y");
        model.add_transition(b, b, "z");
        let kept = model.add_transition(a, c, "w").id;
        model.remove_state(b);
        assert_eq!(model.transition_count(), 1);
        assert_eq!(model.transitions()[0].id, kept);
    }

    #[test]
    fn test_parallel_transitions_kept() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        let b = model.add_state(origin(), None).id;
        let first = model.add_transition(a, b, "0").id;
        let second = model.add_transition(a, b, "1").id;
        assert_ne!(first, second);
        assert_eq!(model.transition_count(), 2);
        assert!(model.has_transition(a, b));
        assert!(!model.has_transition(b, a));
    }

    #[test]
    fn test_remove_transition() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        let t = model.add_transition(a, a, "loop").id;
        model.remove_transition(TransitionId(99));
        assert_eq!(model.transition_count(), 1);
        model.remove_transition(t);
        assert_eq!(model.transition_count(), 0);
        assert_eq!(model.state_count(), 1);
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        model.add_transition(a, a, "a");
        model.clear();
        assert!(model.is_empty());
        assert_eq!(model.transition_count(), 0);
        assert_eq!(model.next_state_id(), StateId(0));
        let b = model.add_state(origin(), None).id;
        assert_eq!(model.add_transition(b, b, "b").id, TransitionId(0));
    }

    #[test]
    fn test_move_state() {
        let mut model = AutomataModel::new();
        let a = model.add_state(origin(), None).id;
        model.move_state(a, Point::new(5.0, -5.0));
        assert_eq!(model.state(a).unwrap().center(), Point::new(5.0, -5.0));
    }
}
