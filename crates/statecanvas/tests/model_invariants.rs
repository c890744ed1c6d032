//! Tests for the automaton model's structural invariants

use proptest::prelude::*;
use statecanvas::automaton::AutomataModel;
use statecanvas::{Point, StateId};

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    SetInitial(usize),
    ToggleFinal(usize),
    Connect(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => (0usize..8).prop_map(Op::Remove),
        1 => (0usize..8).prop_map(Op::SetInitial),
        1 => (0usize..8).prop_map(Op::ToggleFinal),
        2 => (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Connect(a, b)),
    ]
}

/// Resolve an index into the current state list
fn pick(model: &AutomataModel, index: usize) -> Option<StateId> {
    let states = model.states();
    if states.is_empty() {
        None
    } else {
        Some(states[index % states.len()].id)
    }
}

proptest! {
    #[test]
    fn ids_increase_until_empty(ops in proptest::collection::vec(op(), 1..60)) {
        let mut model = AutomataModel::new();
        let mut last: Option<u32> = None;

        for op in ops {
            match op {
                Op::Add => {
                    let was_empty = model.is_empty();
                    let id = model.add_state(Point::new(0.0, 0.0), None).id.0;
                    if was_empty {
                        prop_assert_eq!(id, 0);
                    } else {
                        prop_assert!(last.map_or(true, |prev| id > prev));
                    }
                    last = Some(id);
                }
                Op::Remove(i) => {
                    if let Some(id) = pick(&model, i) {
                        model.remove_state(id);
                        if model.is_empty() {
                            prop_assert_eq!(model.next_state_id(), StateId(0));
                        }
                    }
                }
                Op::SetInitial(i) => {
                    if let Some(id) = pick(&model, i) {
                        model.set_initial(id);
                    }
                }
                Op::ToggleFinal(i) => {
                    if let Some(id) = pick(&model, i) {
                        model.toggle_final(id);
                    }
                }
                Op::Connect(a, b) => {
                    if let (Some(a), Some(b)) = (pick(&model, a), pick(&model, b)) {
                        model.add_transition(a, b, "x");
                    }
                }
            }

            let mut ids: Vec<u32> = model.states().iter().map(|s| s.id.0).collect();
            let count = ids.len();
            ids.dedup();
            prop_assert_eq!(ids.len(), count, "duplicate live ids");
            prop_assert!(model.states().iter().filter(|s| s.is_initial).count() <= 1);
            for t in model.transitions() {
                prop_assert!(model.state(t.from).is_some());
                prop_assert!(model.state(t.to).is_some());
            }
        }
    }

    #[test]
    fn set_initial_keeps_exactly_the_last(choices in proptest::collection::vec(0usize..5, 1..20)) {
        let mut model = AutomataModel::new();
        let ids: Vec<StateId> = (0..5)
            .map(|i| model.add_state(Point::new(i as f64 * 80.0, 0.0), None).id)
            .collect();
        for &c in &choices {
            model.set_initial(ids[c]);
        }
        let initial: Vec<StateId> = model
            .states()
            .iter()
            .filter(|s| s.is_initial)
            .map(|s| s.id)
            .collect();
        prop_assert_eq!(initial, vec![ids[*choices.last().unwrap()]]);
    }
}

#[test]
fn test_set_initial_then_other() {
    let mut model = AutomataModel::new();
    let x = model.add_state(Point::new(0.0, 0.0), None).id;
    let y = model.add_state(Point::new(100.0, 0.0), None).id;
    model.set_initial(x);
    model.set_initial(y);
    assert!(!model.state(x).unwrap().is_initial);
    assert!(model.state(y).unwrap().is_initial);
}

#[test]
fn test_remove_state_removes_exactly_touching_transitions() {
    let mut model = AutomataModel::new();
    let a = model.add_state(Point::new(0.0, 0.0), None).id;
    let b = model.add_state(Point::new(100.0, 0.0), None).id;
    let c = model.add_state(Point::new(200.0, 0.0), None).id;
    model.add_transition(a, b, "1");
    model.add_transition(c, a, "2");
    model.add_transition(a, a, "3");
    model.add_transition(b, c, "4");
    model.add_transition(c, c, "5");

    model.remove_state(a);

    let symbols: Vec<&str> = model
        .transitions()
        .iter()
        .map(|t| t.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["4", "5"]);
}

#[test]
fn test_reseed_after_full_delete() {
    let mut model = AutomataModel::new();
    for i in 0..3 {
        model.add_state(Point::new(i as f64, 0.0), None);
    }
    for id in [StateId(2), StateId(0), StateId(1)] {
        model.remove_state(id);
    }
    let state = model.add_state(Point::new(0.0, 0.0), None);
    assert_eq!(state.id, StateId(0));
    assert_eq!(state.name, "q0");
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut model = AutomataModel::new();
    let a = model.add_state(Point::new(0.0, 0.0), None).id;
    let before = model.clone();
    model.set_initial(StateId(5));
    model.toggle_final(StateId(5));
    model.remove_state(StateId(5));
    model.move_state(StateId(5), Point::new(1.0, 1.0));
    assert_eq!(model.states(), before.states());
    assert_eq!(model.state(a).unwrap().center(), Point::new(0.0, 0.0));
}

#[test]
fn test_model_serializes_to_json() {
    let mut model = AutomataModel::new();
    let a = model.add_state(Point::new(10.0, 20.0), Some("start")).id;
    model.set_initial(a);
    model.add_transition(a, a, "a");
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["states"][0]["name"], "start");
    assert_eq!(json["states"][0]["isInitial"], true);
    assert_eq!(json["transitions"][0]["from"], 0);
    assert_eq!(json["transitions"][0]["symbol"], "a");
}
