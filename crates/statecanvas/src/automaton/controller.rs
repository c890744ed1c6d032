//! Interaction controller
//!
//! Owns the tool mode and the transient interaction state (armed transition
//! source, active drag) and turns pointer events into model mutations.
//! Every press is dispatched on the current [`Mode`]:
//!
//! | mode | empty canvas | on a state |
//! |---|---|---|
//! | `addState` | new state at pointer | new state at pointer |
//! | `addTransition` | nothing | two-click protocol |
//! | `setInitial` | nothing | make it the initial state |
//! | `setFinal` | nothing | toggle its final flag |
//! | `delete` | nothing | remove it and its transitions |
//! | `move` | nothing | start dragging it |

use tracing::{debug, trace};

use super::model::AutomataModel;
use super::renderer::GeometryRenderer;
use crate::core::{Cursor, EditorOptions, Mode, Point, PointerEvent, StateId, TextPrompt};

pub const SYMBOL_PROMPT: &str = "Enter transition symbol(s):";
pub const SYMBOL_DEFAULT: &str = "a";
pub const NAME_PROMPT: &str = "Enter state name:";

/// A state being dragged, with the pointer's offset from its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub state: StateId,
    pub grab_offset_x: f64,
    pub grab_offset_y: f64,
}

/// Pointer-to-model state machine
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    mode: Mode,
    pending_source: Option<StateId>,
    drag: Option<Drag>,
    options: EditorOptions,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch tools
    ///
    /// An armed transition source survives the switch and is resolved by the
    /// next click on a state in `addTransition` mode.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(from = %self.mode, to = %mode, "Mode switch");
        self.mode = mode;
    }

    pub fn options(&self) -> EditorOptions {
        self.options
    }

    pub fn set_custom_names(&mut self, enabled: bool) {
        self.options.custom_names = enabled;
    }

    /// Source state armed by the first click of the transition protocol
    pub fn pending_source(&self) -> Option<StateId> {
        self.pending_source
    }

    pub fn active_drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    /// Cursor the host should show right now
    pub fn cursor(&self) -> Cursor {
        if self.drag.is_some() {
            Cursor::Grabbing
        } else {
            self.mode.idle_cursor()
        }
    }

    /// Drop the drag and the armed source
    pub fn reset_transient(&mut self) {
        self.drag = None;
        self.pending_source = None;
    }

    /// Feed one pointer event; returns true when the surface needs a redraw
    pub fn handle(
        &mut self,
        model: &mut AutomataModel,
        renderer: &GeometryRenderer,
        event: PointerEvent,
        prompt: &mut dyn TextPrompt,
    ) -> bool {
        trace!(?event, mode = %self.mode, "Pointer event");
        match event {
            PointerEvent::Press(point) => self.press(model, renderer, point, prompt),
            PointerEvent::Move(point) => self.drag_to(model, point),
            PointerEvent::Release(_) | PointerEvent::Leave => self.end_drag(),
        }
    }

    fn press(
        &mut self,
        model: &mut AutomataModel,
        renderer: &GeometryRenderer,
        point: Point,
        prompt: &mut dyn TextPrompt,
    ) -> bool {
        let clicked = renderer.state_at(model, point);

        match (self.mode, clicked) {
            (Mode::AddState, _) => self.add_state(model, point, prompt),
            (Mode::AddTransition, Some(id)) => self.transition_click(model, id, prompt),
            (Mode::SetInitial, Some(id)) => {
                model.set_initial(id);
                true
            }
            (Mode::SetFinal, Some(id)) => {
                model.toggle_final(id);
                true
            }
            (Mode::Delete, Some(id)) => {
                model.remove_state(id);
                // Ids are reused once the model empties
                if self.pending_source == Some(id) {
                    debug!(source = id.0, "Armed source deleted");
                    self.pending_source = None;
                }
                true
            }
            (Mode::Move, Some(id)) => self.begin_drag(model, id, point),
            (_, None) => false,
        }
    }

    fn add_state(
        &mut self,
        model: &mut AutomataModel,
        point: Point,
        prompt: &mut dyn TextPrompt,
    ) -> bool {
        let was_empty = model.is_empty();

        let custom_name = if self.options.custom_names {
            let suggestion = model.next_state_id().to_string();
            match prompt.request_text(NAME_PROMPT, &suggestion) {
                Some(name) => Some(name),
                None => {
                    debug!("State name prompt cancelled");
                    return false;
                }
            }
        } else {
            None
        };

        let id = model.add_state(point, custom_name.as_deref()).id;
        if was_empty && self.options.mark_first_initial {
            model.set_initial(id);
        }
        true
    }

    fn transition_click(
        &mut self,
        model: &mut AutomataModel,
        clicked: StateId,
        prompt: &mut dyn TextPrompt,
    ) -> bool {
        let Some(source) = self.pending_source.take() else {
            debug!(source = clicked.0, "Transition source armed");
            self.pending_source = Some(clicked);
            return false;
        };

        if model.state(source).is_none() {
            debug!(source = source.0, target = clicked.0, "Armed source no longer exists");
            return false;
        }

        match prompt.request_text(SYMBOL_PROMPT, SYMBOL_DEFAULT) {
            Some(symbol) if !symbol.is_empty() => {
                model.add_transition(source, clicked, symbol);
                true
            }
            _ => {
                debug!(source = source.0, target = clicked.0, "Transition aborted");
                false
            }
        }
    }

    fn begin_drag(&mut self, model: &AutomataModel, id: StateId, point: Point) -> bool {
        let Some(state) = model.state(id) else {
            return false;
        };
        self.drag = Some(Drag {
            state: id,
            grab_offset_x: point.x - state.x,
            grab_offset_y: point.y - state.y,
        });
        debug!(id = id.0, "Drag started");
        false
    }

    fn drag_to(&mut self, model: &mut AutomataModel, point: Point) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        model.move_state(
            drag.state,
            point.offset(-drag.grab_offset_x, -drag.grab_offset_y),
        );
        true
    }

    fn end_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                debug!(id = drag.state.0, "Drag ended");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeclinePrompt, ScriptedPrompt};

    fn setup() -> (InteractionController, AutomataModel, GeometryRenderer) {
        (
            InteractionController::new(),
            AutomataModel::new(),
            GeometryRenderer::new(),
        )
    }

    #[test]
    fn test_starts_in_move_mode() {
        let controller = InteractionController::new();
        assert_eq!(controller.mode(), Mode::Move);
        assert_eq!(controller.cursor(), Cursor::Grab);
        assert!(controller.pending_source().is_none());
    }

    #[test]
    fn test_add_state_even_on_top_of_another() {
        let (mut ctl, mut model, renderer) = setup();
        ctl.set_mode(Mode::AddState);
        let p = Point::new(50.0, 50.0);
        assert!(ctl.handle(&mut model, &renderer, PointerEvent::Press(p), &mut DeclinePrompt));
        assert!(ctl.handle(&mut model, &renderer, PointerEvent::Press(p), &mut DeclinePrompt));
        assert_eq!(model.state_count(), 2);
    }

    #[test]
    fn test_click_on_empty_canvas_is_noop() {
        let (mut ctl, mut model, renderer) = setup();
        for mode in [Mode::AddTransition, Mode::SetInitial, Mode::SetFinal, Mode::Delete, Mode::Move] {
            ctl.set_mode(mode);
            let redraw = ctl.handle(
                &mut model,
                &renderer,
                PointerEvent::Press(Point::new(0.0, 0.0)),
                &mut DeclinePrompt,
            );
            assert!(!redraw);
        }
        assert!(model.is_empty());
    }

    #[test]
    fn test_empty_canvas_click_keeps_armed_source() {
        let (mut ctl, mut model, renderer) = setup();
        let a = model.add_state(Point::new(0.0, 0.0), None).id;
        ctl.set_mode(Mode::AddTransition);
        let mut prompt = DeclinePrompt;
        ctl.handle(&mut model, &renderer, PointerEvent::Press(Point::new(0.0, 0.0)), &mut prompt);
        ctl.handle(&mut model, &renderer, PointerEvent::Press(Point::new(500.0, 0.0)), &mut prompt);
        assert_eq!(ctl.pending_source(), Some(a));
    }

    #[test]
    fn test_custom_name_cancel_creates_nothing() {
        let mut ctl = InteractionController::with_options(EditorOptions {
            custom_names: true,
            ..EditorOptions::default()
        });
        let mut model = AutomataModel::new();
        let renderer = GeometryRenderer::new();
        ctl.set_mode(Mode::AddState);
        let mut prompt = ScriptedPrompt::new().cancel().answer("start").answer("");
        let p = PointerEvent::Press(Point::new(0.0, 0.0));
        assert!(!ctl.handle(&mut model, &renderer, p, &mut prompt));
        assert!(model.is_empty());
        ctl.handle(&mut model, &renderer, p, &mut prompt);
        ctl.handle(&mut model, &renderer, p, &mut prompt);
        let names: Vec<_> = model.states().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["start".to_string(), "q1".to_string()]);
        assert_eq!(prompt.asked()[0], NAME_PROMPT);
    }

    #[test]
    fn test_mark_first_initial() {
        let mut ctl = InteractionController::with_options(EditorOptions {
            mark_first_initial: true,
            ..EditorOptions::default()
        });
        let mut model = AutomataModel::new();
        let renderer = GeometryRenderer::new();
        ctl.set_mode(Mode::AddState);
        ctl.handle(&mut model, &renderer, PointerEvent::Press(Point::new(0.0, 0.0)), &mut DeclinePrompt);
        ctl.handle(&mut model, &renderer, PointerEvent::Press(Point::new(100.0, 0.0)), &mut DeclinePrompt);
        assert!(model.states()[0].is_initial);
        assert!(!model.states()[1].is_initial);
    }

    #[test]
    fn test_drag_cursor() {
        let (mut ctl, mut model, renderer) = setup();
        model.add_state(Point::new(0.0, 0.0), None);
        ctl.handle(&mut model, &renderer, PointerEvent::Press(Point::new(5.0, 5.0)), &mut DeclinePrompt);
        assert_eq!(ctl.cursor(), Cursor::Grabbing);
        assert!(ctl.handle(&mut model, &renderer, PointerEvent::Leave, &mut DeclinePrompt));
        assert_eq!(ctl.cursor(), Cursor::Grab);
        assert!(!ctl.handle(&mut model, &renderer, PointerEvent::Leave, &mut DeclinePrompt));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut ctl, mut model, renderer) = setup();
        let a = model.add_state(Point::new(0.0, 0.0), None).id;
        let redraw = ctl.handle(
            &mut model,
            &renderer,
            PointerEvent::Move(Point::new(80.0, 80.0)),
            &mut DeclinePrompt,
        );
        assert!(!redraw);
        assert_eq!(model.state(a).unwrap().center(), Point::new(0.0, 0.0));
    }
}
