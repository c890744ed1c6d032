//! Scripted editing sessions
//!
//! A session is a JSON array of steps replayed against an [`Editor`] with an
//! SVG live surface. Prompt answers are queued ahead of the pointer event
//! that consumes them:
//!
//! ```json
//! [
//!   { "op": "mode", "mode": "addState" },
//!   { "op": "press", "x": 100, "y": 100 },
//!   { "op": "press", "x": 250, "y": 100 },
//!   { "op": "mode", "mode": "addTransition" },
//!   { "op": "answer", "text": "0,1" },
//!   { "op": "click", "x": 100, "y": 100 },
//!   { "op": "click", "x": 250, "y": 100 },
//!   { "op": "export" }
//! ]
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, info, warn};

use statecanvas::automaton::{Editor, ExportSink, FileSink};
use statecanvas::render::SvgSurface;
use statecanvas::{DiagramError, Mode, Point, PointerEvent, ScriptedPrompt};

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Step {
    /// Switch tool mode
    Mode { mode: Mode },
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release { x: f64, y: f64 },
    /// Press immediately followed by release at the same point
    Click { x: f64, y: f64 },
    Leave,
    /// Queue a text answer for the next prompt
    Answer { text: String },
    /// Queue a cancelled text prompt
    Cancel,
    /// Queue a yes/no answer for the next confirmation
    Confirm { value: bool },
    CustomNames { enabled: bool },
    /// Clear the diagram, consuming a queued confirmation
    Clear,
    /// Export the current diagram as PNG
    Export,
}

/// Parse a session script
pub fn parse_session(source: &str) -> statecanvas::Result<Vec<Step>> {
    serde_json::from_str(source).map_err(|e| DiagramError::script_error(e.to_string()))
}

/// Summary of a replayed session
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplayReport {
    pub steps: usize,
    pub redraws: usize,
    /// Files written by export steps
    pub exports: Vec<PathBuf>,
    /// Export steps that found an empty diagram
    pub empty_exports: usize,
    /// Queued answers nothing asked for
    pub unused_answers: usize,
}

/// Replays steps against an editor
pub struct SessionRunner {
    editor: Editor<SvgSurface>,
    prompt: ScriptedPrompt,
    sink: Option<FileSink>,
}

impl SessionRunner {
    pub fn new(editor: Editor<SvgSurface>) -> Self {
        Self {
            editor,
            prompt: ScriptedPrompt::new(),
            sink: None,
        }
    }

    /// Write export steps into `dir`; without one exports are rendered and dropped
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sink = Some(FileSink::new(dir.into()));
        self
    }

    pub fn into_editor(self) -> Editor<SvgSurface> {
        self.editor
    }

    /// Replay every step in order
    ///
    /// An export of an empty diagram is reported and skipped; any other
    /// export failure stops the replay.
    pub fn run(&mut self, steps: &[Step]) -> statecanvas::Result<ReplayReport> {
        let mut report = ReplayReport::default();

        for (index, step) in steps.iter().enumerate() {
            debug!(index, ?step, "Replaying step");
            report.steps += 1;

            match step {
                Step::Mode { mode } => self.editor.set_mode(*mode),
                Step::Press { x, y } => {
                    report.redraws += self.pointer(PointerEvent::Press(Point::new(*x, *y)))
                }
                Step::Move { x, y } => {
                    report.redraws += self.pointer(PointerEvent::Move(Point::new(*x, *y)))
                }
                Step::Release { x, y } => {
                    report.redraws += self.pointer(PointerEvent::Release(Point::new(*x, *y)))
                }
                Step::Click { x, y } => {
                    let at = Point::new(*x, *y);
                    report.redraws += self.pointer(PointerEvent::Press(at));
                    report.redraws += self.pointer(PointerEvent::Release(at));
                }
                Step::Leave => report.redraws += self.pointer(PointerEvent::Leave),
                Step::Answer { text } => self.prompt.push_answer(Some(text.clone())),
                Step::Cancel => self.prompt.push_answer(None),
                Step::Confirm { value } => self.prompt.push_confirmation(*value),
                Step::CustomNames { enabled } => self.editor.set_custom_names(*enabled),
                Step::Clear => {
                    if self.editor.clear(&mut self.prompt) {
                        report.redraws += 1;
                    }
                }
                Step::Export => match self.export() {
                    Ok(Some(path)) => report.exports.push(path),
                    Ok(None) => {}
                    Err(err) if err.is_empty_diagram() => {
                        warn!(index, "{}", err);
                        report.empty_exports += 1;
                    }
                    Err(err) => return Err(err),
                },
            }
        }

        report.unused_answers = self.prompt.pending_answers();
        if report.unused_answers > 0 {
            warn!(count = report.unused_answers, "Queued answers were never asked for");
        }
        info!(
            steps = report.steps,
            states = self.editor.model().state_count(),
            transitions = self.editor.model().transition_count(),
            "Session replayed"
        );
        Ok(report)
    }

    fn pointer(&mut self, event: PointerEvent) -> usize {
        usize::from(self.editor.pointer(event, &mut self.prompt))
    }

    fn export(&mut self) -> statecanvas::Result<Option<PathBuf>> {
        match self.sink.as_mut() {
            Some(sink) => {
                let image = self.editor.export_png()?;
                sink.deliver(&image)?;
                Ok(sink.written().last().cloned())
            }
            None => {
                let image = self.editor.export_png()?;
                info!(width = image.width, height = image.height, "Rendered export");
                Ok(None)
            }
        }
    }
}
