//! Text and confirmation input collaborator
//!
//! Symbol prompts, custom state names and the clear confirmation all go
//! through [`TextPrompt`]. A `None`/`false` answer means the user declined
//! and the caller must leave the model as it was.

use std::collections::VecDeque;

/// Source of user-supplied text and yes/no answers
pub trait TextPrompt {
    /// Ask for a string; `None` when the user cancels
    fn request_text(&mut self, message: &str, default: &str) -> Option<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt that declines every request
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclinePrompt;

impl TextPrompt for DeclinePrompt {
    fn request_text(&mut self, _message: &str, _default: &str) -> Option<String> {
        None
    }

    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

/// Prompt that replays queued answers in order
///
/// Once a queue runs dry, requests are treated as cancelled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    confirmations: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text answer
    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.push_answer(Some(text.into()));
        self
    }

    /// Queue a cancelled text request
    pub fn cancel(mut self) -> Self {
        self.push_answer(None);
        self
    }

    /// Queue a confirmation answer
    pub fn confirmation(mut self, value: bool) -> Self {
        self.push_confirmation(value);
        self
    }

    pub fn push_answer(&mut self, answer: Option<String>) {
        self.answers.push_back(answer);
    }

    pub fn push_confirmation(&mut self, value: bool) {
        self.confirmations.push_back(value);
    }

    /// Messages of every request made so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Number of text answers not yet consumed
    pub fn pending_answers(&self) -> usize {
        self.answers.len()
    }
}

impl TextPrompt for ScriptedPrompt {
    fn request_text(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }
}

/// Prompt answered by host callbacks
///
/// `text` receives the message and the suggested default; returning `None`
/// cancels. Browser hosts wire these to `window.prompt` and
/// `window.confirm`.
pub struct CallbackPrompt<T, C> {
    text: T,
    confirm: C,
}

impl<T, C> CallbackPrompt<T, C>
where
    T: FnMut(&str, &str) -> Option<String>,
    C: FnMut(&str) -> bool,
{
    pub fn new(text: T, confirm: C) -> Self {
        Self { text, confirm }
    }
}

impl<T, C> TextPrompt for CallbackPrompt<T, C>
where
    T: FnMut(&str, &str) -> Option<String>,
    C: FnMut(&str) -> bool,
{
    fn request_text(&mut self, message: &str, default: &str) -> Option<String> {
        (self.text)(message, default)
    }

    fn confirm(&mut self, message: &str) -> bool {
        (self.confirm)(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decline_prompt() {
        let mut prompt = DeclinePrompt;
        assert_eq!(prompt.request_text("name?", "0"), None);
        assert!(!prompt.confirm("sure?"));
    }

    #[test]
    fn test_scripted_prompt_replays_in_order() {
        let mut prompt = ScriptedPrompt::new()
            .answer("a")
            .cancel()
            .answer("b")
            .confirmation(true);
        assert_eq!(prompt.request_text("x", "a"), Some("a".to_string()));
        assert_eq!(prompt.request_text("x", "a"), None);
        assert_eq!(prompt.request_text("x", "a"), Some("b".to_string()));
        assert_eq!(prompt.request_text("x", "a"), None);
        assert!(prompt.confirm("clear?"));
        assert!(!prompt.confirm("clear?"));
        assert_eq!(prompt.asked().len(), 6);
    }

    #[test]
    fn test_callback_prompt_forwards_message_and_default() {
        let mut seen = Vec::new();
        let mut prompt = CallbackPrompt::new(
            |message: &str, default: &str| {
                seen.push((message.to_string(), default.to_string()));
                Some(default.to_uppercase())
            },
            |message: &str| message.ends_with('?'),
        );
        assert_eq!(prompt.request_text("symbol:", "a"), Some("A".to_string()));
        assert!(prompt.confirm("sure?"));
        assert!(!prompt.confirm("sure"));
        drop(prompt);
        assert_eq!(seen, vec![("symbol:".to_string(), "a".to_string())]);
    }
}
