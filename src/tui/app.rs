use crossterm::event::{KeyCode, KeyModifiers};

use crate::git::PushOutcome;

/// Status shown when Enter is pressed with nothing to commit.
pub const EMPTY_MESSAGE: &str = "Please enter a commit message!";

/// Color class of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Neutral,
    Success,
    Failure,
}

/// Text and severity of the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub text: String,
    pub severity: Severity,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Failure,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Keep reading keys.
    None,
    /// Leave the loop, discarding the buffer.
    Quit,
    /// Run the push sequence with this (trimmed) message.
    Submit(String),
}

/// TUI application state
#[derive(Debug, Default)]
pub struct TuiApp {
    /// Pending commit message
    pub(super) buffer: String,
    /// Status line
    pub(super) status: Status,
    /// Set for the single frame drawn before git runs
    pub(super) processing: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Handle a key event.
    ///
    /// `capacity` is the number of cells in the visible message field; typing
    /// stops once the buffer holds that many characters.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers, capacity: usize) -> Action {
        match key {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Enter => {
                let message = self.buffer.trim();
                if message.is_empty() {
                    self.status = Status::failure(EMPTY_MESSAGE);
                    Action::None
                } else {
                    Action::Submit(message.to_string())
                }
            }
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    self.status = Status::default();
                }
                Action::None
            }
            KeyCode::Char(c) if is_printable(c, modifiers) => {
                if self.buffer.chars().count() < capacity {
                    self.buffer.push(c);
                    self.status = Status::default();
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Mark that git is about to run so the next frame shows progress.
    pub fn begin_processing(&mut self) {
        self.processing = true;
    }

    /// Apply the result of a push.
    ///
    /// The buffer is only cleared when every step succeeded.
    pub fn finish_submit(&mut self, outcome: &PushOutcome) {
        self.processing = false;
        if outcome.is_success() {
            self.status = Status::success(outcome.message());
            self.buffer.clear();
        } else {
            self.status = Status::failure(outcome.message());
        }
    }
}

fn is_printable(c: char, modifiers: KeyModifiers) -> bool {
    (' '..='~').contains(&c)
        && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
