use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Entries streamed into an open picker by a producer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    Entries(Vec<String>),
    Failed(String),
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Cancel,
    Accept,
    MoveUp,
    MoveDown,
    Backspace,
    ClearQuery,
    Insert(char),
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Action::Cancel,
            KeyCode::Char('c') | KeyCode::Char('g') if ctrl => Action::Cancel,
            KeyCode::Enter => Action::Accept,
            KeyCode::Up => Action::MoveUp,
            KeyCode::Char('p') | KeyCode::Char('k') if ctrl => Action::MoveUp,
            KeyCode::Down | KeyCode::Tab => Action::MoveDown,
            KeyCode::Char('n') | KeyCode::Char('j') if ctrl => Action::MoveDown,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char('u') if ctrl => Action::ClearQuery,
            KeyCode::Char(c) if !ctrl => Action::Insert(c),
            _ => Action::None,
        }
    }
}
