//! State for the panel front end.
//!
//! Holds the session, the line being edited, and how far the history pane
//! is scrolled back. Key handling lives here so it can be exercised without
//! a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use factor_core::{Response, Session};
use tracing::debug;

use super::input::InputLine;

const PAGE: usize = 10;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Continue,
    Quit,
}

#[derive(Debug, Default)]
pub struct PanelState {
    pub session: Session,
    pub input: InputLine,
    /// Lines scrolled back from the newest; 0 follows new entries.
    scroll_back: usize,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    /// Keeps the scroll position inside a history of `total` lines shown
    /// `visible` at a time.
    pub fn clamp_scroll(
        &mut self,
        total: usize,
        visible: usize,
    ) {
        self.scroll_back = self.scroll_back.min(total.saturating_sub(visible));
    }

    fn scroll_up(
        &mut self,
        lines: usize,
    ) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    fn scroll_down(
        &mut self,
        lines: usize,
    ) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Submits the current input line to the session.
    pub fn submit(&mut self) -> Response {
        let line = self.input.take();
        self.scroll_back = 0;
        let response = self.session.submit(&line);
        debug!(?response, "panel response");
        response
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
    ) -> PanelAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return PanelAction::Quit,
            KeyCode::Char('c') if ctrl => return PanelAction::Quit,
            KeyCode::Enter => {
                if self.submit() == Response::Quit {
                    return PanelAction::Quit;
                }
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE),
            KeyCode::PageDown => self.scroll_down(PAGE),
            _ => {
                self.input.handle_key(key);
            }
        }
        PanelAction::Continue
    }
}
