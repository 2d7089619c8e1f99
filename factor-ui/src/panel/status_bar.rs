//! Status bar: key hints on the left, scope mode on the right.

use factor_core::SessionState;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Keyboard shortcut hint for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Hints shown while the panel is running.
pub mod hints {
    use super::KeyHint;

    pub const ENTER: KeyHint = KeyHint::new("Enter", "Submit");
    pub const SCROLL: KeyHint = KeyHint::new("Up/Down", "Scroll");
    pub const PAGE: KeyHint = KeyHint::new("PgUp/PgDn", "Page");
    pub const ESC: KeyHint = KeyHint::new("Esc", "Quit");
    pub const CTRL_C: KeyHint = KeyHint::new("C-c", "Quit");

    pub const PANEL: [KeyHint; 5] = [ENTER, SCROLL, PAGE, ESC, CTRL_C];
}

pub fn hint_text(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

pub fn mode_text(state: SessionState) -> &'static str {
    match state {
        SessionState::Root => "Mode: NORMAL",
        SessionState::InCase => "Mode: CASE",
    }
}

/// Builds the status line for `width` columns, right-aligning the mode.
pub fn status_line(
    hints: &[KeyHint],
    state: SessionState,
    width: u16,
) -> Line<'static> {
    let left = format!(" {}", hint_text(hints));
    let right = format!("{} ", mode_text(state));
    let used = left.chars().count() + right.chars().count();
    let gap = usize::from(width).saturating_sub(used).max(1);

    let mode_style = match state {
        SessionState::Root => Style::default().fg(Color::Green),
        SessionState::InCase => Style::default().fg(Color::Magenta),
    };

    Line::from(vec![
        Span::styled(left, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, mode_style.add_modifier(Modifier::BOLD)),
    ])
}
