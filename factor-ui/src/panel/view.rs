//! Drawing for the panel front end.

use factor_core::format::format_value;
use factor_core::{Factor, TranscriptEntry, Variables};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::PanelState;
use super::status_bar::{hints, status_line};
use crate::{SUBTITLE, TITLE};

const HEADER_HEIGHT: u16 = 4;
const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const ECHO_PREFIX: &str = "factor> ";

const COMMANDS: [&str; 5] = ["help", "cls", "case", "endcase", "quit"];
const SHORTCUTS: [&str; 3] = ["Enter  submit", "Up/Dn  scroll", "Esc    quit"];

/// Rows left for the history pane, inside its border.
pub fn history_height(terminal_height: u16) -> usize {
    usize::from(
        terminal_height
            .saturating_sub(HEADER_HEIGHT + INPUT_HEIGHT + STATUS_HEIGHT)
            .saturating_sub(2),
    )
}

/// Transcript rendered as styled lines: echoed inputs in yellow, outputs in
/// green, errors in red. Multi-line outputs become several lines.
pub fn history_lines(transcript: &[TranscriptEntry]) -> Vec<Line<'static>> {
    let echo = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for entry in transcript {
        if let Some(input) = &entry.input {
            lines.push(Line::raw(format!("{ECHO_PREFIX}{input}")).style(echo));
        }
        if let Some(output) = &entry.output {
            let color = if entry.is_error() { Color::Red } else { Color::Green };
            lines.extend(
                output
                    .lines()
                    .map(|text| Line::raw(text.to_string()).style(Style::default().fg(color))),
            );
        }
    }
    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// Sidebar contents: commands, factors, shortcuts, then the variables of
/// the current scope.
pub fn sidebar_lines(variables: &Variables) -> Vec<Line<'static>> {
    let mut lines = vec![section("Commands")];
    lines.extend(COMMANDS.iter().map(|c| Line::raw(format!("  {c}"))));

    lines.push(Line::default());
    lines.push(section("Factors"));
    lines.extend(Factor::ALL.iter().map(|f| Line::raw(format!("  {}", f.name()))));

    lines.push(Line::default());
    lines.push(section("Shortcuts"));
    lines.extend(SHORTCUTS.iter().map(|s| Line::raw(format!("  {s}"))));

    lines.push(Line::default());
    lines.push(section("Variables"));
    if variables.is_empty() {
        lines.push(Line::styled("  (none)", Style::default().fg(Color::DarkGray)));
    }
    for (name, value) in variables {
        lines.push(Line::raw(format!("  {name} = {}", format_value(*value))));
    }
    lines
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
) {
    let mut lines = vec![Line::styled(
        TITLE,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    lines.extend(
        SUBTITLE
            .iter()
            .map(|text| Line::styled(*text, Style::default().fg(Color::Cyan))),
    );

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_history(
    frame: &mut Frame,
    area: Rect,
    state: &PanelState,
) {
    let lines = history_lines(state.session.transcript());
    let visible = usize::from(area.height.saturating_sub(2));
    let newest_top = lines.len().saturating_sub(visible);
    let top = newest_top.saturating_sub(state.scroll_back());

    let title = if state.scroll_back() > 0 {
        format!(" History (-{}) ", state.scroll_back())
    } else {
        " History ".to_string()
    };
    let history = Paragraph::new(lines)
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(history, area);
}

fn draw_input(
    frame: &mut Frame,
    area: Rect,
    state: &PanelState,
) {
    let inner_width = usize::from(area.width.saturating_sub(2)).max(1);
    let cursor = state.input.cursor();
    let offset = cursor.saturating_sub(inner_width - 1);
    let shown: String = state.input.text().chars().skip(offset).take(inner_width).collect();

    let input = Paragraph::new(Line::from(vec![Span::raw(shown)]))
        .block(Block::default().borders(Borders::ALL).title(" Input "));
    frame.render_widget(input, area);

    let column = u16::try_from(cursor - offset).unwrap_or(0);
    frame.set_cursor_position(Position::new(area.x + 1 + column, area.y + 1));
}

/// Draws the whole panel.
pub fn draw(
    frame: &mut Frame,
    state: &PanelState,
    sidebar_width: u16,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(10)])
        .split(rows[1]);

    draw_header(frame, rows[0]);

    let sidebar = Paragraph::new(sidebar_lines(state.session.variables()))
        .block(Block::default().borders(Borders::ALL).title(" Reference "));
    frame.render_widget(sidebar, body[0]);

    draw_history(frame, body[1], state);
    draw_input(frame, rows[2], state);

    let status = status_line(&hints::PANEL, state.session.state(), rows[3].width);
    frame.render_widget(Paragraph::new(status), rows[3]);
}
