//! Full-screen panel front end.

pub mod input;
pub mod state;
pub mod status_bar;
pub mod view;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use self::state::{PanelAction, PanelState};
use crate::config::PanelSettings;
use crate::logging;

type PanelTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen, undone on drop.
struct TerminalGuard {
    terminal: PanelTerminal,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("cannot enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(anyhow::Error::new(error).context("cannot enter the alternate screen"));
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("cannot create the terminal backend")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = disable_raw_mode() {
            warn!(%error, "failed to disable raw mode");
        }
        if let Err(error) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(%error, "failed to leave the alternate screen");
        }
        if let Err(error) = self.terminal.show_cursor() {
            warn!(%error, "failed to show the cursor");
        }
    }
}

fn event_loop(
    terminal: &mut PanelTerminal,
    state: &mut PanelState,
    settings: &PanelSettings,
) -> Result<()> {
    loop {
        let size = terminal.size().context("cannot read the terminal size")?;
        let total = view::history_lines(state.session.transcript()).len();
        state.clamp_scroll(total, view::history_height(size.height));

        terminal
            .draw(|frame| view::draw(frame, state, settings.sidebar_width))
            .context("cannot draw the panel")?;

        match event::read().context("cannot read terminal events")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if state.handle_key(key) == PanelAction::Quit {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

/// Runs the panel until the user quits. The terminal is restored on every
/// exit path, including errors.
pub fn run(settings: &PanelSettings) -> Result<()> {
    // Console log lines would corrupt the alternate screen.
    if let Err(error) = logging::set_console_enabled(false) {
        warn!(%error, "console logging stays on");
    }
    info!("panel started");

    let result = TerminalGuard::enter().and_then(|mut guard| {
        let mut state = PanelState::new();
        event_loop(&mut guard.terminal, &mut state, settings)
    });

    if let Err(error) = logging::set_console_enabled(true) {
        warn!(%error, "cannot restore console logging");
    }
    info!("panel finished");
    result
}
