//! Line-prompt front end.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use factor_core::{EntryKind, Response, Session, TranscriptEntry};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::config::DisplaySettings;
use crate::{SUBTITLE, TITLE};

const BANNER_WIDTH: usize = 60;

/// How a line of output is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Echo,
    Help,
    Result,
    Lookup,
    Error,
    Case,
}

fn paint(
    text: &str,
    tone: Tone,
) -> ColoredString {
    match tone {
        Tone::Echo => text.yellow().bold(),
        Tone::Help => text.cyan().bold(),
        Tone::Result => text.green().bold(),
        Tone::Lookup => text.cyan().bold(),
        Tone::Error => text.red().bold(),
        Tone::Case => text.magenta().bold(),
    }
}

/// What the terminal should show after one submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub clear: bool,
    pub lines: Vec<(Tone, String)>,
    pub quit: bool,
}

fn entry_tone(entry: &TranscriptEntry) -> Tone {
    match entry.kind {
        EntryKind::Output => Tone::Result,
        EntryKind::Lookup => Tone::Lookup,
        EntryKind::Error => Tone::Error,
    }
}

fn push_output(
    lines: &mut Vec<(Tone, String)>,
    entry: &TranscriptEntry,
    tone: Tone,
) {
    if let Some(output) = &entry.output {
        lines.push((tone, output.clone()));
    }
}

/// Lays out the terminal update for `response`.
///
/// `transcript` is the session's transcript after the response, used to
/// replay the restored history when a case ends.
pub fn screen_for(
    response: &Response,
    transcript: &[TranscriptEntry],
    prompt: &str,
) -> Screen {
    let mut screen = Screen::default();
    match response {
        Response::Quit => {
            screen.lines.push((Tone::Case, "Goodbye!".to_string()));
            screen.quit = true;
        }
        Response::Cleared => screen.clear = true,
        Response::Help(entry) => push_output(&mut screen.lines, entry, Tone::Help),
        Response::CaseStarted(entry) => {
            screen.clear = true;
            push_output(&mut screen.lines, entry, Tone::Case);
        }
        Response::CaseEnded(entry) => {
            screen.clear = true;
            push_output(&mut screen.lines, entry, Tone::Case);
            // The last transcript entry is the `endcase` line itself.
            let restored = transcript.split_last().map_or(&[][..], |(_, rest)| rest);
            for previous in restored {
                if let Some(input) = &previous.input {
                    screen.lines.push((Tone::Echo, format!("{prompt}{input}")));
                }
                push_output(&mut screen.lines, previous, entry_tone(previous));
            }
        }
        Response::Entry(entry) => push_output(&mut screen.lines, entry, entry_tone(entry)),
    }
    screen
}

fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)).context("cannot clear the terminal")
}

fn print_banner() {
    let border = "=".repeat(BANNER_WIDTH);
    println!("{}", border.blue().bold());
    println!("{}", paint(&format!("{TITLE:^BANNER_WIDTH$}"), Tone::Case));
    for line in SUBTITLE {
        println!("{}", paint(&format!("{line:^BANNER_WIDTH$}"), Tone::Help));
    }
    println!("{}", border.blue().bold());
}

fn show(screen: &Screen) -> Result<()> {
    if screen.clear {
        clear_screen()?;
    }
    for (tone, text) in &screen.lines {
        println!("{}", paint(text, *tone));
    }
    io::stdout().flush().context("cannot write to stdout")
}

/// Runs the prompt until the user quits.
pub fn run(display: &DisplaySettings) -> Result<()> {
    colored::control::set_override(display.use_color());

    let mut session = Session::new();
    let mut editor = DefaultEditor::new().context("cannot start the line editor")?;

    clear_screen()?;
    print_banner();
    info!("prompt started");

    loop {
        let line = match editor.readline(&display.prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(error) => return Err(anyhow::Error::new(error).context("cannot read input")),
        };
        if !line.trim().is_empty() {
            editor
                .add_history_entry(line.as_str())
                .context("cannot record history")?;
        }

        let response = session.submit(&line);
        debug!(?response, "prompt response");
        let screen = screen_for(&response, session.transcript(), &display.prompt);
        show(&screen)?;
        if screen.quit {
            break;
        }
    }

    info!("prompt finished");
    Ok(())
}
