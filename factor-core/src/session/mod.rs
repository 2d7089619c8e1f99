//! Interactive session: scoped variables, a transcript, and the
//! `case` / `endcase` stack.
//!
//! A [`Session`] owns everything a front end needs. Each call to
//! [`Session::submit`] processes one line and returns a [`Response`] that
//! carries a copy of whatever was appended to the transcript, so the caller
//! can render it without reading the session back.

mod command;
mod help;
mod transcript;

use std::mem;

use tracing::{debug, info};

pub use command::{Line, classify};
pub use help::help_text;
pub use transcript::{EntryKind, TranscriptEntry};

use crate::environment::{Builtins, Environment, Variables};
use crate::error::CalcError;
use crate::expression::{Parsed, parse_input};
use crate::format::format_value;

const CASE_STARTED: &str = "Case started. Variables now local to this case.";
const CASE_ENDED: &str = "Case ended. Previous variables restored.";
const NO_CASE: &str = "No case to end.";

/// Whether any case is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Root,
    InCase,
}

/// Outcome of one submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A calculation, assignment, lookup, or error.
    Entry(TranscriptEntry),
    Help(TranscriptEntry),
    CaseStarted(TranscriptEntry),
    /// The restored transcript already ends with this entry.
    CaseEnded(TranscriptEntry),
    Cleared,
    Quit,
}

impl Response {
    /// The appended transcript entry, if this response carries one.
    pub fn entry(&self) -> Option<&TranscriptEntry> {
        match self {
            Self::Entry(entry)
            | Self::Help(entry)
            | Self::CaseStarted(entry)
            | Self::CaseEnded(entry) => Some(entry),
            Self::Cleared | Self::Quit => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Scope {
    variables: Variables,
    transcript: Vec<TranscriptEntry>,
}

/// Calculator session shared by every front end.
#[derive(Debug)]
pub struct Session {
    current: Scope,
    frames: Vec<Scope>,
    builtins: Builtins,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A root-scope session with the standard builtins.
    pub fn new() -> Self {
        Self::with_builtins(Builtins::standard())
    }

    pub fn with_builtins(builtins: Builtins) -> Self {
        Self {
            current: Scope::default(),
            frames: Vec::new(),
            builtins,
        }
    }

    /// Processes one input line.
    ///
    /// Every line appends exactly one transcript entry, except `cls`, which
    /// clears the transcript, and the quit commands, which change nothing.
    pub fn submit(
        &mut self,
        line: &str,
    ) -> Response {
        let line = line.trim();
        let command = classify(line);
        debug!(?command, depth = self.depth(), "classified input");

        match command {
            Line::Quit => Response::Quit,
            Line::Help => Response::Help(self.append(TranscriptEntry::output(line, help_text()))),
            Line::Clear => {
                self.current.transcript.clear();
                Response::Cleared
            }
            Line::Case => self.open_case(line),
            Line::EndCase => self.close_case(line),
            Line::Assignment { name, rhs } => {
                let entry = match self.evaluate(rhs) {
                    Ok(value) => {
                        self.current.variables.insert(name.to_string(), value);
                        TranscriptEntry::silent(line)
                    }
                    Err(error) => {
                        debug!(%error, variable = name, "assignment failed");
                        TranscriptEntry::error(line, format!("Error in assignment: {error}"))
                    }
                };
                Response::Entry(self.append(entry))
            }
            Line::Lookup(name) => {
                let entry = match self.current.variables.get(name) {
                    Some(value) => {
                        TranscriptEntry::lookup(line, format!("{name} = {}", format_value(*value)))
                    }
                    None => TranscriptEntry::error(
                        line,
                        format!("Variable '{name}' not found in current scope."),
                    ),
                };
                Response::Entry(self.append(entry))
            }
            Line::Expression(text) => {
                let entry = match self.evaluate(text) {
                    Ok(value) => TranscriptEntry::output(line, format!("Result: {}", format_value(value))),
                    Err(error) => {
                        debug!(%error, "evaluation failed");
                        TranscriptEntry::error(line, format!("Error: {error}"))
                    }
                };
                Response::Entry(self.append(entry))
            }
        }
    }

    /// Evaluates `text` in the current scope without recording anything.
    ///
    /// # Errors
    ///
    /// Any [`CalcError`] from parsing or evaluation.
    pub fn evaluate(
        &self,
        text: &str,
    ) -> Result<f64, CalcError> {
        match parse_input(text)? {
            Parsed::FactorCall(call) => Ok(call.evaluate()),
            Parsed::Expression(expr) => {
                Environment::new(&self.current.variables, &self.builtins).evaluate(&expr)
            }
        }
    }

    /// Transcript of the current scope, oldest first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.current.transcript
    }

    /// Variables bound in the current scope, in name order.
    pub fn variables(&self) -> &Variables {
        &self.current.variables
    }

    /// Number of open cases.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn state(&self) -> SessionState {
        if self.frames.is_empty() {
            SessionState::Root
        } else {
            SessionState::InCase
        }
    }

    pub fn help_text(&self) -> String {
        help_text()
    }

    fn append(
        &mut self,
        entry: TranscriptEntry,
    ) -> TranscriptEntry {
        self.current.transcript.push(entry.clone());
        entry
    }

    fn open_case(
        &mut self,
        line: &str,
    ) -> Response {
        let saved = mem::take(&mut self.current);
        self.frames.push(saved);
        info!(depth = self.depth(), "case started");

        Response::CaseStarted(self.append(TranscriptEntry::output(line, CASE_STARTED)))
    }

    fn close_case(
        &mut self,
        line: &str,
    ) -> Response {
        let Some(restored) = self.frames.pop() else {
            let error = CalcError::Scope(NO_CASE.to_string());
            debug!(%error, "endcase outside a case");
            return Response::Entry(self.append(TranscriptEntry::error(line, error.to_string())));
        };
        self.current = restored;
        info!(depth = self.depth(), "case ended");

        Response::CaseEnded(self.append(TranscriptEntry::output(line, CASE_ENDED)))
    }
}
