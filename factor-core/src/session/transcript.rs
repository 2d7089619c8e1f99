/// What kind of output a transcript entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A result, a command acknowledgement, or nothing at all.
    Output,
    /// The echo of a variable's value.
    Lookup,
    Error,
}

/// One line of session history: what was typed and what came back.
///
/// `input` is `None` for entries the session writes on its own, and
/// `output` is `None` for a successful assignment, which prints nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub input: Option<String>,
    pub output: Option<String>,
    pub kind: EntryKind,
}

impl TranscriptEntry {
    pub fn output(
        input: &str,
        output: impl Into<String>,
    ) -> Self {
        Self {
            input: Some(input.to_string()),
            output: Some(output.into()),
            kind: EntryKind::Output,
        }
    }

    pub fn lookup(
        input: &str,
        output: impl Into<String>,
    ) -> Self {
        Self {
            input: Some(input.to_string()),
            output: Some(output.into()),
            kind: EntryKind::Lookup,
        }
    }

    pub fn error(
        input: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            input: Some(input.to_string()),
            output: Some(message.into()),
            kind: EntryKind::Error,
        }
    }

    /// An echoed input with nothing to show for it.
    pub fn silent(input: &str) -> Self {
        Self {
            input: Some(input.to_string()),
            output: None,
            kind: EntryKind::Output,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == EntryKind::Error
    }
}
