use thiserror::Error;

use crate::factors::Factor;

/// Errors raised while parsing or evaluating a line of input.
///
/// None of these end a session: the session turns every one of them into a
/// transcript entry and keeps accepting input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalcError {
    /// Malformed factor call or expression syntax.
    #[error("{0}")]
    Parse(String),

    /// A factor call named something outside the eight known factors.
    #[error("Unknown factor '{name}'. Try one of: {valid}", valid = Factor::name_list())]
    UnknownFactor { name: String },

    /// An expression referenced an undefined variable or function.
    #[error("name '{0}' is not defined")]
    UnknownIdentifier(String),

    /// Runtime failure such as division by zero or a math domain error.
    #[error("{0}")]
    Evaluation(String),

    /// `endcase` was issued with no open case.
    #[error("{0}")]
    Scope(String),
}

impl CalcError {
    pub(crate) fn syntax(detail: impl Into<String>) -> Self {
        Self::Parse(format!("invalid syntax: {}", detail.into()))
    }

    pub(crate) fn evaluation(detail: impl Into<String>) -> Self {
        Self::Evaluation(detail.into())
    }
}
