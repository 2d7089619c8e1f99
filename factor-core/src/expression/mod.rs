//! Percent-aware input parsing.
//!
//! Input text is tried against two syntaxes, in order:
//!
//! 1. the factor-call syntax (`A_P(2.5, 10)`), whose first argument is
//!    always a percentage;
//! 2. the free expression syntax (`A_P(2.5%, 10) * 1000 + x`), where only
//!    literals written with `%` are percentages.
//!
//! So `A_P(5, 10)` on its own means 5%, while in `A_P(5, 10) * 2` the 5 is
//! a plain number.

pub mod ast;
pub mod factor_call;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use factor_call::{FactorCall, match_factor_call, parse_factor_call};
pub use parser::parse_expression;

use crate::error::CalcError;

/// Result of parsing one input text.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    FactorCall(FactorCall),
    Expression(Expr),
}

/// Parses `text` with the factor-call syntax first and the free expression
/// syntax second.
///
/// # Errors
///
/// Returns the factor-call error when the text has the factor-call shape
/// but names an unknown factor, otherwise any expression parse error.
pub fn parse_input(text: &str) -> Result<Parsed, CalcError> {
    if let Some(call) = match_factor_call(text) {
        return call.map(Parsed::FactorCall);
    }
    parse_expression(text).map(Parsed::Expression)
}
