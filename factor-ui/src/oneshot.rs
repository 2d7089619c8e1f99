//! `factor-calc A_P(2.5%, 10)`: evaluate one factor call and exit.

use std::process::ExitCode;

use factor_core::CalcError;
use factor_core::expression::parse_factor_call;
use factor_core::format::{format_general, format_value};
use tracing::debug;

/// Evaluates `text` with the factor-call syntax and renders the result line.
///
/// # Errors
///
/// Returns the parse error when `text` is not a factor call.
pub fn render(text: &str) -> Result<String, CalcError> {
    let call = parse_factor_call(text)?;
    let value = call.evaluate();
    let shown = if value.is_finite() {
        format!("{value:.12}")
    } else {
        format_value(value)
    };

    Ok(format!(
        "{} @ i={}%, n={}  ->  {shown}",
        call.factor,
        format_general(call.rate * 100.0, 6),
        call.periods
    ))
}

/// Joins `args` with spaces, prints the rendered result or the error.
pub fn run(args: &[String]) -> ExitCode {
    let text = args.join(" ");
    debug!(%text, "one-shot evaluation");

    match render(&text) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            println!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
