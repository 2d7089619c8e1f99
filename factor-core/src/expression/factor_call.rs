//! Factor-call syntax: `A_P(2.5%, 10)`.
//!
//! The first argument is always a percentage, with or without the `%`
//! sign, so `A_P(2.5, 10)` and `A_P(2.5%, 10)` both mean `i = 0.025`. The
//! second argument is a plain whole number of periods.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CalcError;
use crate::factors::Factor;

static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?P<factor>[A-Za-z]+_[A-Za-z]+)
        \s*\(\s*
        (?P<rate>[-+]?[0-9]+(?:\.[0-9]+)?)(?:\s*%)?
        \s*,\s*
        (?P<periods>[0-9]+)\s*
        \)\s*$",
    )
    .expect("factor-call pattern is valid")
});

const EXPECTED_SHAPE: &str = "Could not parse. Expected like: A_P(2.5%, 10)";

/// A fully parsed factor call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorCall {
    pub factor: Factor,
    /// Rate as a fraction (`0.025` for `2.5%`).
    pub rate: f64,
    pub periods: u32,
}

impl FactorCall {
    pub fn evaluate(&self) -> f64 {
        self.factor.evaluate(self.rate, self.periods)
    }
}

/// Parses `text` as a factor call, or fails naming the expected shape.
///
/// # Errors
///
/// * [`CalcError::Parse`] when `text` is not shaped like a factor call.
/// * [`CalcError::UnknownFactor`] when the shape matches but the name is
///   not one of the eight factors.
///
/// # Examples
///
/// ```
/// use factor_core::Factor;
/// use factor_core::expression::parse_factor_call;
///
/// let call = parse_factor_call("a_p(2.5%, 10)").unwrap();
/// assert_eq!(call.factor, Factor::CapitalRecovery);
/// assert_eq!(call.rate, 0.025);
/// assert_eq!(call.periods, 10);
/// ```
pub fn parse_factor_call(text: &str) -> Result<FactorCall, CalcError> {
    match_factor_call(text).unwrap_or_else(|| Err(CalcError::Parse(EXPECTED_SHAPE.to_string())))
}

/// Parses `text` as a factor call if it has the factor-call shape.
///
/// Returns `None` when the shape does not match, leaving the text to the
/// general expression parser.
pub fn match_factor_call(text: &str) -> Option<Result<FactorCall, CalcError>> {
    let captures = CALL_PATTERN.captures(text)?;
    let name = &captures["factor"];
    let rate = &captures["rate"];
    let periods = &captures["periods"];

    Some(build(name, rate, periods))
}

fn build(
    name: &str,
    rate: &str,
    periods: &str,
) -> Result<FactorCall, CalcError> {
    let factor = Factor::from_name(name).ok_or_else(|| CalcError::UnknownFactor {
        name: name.to_string(),
    })?;
    let percent: f64 = rate
        .parse()
        .map_err(|_| CalcError::Parse(format!("invalid interest rate '{rate}'")))?;
    let periods: u32 = periods
        .parse()
        .map_err(|_| CalcError::Parse(format!("number of periods '{periods}' is out of range")))?;

    Ok(FactorCall {
        factor,
        rate: percent / 100.0,
        periods,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_with_percent_sign() {
        let call = parse_factor_call("A_P(2.5%, 10)").unwrap();

        assert_eq!(
            call,
            FactorCall {
                factor: Factor::CapitalRecovery,
                rate: 0.025,
                periods: 10,
            }
        );
    }

    #[test]
    fn parse_without_percent_sign_still_divides_by_hundred() {
        let call = parse_factor_call("P_F(5, 3)").unwrap();

        assert_eq!(call.rate, 0.05);
        assert_eq!(call.periods, 3);
    }

    #[test]
    fn parse_accepts_surrounding_and_inner_whitespace() {
        let call = parse_factor_call("  f_a ( 7 % , 12 )  ").unwrap();

        assert_eq!(call.factor, Factor::SeriesCompoundAmount);
        assert_eq!(call.rate, 0.07);
        assert_eq!(call.periods, 12);
    }

    #[test]
    fn parse_accepts_signed_rates() {
        let call = parse_factor_call("F_P(-3, 2)").unwrap();

        assert_eq!(call.rate, -0.03);
    }

    #[test]
    fn parse_rejects_fractional_periods() {
        let result = parse_factor_call("A_P(5, 2.5)");

        assert_eq!(result, Err(CalcError::Parse(EXPECTED_SHAPE.to_string())));
    }

    #[test]
    fn parse_rejects_percent_on_periods() {
        let result = parse_factor_call("A_P(5, 10%)");

        assert_eq!(result, Err(CalcError::Parse(EXPECTED_SHAPE.to_string())));
    }

    #[test]
    fn parse_rejects_trailing_arithmetic() {
        assert!(match_factor_call("A_P(5%, 10) * 100").is_none());
    }

    #[test]
    fn parse_rejects_non_ascii_digits() {
        let rate = parse_factor_call("A_P(\u{0665}, 10)");
        let periods = parse_factor_call("A_P(5, \u{0661}\u{0660})");

        assert_eq!(rate, Err(CalcError::Parse(EXPECTED_SHAPE.to_string())));
        assert_eq!(periods, Err(CalcError::Parse(EXPECTED_SHAPE.to_string())));
    }

    #[test]
    fn parse_reports_unknown_factor() {
        let result = parse_factor_call("X_Y(5, 10)");

        assert_eq!(
            result,
            Err(CalcError::UnknownFactor {
                name: "X_Y".to_string()
            })
        );
    }

    #[test]
    fn parse_rejects_periods_beyond_range() {
        let result = parse_factor_call("F_P(5, 99999999999)");

        assert!(matches!(result, Err(CalcError::Parse(_))));
    }

    #[test]
    fn evaluate_zero_rate_zero_periods_is_infinite() {
        let call = parse_factor_call("A_P(0%, 0)").unwrap();

        assert_eq!(call.evaluate(), f64::INFINITY);
    }
}
