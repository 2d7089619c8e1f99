//! Number rendering for transcript output.
//!
//! Results are shown in the shortest form that reads back as the same
//! `f64`. Whole numbers keep a trailing `.0` so a value is never mistaken
//! for an integer count, and very large or very small magnitudes switch to
//! exponent notation.

/// Renders a value the way results and variables are echoed.
///
/// # Examples
///
/// ```
/// use factor_core::format::format_value;
///
/// assert_eq!(format_value(5.0), "5.0");
/// assert_eq!(format_value(10.05), "10.05");
/// assert_eq!(format_value(1e20), "1e+20");
/// assert_eq!(format_value(0.000015), "1.5e-05");
/// assert_eq!(format_value(f64::INFINITY), "inf");
/// ```
pub fn format_value(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return normalize_exponent(&format!("{value:e}"));
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Renders a value with `precision` significant digits, dropping trailing
/// zeros, in the style of C's `%g`.
///
/// # Examples
///
/// ```
/// use factor_core::format::format_general;
///
/// assert_eq!(format_general(2.5, 6), "2.5");
/// assert_eq!(format_general(12.0, 6), "12");
/// assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
/// assert_eq!(format_general(0.00001, 6), "1e-05");
/// ```
pub fn format_general(
    value: f64,
    precision: usize,
) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{value:.prec$e}", prec = precision - 1);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = strip_trailing_zeros(mantissa);
        normalize_exponent(&format!("{mantissa}e{exponent}"))
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Rewrites Rust's `1.5e-7` as `1.5e-07`: explicit sign, two-digit exponent.
fn normalize_exponent(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent.trim_start_matches('+')),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text.to_string(),
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
