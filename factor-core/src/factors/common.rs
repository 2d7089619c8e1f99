//! Shared building blocks for the factor formulas.
//!
//! Every factor is written in terms of the compound amount `(1 + i)^n`; the
//! zero-rate limits additionally share the reciprocal of the period count.

/// Returns `(1 + i)^n`.
///
/// `n` is a real exponent so that callers can ask for `(1 + i)^-n` directly,
/// which keeps the present-worth formulas free of an extra division.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction
/// * `n` - Exponent, usually a number of periods
///
/// # Returns
///
/// The growth of one unit over `n` periods at rate `i`.
///
/// # Examples
///
/// ```
/// use factor_core::factors::common::compound;
///
/// assert_eq!(compound(0.10, 2.0), 1.2100000000000002);
/// assert_eq!(compound(0.0, 25.0), 1.0);
/// ```
pub fn compound(
    i: f64,
    n: f64,
) -> f64 {
    (1.0 + i).powf(n)
}

/// Returns `1 / n`, or positive infinity when `n` is zero.
///
/// This is the zero-rate limit of both the capital recovery and the sinking
/// fund factor. `n = 0` is not an error: the algebraic limit is unbounded.
///
/// # Arguments
///
/// * `n` - Number of periods
///
/// # Returns
///
/// `1 / n` as a float, or `f64::INFINITY` for `n = 0`.
///
/// # Examples
///
/// ```
/// use factor_core::factors::common::reciprocal_periods;
///
/// assert_eq!(reciprocal_periods(4), 0.25);
/// assert_eq!(reciprocal_periods(0), f64::INFINITY);
/// ```
pub fn reciprocal_periods(n: u32) -> f64 {
    if n == 0 {
        f64::INFINITY
    } else {
        1.0 / f64::from(n)
    }
}
