//! The eight discrete-compounding interest factors.
//!
//! All functions take the periodic rate `i` as a fraction (`0.05` for five
//! percent) and the number of periods `n`. No rate is rejected: negative
//! rates are evaluated as written, and a zero rate switches to the limit of
//! the formula as `i -> 0` instead of dividing by zero.

use super::common::{compound, reciprocal_periods};

/// Compound amount factor, F given P: `(1+i)^n`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The future value of one unit invested today.
///
/// # Examples
///
/// ```
/// use factor_core::factors::formulas::f_p;
///
/// assert_eq!(f_p(0.10, 2), 1.2100000000000002);
/// assert_eq!(f_p(0.0, 30), 1.0);
/// ```
pub fn f_p(
    i: f64,
    n: u32,
) -> f64 {
    compound(i, f64::from(n))
}

/// Present worth factor, P given F: `(1+i)^-n`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The present value of one unit received after `n` periods.
pub fn p_f(
    i: f64,
    n: u32,
) -> f64 {
    1.0 / compound(i, f64::from(n))
}

/// Series present worth factor, P given A: `(1 - (1+i)^-n) / i`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The present value of one unit paid at the end of each period, or `n`
/// when `i` is zero.
pub fn p_a(
    i: f64,
    n: u32,
) -> f64 {
    if i == 0.0 {
        return f64::from(n);
    }
    (1.0 - compound(i, -f64::from(n))) / i
}

/// Capital recovery factor, A given P: `i(1+i)^n / ((1+i)^n - 1)`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The end-of-period payment that repays one unit borrowed today. At a
/// zero rate this is `1/n`, and infinite for `n = 0`.
///
/// # Examples
///
/// ```
/// use factor_core::factors::formulas::a_p;
///
/// assert_eq!(a_p(0.0, 4), 0.25);
/// assert_eq!(a_p(0.0, 0), f64::INFINITY);
/// assert!((a_p(0.025, 10) - 0.1142588).abs() < 1e-6);
/// ```
pub fn a_p(
    i: f64,
    n: u32,
) -> f64 {
    if i == 0.0 {
        return reciprocal_periods(n);
    }
    let x = compound(i, f64::from(n));
    i * x / (x - 1.0)
}

/// Series compound amount factor, F given A: `((1+i)^n - 1) / i`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The future value of one unit paid at the end of each period, or `n`
/// when `i` is zero.
pub fn f_a(
    i: f64,
    n: u32,
) -> f64 {
    if i == 0.0 {
        return f64::from(n);
    }
    (compound(i, f64::from(n)) - 1.0) / i
}

/// Sinking fund factor, A given F: `i / ((1+i)^n - 1)`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The end-of-period deposit that accumulates to one unit after `n`
/// periods, or `1/n` when `i` is zero.
pub fn a_f(
    i: f64,
    n: u32,
) -> f64 {
    if i == 0.0 {
        return reciprocal_periods(n);
    }
    i / (compound(i, f64::from(n)) - 1.0)
}

/// Arithmetic gradient to uniform series, A given G: `1/i - n/((1+i)^n - 1)`.
///
/// The gradient runs `0, G, 2G, ..., (n-1)G` over periods `1..=n`.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The uniform series equivalent to a unit gradient, or `(n-1)/2` when
/// `i` is zero.
pub fn a_g(
    i: f64,
    n: u32,
) -> f64 {
    if i == 0.0 {
        return (f64::from(n) - 1.0) / 2.0;
    }
    1.0 / i - f64::from(n) / (compound(i, f64::from(n)) - 1.0)
}

/// Arithmetic gradient present worth, P given G.
///
/// Always computed as `A_G * P_A`; the product stays accurate near `i = 0`
/// where the closed form loses precision.
///
/// # Arguments
///
/// * `i` - Periodic interest rate as a fraction (`0.05` for 5%)
/// * `n` - Number of compounding periods
///
/// # Returns
///
/// The present value of a unit gradient.
pub fn p_g(
    i: f64,
    n: u32,
) -> f64 {
    a_g(i, n) * p_a(i, n)
}
