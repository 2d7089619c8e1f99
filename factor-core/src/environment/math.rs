//! The math library reachable from expressions.
//!
//! Failures follow the conventions of a C math library: an argument outside
//! a function's domain is a "math domain error", and a finite argument whose
//! result overflows to infinity is a "math range error". Integer functions
//! (`factorial`, `gcd`, `comb`, ...) take whole numbers no larger than
//! 2^53 and compute in `f64`.

use super::{Arity, Builtins};
use crate::error::CalcError;
use crate::format::format_value;

const DOMAIN_ERROR: &str = "math domain error";
const RANGE_ERROR: &str = "math range error";

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Largest `n` whose factorial is finite in `f64`.
const MAX_FACTORIAL: u64 = 170;

type UnaryFn = fn(f64) -> Result<f64, CalcError>;

pub(super) fn register(builtins: &mut Builtins) {
    let unary: [(&str, UnaryFn); 32] = [
        ("sqrt", |x| domain(x >= 0.0, x.sqrt())),
        ("cbrt", |x| Ok(x.cbrt())),
        ("exp", |x| range(x, x.exp())),
        ("exp2", |x| range(x, x.exp2())),
        ("expm1", |x| range(x, x.exp_m1())),
        ("ln", |x| domain(x > 0.0, x.ln())),
        ("log10", |x| domain(x > 0.0, x.log10())),
        ("log2", |x| domain(x > 0.0, x.log2())),
        ("log1p", |x| domain(x > -1.0, x.ln_1p())),
        ("sin", |x| domain(x.is_finite(), x.sin())),
        ("cos", |x| domain(x.is_finite(), x.cos())),
        ("tan", |x| domain(x.is_finite(), x.tan())),
        ("asin", |x| domain((-1.0..=1.0).contains(&x), x.asin())),
        ("acos", |x| domain((-1.0..=1.0).contains(&x), x.acos())),
        ("atan", |x| Ok(x.atan())),
        ("sinh", |x| range(x, x.sinh())),
        ("cosh", |x| range(x, x.cosh())),
        ("tanh", |x| Ok(x.tanh())),
        ("asinh", |x| Ok(x.asinh())),
        ("acosh", |x| domain(x >= 1.0, x.acosh())),
        ("atanh", |x| domain(x > -1.0 && x < 1.0, x.atanh())),
        ("floor", |x| Ok(x.floor())),
        ("ceil", |x| Ok(x.ceil())),
        ("trunc", |x| Ok(x.trunc())),
        ("fabs", |x| Ok(x.abs())),
        ("degrees", |x| Ok(x.to_degrees())),
        ("radians", |x| Ok(x.to_radians())),
        ("erf", |x| Ok(libm::erf(x))),
        ("erfc", |x| Ok(libm::erfc(x))),
        ("gamma", gamma),
        ("lgamma", lgamma),
        ("ulp", |x| Ok(ulp(x))),
    ];
    for (name, body) in unary {
        builtins.register_function(name, Arity::Exactly(1), move |args| body(args[0]));
    }

    // Reimplemented rather than borrowed from a general library.
    builtins.register_function("abs", Arity::Exactly(1), |args| {
        let x = args[0];
        Ok(if x < 0.0 { -x } else { x })
    });

    builtins.register_function("log", Arity::Between(1, 2), |args| {
        let x = args[0];
        let ln_x = domain(x > 0.0, x.ln())?;
        match args.get(1) {
            None => Ok(ln_x),
            Some(&base) => {
                let ln_base = domain(base > 0.0, base.ln())?;
                divide(ln_x, ln_base)
            }
        }
    });
    builtins.register_function("pow", Arity::Exactly(2), |args| {
        let (x, y) = (args[0], args[1]);
        let fractional = y.is_finite() && y.fract() != 0.0;
        if (x == 0.0 && y < 0.0) || (x < 0.0 && fractional) {
            return Err(CalcError::evaluation(DOMAIN_ERROR));
        }
        power(x, y)
    });
    builtins.register_function("atan2", Arity::Exactly(2), |args| {
        Ok(args[0].atan2(args[1]))
    });
    builtins.register_function("copysign", Arity::Exactly(2), |args| {
        Ok(args[0].copysign(args[1]))
    });
    builtins.register_function("fmod", Arity::Exactly(2), |args| {
        let (x, y) = (args[0], args[1]);
        domain(y != 0.0 && !x.is_infinite(), x % y)
    });
    builtins.register_function("remainder", Arity::Exactly(2), |args| {
        let (x, y) = (args[0], args[1]);
        domain(y != 0.0 && !x.is_infinite(), libm::remainder(x, y))
    });
    builtins.register_function("ldexp", Arity::Exactly(2), |args| {
        let x = args[0];
        let exponent = integer("ldexp", args[1])?.clamp(-10_000, 10_000) as i32;
        range(x, libm::scalbn(x, exponent))
    });
    builtins.register_function("nextafter", Arity::Exactly(2), |args| {
        Ok(libm::nextafter(args[0], args[1]))
    });
    builtins.register_function("hypot", Arity::AtLeast(0), |args| {
        Ok(args.iter().copied().fold(0.0, f64::hypot))
    });
    builtins.register_function("min", Arity::AtLeast(2), |args| {
        Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
    });
    builtins.register_function("max", Arity::AtLeast(2), |args| {
        Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    });

    builtins.register_function("factorial", Arity::Exactly(1), |args| {
        let n = non_negative("factorial", args[0])?;
        if n > MAX_FACTORIAL {
            return Err(CalcError::evaluation(RANGE_ERROR));
        }
        Ok((2..=n).map(|k| k as f64).product())
    });
    builtins.register_function("isqrt", Arity::Exactly(1), |args| {
        let n = non_negative("isqrt", args[0])?;
        Ok(isqrt(n) as f64)
    });
    builtins.register_function("gcd", Arity::AtLeast(0), |args| {
        let mut result = 0;
        for &arg in args {
            result = gcd(result, integer("gcd", arg)?.unsigned_abs());
        }
        Ok(result as f64)
    });
    builtins.register_function("lcm", Arity::AtLeast(0), |args| {
        let mut result: u64 = 1;
        for &arg in args {
            let value = integer("lcm", arg)?.unsigned_abs();
            if value == 0 || result == 0 {
                result = 0;
                continue;
            }
            result = (result / gcd(result, value))
                .checked_mul(value)
                .ok_or_else(|| CalcError::evaluation(RANGE_ERROR))?;
        }
        Ok(result as f64)
    });
    builtins.register_function("comb", Arity::Exactly(2), |args| {
        let n = non_negative("comb", args[0])?;
        let k = non_negative("comb", args[1])?;
        if k > n {
            return Ok(0.0);
        }
        let k = k.min(n - k);
        let mut value = 1.0;
        for i in 1..=k {
            value = value * (n - k + i) as f64 / i as f64;
            if value.is_infinite() {
                return Err(CalcError::evaluation(RANGE_ERROR));
            }
        }
        Ok(value)
    });
    builtins.register_function("perm", Arity::Between(1, 2), |args| {
        let n = non_negative("perm", args[0])?;
        let k = match args.get(1) {
            Some(&k) => non_negative("perm", k)?,
            None => n,
        };
        if k > n {
            return Ok(0.0);
        }
        let mut value = 1.0;
        for factor in (n - k + 1)..=n {
            value *= factor as f64;
            if value.is_infinite() {
                return Err(CalcError::evaluation(RANGE_ERROR));
            }
        }
        Ok(value)
    });
}

fn domain(
    valid: bool,
    value: f64,
) -> Result<f64, CalcError> {
    if valid {
        Ok(value)
    } else {
        Err(CalcError::evaluation(DOMAIN_ERROR))
    }
}

/// Rejects an infinite result computed from a finite argument.
fn range(
    argument: f64,
    value: f64,
) -> Result<f64, CalcError> {
    if value.is_infinite() && argument.is_finite() {
        Err(CalcError::evaluation(RANGE_ERROR))
    } else {
        Ok(value)
    }
}

fn is_non_positive_integer(x: f64) -> bool {
    x == f64::NEG_INFINITY || (x <= 0.0 && x.fract() == 0.0)
}

fn gamma(x: f64) -> Result<f64, CalcError> {
    if is_non_positive_integer(x) {
        return Err(CalcError::evaluation(DOMAIN_ERROR));
    }
    range(x, libm::tgamma(x))
}

fn lgamma(x: f64) -> Result<f64, CalcError> {
    if x != f64::NEG_INFINITY && is_non_positive_integer(x) {
        return Err(CalcError::evaluation(DOMAIN_ERROR));
    }
    range(x, libm::lgamma(x))
}

fn ulp(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let x = x.abs();
    if x.is_infinite() {
        x
    } else if x == f64::MAX {
        x - libm::nextafter(x, 0.0)
    } else {
        libm::nextafter(x, f64::INFINITY) - x
    }
}

fn gcd(
    mut a: u64,
    mut b: u64,
) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn isqrt(n: u64) -> u64 {
    let n = u128::from(n);
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root as u64
}

/// Converts an argument of an integer function.
fn integer(
    function: &str,
    value: f64,
) -> Result<i64, CalcError> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Ok(value as i64)
    } else {
        Err(CalcError::evaluation(format!(
            "{function}() expects whole numbers, got {}",
            format_value(value)
        )))
    }
}

fn non_negative(
    function: &str,
    value: f64,
) -> Result<u64, CalcError> {
    let n = integer(function, value)?;
    u64::try_from(n).map_err(|_| {
        CalcError::evaluation(format!("{function}() is not defined for negative values"))
    })
}

pub(super) fn divide(
    lhs: f64,
    rhs: f64,
) -> Result<f64, CalcError> {
    if rhs == 0.0 {
        return Err(CalcError::evaluation("float division by zero"));
    }
    Ok(lhs / rhs)
}

/// `base ** exponent` for the power operator.
pub(super) fn power(
    base: f64,
    exponent: f64,
) -> Result<f64, CalcError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::evaluation(
            "0.0 cannot be raised to a negative power",
        ));
    }
    if base.is_nan() || exponent.is_nan() {
        return Ok(base.powf(exponent));
    }
    let value = base.powf(exponent);
    if value.is_nan() {
        return Err(CalcError::evaluation(
            "negative number cannot be raised to a fractional power",
        ));
    }
    if value.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(CalcError::evaluation(RANGE_ERROR));
    }
    Ok(value)
}
