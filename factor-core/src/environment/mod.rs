//! Evaluation environment for free expressions.
//!
//! Names resolve through two explicit layers:
//!
//! 1. the active scope's [`Variables`], which shadow everything else;
//! 2. the [`Builtins`] registry of functions and constants.
//!
//! Nothing outside those two maps is reachable from an expression.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use self::math::{divide, power};
use crate::error::CalcError;
use crate::expression::{BinaryOp, Expr, UnaryOp};
use crate::factors::Factor;

mod math;

/// Variable bindings of one scope, kept in name order for display.
pub type Variables = BTreeMap<String, f64>;

type FunctionBody = Arc<dyn Fn(&[f64]) -> Result<f64, CalcError> + Send + Sync>;

/// Number of arguments a builtin function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(
        &self,
        count: usize,
    ) -> bool {
        match *self {
            Self::Exactly(n) => count == n,
            Self::Between(min, max) => (min..=max).contains(&count),
            Self::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match *self {
            Self::Exactly(1) => f.write_str("exactly one argument"),
            Self::Exactly(n) => write!(f, "exactly {n} arguments"),
            Self::Between(min, max) => write!(f, "{min} to {max} arguments"),
            Self::AtLeast(min) => write!(f, "at least {min} arguments"),
        }
    }
}

#[derive(Clone)]
struct Function {
    arity: Arity,
    body: FunctionBody,
}

/// Registry of builtin functions and constants.
///
/// Typical lifetime:
/// 1. Start from [`Builtins::standard`] (or [`Builtins::new`] for an empty
///    registry).
/// 2. Call `register_function` / `register_constant` for extras.
/// 3. Hand a reference to each [`Environment`] that evaluates an expression.
#[derive(Clone, Default)]
pub struct Builtins {
    functions: HashMap<String, Function>,
    constants: HashMap<String, f64>,
}

impl Builtins {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The factor functions, the math library (see the `math` submodule),
    /// and the constants `pi`, `e`, `tau`, `inf` and `nan`.
    pub fn standard() -> Self {
        let mut builtins = Self::new();
        builtins.register_factors();
        math::register(&mut builtins);

        builtins.register_constant("pi", std::f64::consts::PI);
        builtins.register_constant("e", std::f64::consts::E);
        builtins.register_constant("tau", std::f64::consts::TAU);
        builtins.register_constant("inf", f64::INFINITY);
        builtins.register_constant("nan", f64::NAN);
        builtins
    }

    /// Register a function. An existing entry with the same name is replaced.
    pub fn register_function(
        &mut self,
        name: &str,
        arity: Arity,
        body: impl Fn(&[f64]) -> Result<f64, CalcError> + Send + Sync + 'static,
    ) {
        self.functions.insert(
            name.to_string(),
            Function {
                arity,
                body: Arc::new(body),
            },
        );
    }

    /// Register a constant. An existing entry with the same name is replaced.
    pub fn register_constant(
        &mut self,
        name: &str,
        value: f64,
    ) {
        self.constants.insert(name.to_string(), value);
    }

    /// Names of every function and constant, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .functions
            .keys()
            .chain(self.constants.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn constant(
        &self,
        name: &str,
    ) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn has_function(
        &self,
        name: &str,
    ) -> bool {
        self.functions.contains_key(name)
    }

    fn call(
        &self,
        name: &str,
        args: &[f64],
    ) -> Option<Result<f64, CalcError>> {
        let function = self.functions.get(name)?;
        if !function.arity.accepts(args.len()) {
            return Some(Err(CalcError::evaluation(format!(
                "{name}() takes {} ({} given)",
                function.arity,
                args.len()
            ))));
        }
        Some((function.body)(args))
    }

    fn register_factors(&mut self) {
        for factor in Factor::ALL {
            for name in [factor.name(), factor.alias()] {
                self.register_function(name, Arity::Exactly(2), move |args| {
                    let periods = whole_periods(args[1])?;
                    Ok(factor.evaluate(args[0], periods))
                });
            }
        }
    }
}

impl fmt::Debug for Builtins {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Builtins")
            .field("functions", &self.functions.len())
            .field("constants", &self.constants.len())
            .finish()
    }
}

/// Converts a factor's `n` argument to a period count.
fn whole_periods(value: f64) -> Result<u32, CalcError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(CalcError::evaluation(format!(
            "number of periods must be a non-negative whole number, got {value}"
        )))
    }
}

/// Evaluates expressions against one scope's variables and the builtins.
#[derive(Debug, Clone, Copy)]
pub struct Environment<'a> {
    variables: &'a Variables,
    builtins: &'a Builtins,
}

impl<'a> Environment<'a> {
    pub fn new(
        variables: &'a Variables,
        builtins: &'a Builtins,
    ) -> Self {
        Self {
            variables,
            builtins,
        }
    }

    /// Evaluates `expr` to a number.
    ///
    /// # Errors
    ///
    /// * [`CalcError::UnknownIdentifier`] for a name found in neither layer.
    /// * [`CalcError::Evaluation`] for division by zero, math domain and range
    ///   errors, wrong argument counts, calling a variable or constant, and
    ///   using a function without calling it.
    pub fn evaluate(
        &self,
        expr: &Expr,
    ) -> Result<f64, CalcError> {
        match expr {
            Expr::Number(value) => Ok(*value),
            Expr::Identifier(name) => self.resolve(name),
            Expr::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => -value,
                })
            }
            Expr::Binary { .. } => self.evaluate_chain(expr),
            Expr::Call { name, args } => self.call(name, args),
        }
    }

    /// Evaluates a run of binary operators along its left spine in a loop,
    /// so `1+1+...+1` costs no stack per operator.
    fn evaluate_chain(
        &self,
        expr: &Expr,
    ) -> Result<f64, CalcError> {
        let mut operations = Vec::new();
        let mut leftmost = expr;
        while let Expr::Binary { op, lhs, rhs } = leftmost {
            operations.push((*op, rhs.as_ref()));
            leftmost = lhs.as_ref();
        }

        let mut value = self.evaluate(leftmost)?;
        for (op, rhs) in operations.into_iter().rev() {
            let rhs = self.evaluate(rhs)?;
            value = match op {
                BinaryOp::Add => value + rhs,
                BinaryOp::Subtract => value - rhs,
                BinaryOp::Multiply => value * rhs,
                BinaryOp::Divide => divide(value, rhs)?,
                BinaryOp::Power => power(value, rhs)?,
            };
        }
        Ok(value)
    }

    fn resolve(
        &self,
        name: &str,
    ) -> Result<f64, CalcError> {
        if let Some(value) = self.variables.get(name) {
            return Ok(*value);
        }
        if let Some(value) = self.builtins.constant(name) {
            return Ok(value);
        }
        if self.builtins.has_function(name) {
            return Err(CalcError::evaluation(format!(
                "function '{name}' must be called with arguments"
            )));
        }
        Err(CalcError::UnknownIdentifier(name.to_string()))
    }

    fn call(
        &self,
        name: &str,
        args: &[Expr],
    ) -> Result<f64, CalcError> {
        if self.variables.contains_key(name) || self.builtins.constant(name).is_some() {
            return Err(CalcError::evaluation(format!("'{name}' is not callable")));
        }
        if !self.builtins.has_function(name) {
            return Err(CalcError::UnknownIdentifier(name.to_string()));
        }

        let values = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;
        trace!(function = name, ?values, "calling builtin");

        self.builtins
            .call(name, &values)
            .unwrap_or_else(|| Err(CalcError::UnknownIdentifier(name.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expression::parse_expression;

    fn eval_with(
        text: &str,
        variables: &Variables,
    ) -> Result<f64, CalcError> {
        let builtins = Builtins::standard();
        let expr = parse_expression(text).unwrap();
        Environment::new(variables, &builtins).evaluate(&expr)
    }

    fn eval(text: &str) -> Result<f64, CalcError> {
        eval_with(text, &Variables::new())
    }

    // =========================================================================
    // arithmetic
    // =========================================================================

    #[test]
    fn evaluate_arithmetic() {
        assert_eq!(eval("1 + 2 * 3"), Ok(7.0));
        assert_eq!(eval("(1 + 2) * 3"), Ok(9.0));
        assert_eq!(eval("7 / 2"), Ok(3.5));
        assert_eq!(eval("-2**2"), Ok(-4.0));
        assert_eq!(eval("2**-1"), Ok(0.5));
    }

    #[test]
    fn evaluate_long_operator_chain() {
        let text = format!("{}1", "1+".repeat(100_000));

        assert_eq!(eval(&text), Ok(100_001.0));
    }

    #[test]
    fn evaluate_long_subtraction_chain_is_left_associative() {
        let text = format!("10{}", "-1".repeat(10_000));

        assert_eq!(eval(&text), Ok(-9_990.0));
    }

    #[test]
    fn evaluate_percent_literal_plus_plain_number() {
        assert_eq!(eval("5% + 10"), Ok(10.05));
    }

    #[test]
    fn evaluate_division_by_zero_is_an_error() {
        assert_eq!(
            eval("1 / 0"),
            Err(CalcError::Evaluation("float division by zero".to_string()))
        );
    }

    #[test]
    fn evaluate_zero_to_negative_power_is_an_error() {
        assert!(matches!(eval("0 ** -1"), Err(CalcError::Evaluation(_))));
    }

    #[test]
    fn evaluate_negative_base_fractional_power_is_an_error() {
        assert!(matches!(eval("(-8) ** 0.5"), Err(CalcError::Evaluation(_))));
    }

    // =========================================================================
    // name resolution
    // =========================================================================

    #[test]
    fn evaluate_reads_variables() {
        let variables = Variables::from([("x".to_string(), 4.0)]);

        assert_eq!(eval_with("x * 2", &variables), Ok(8.0));
    }

    #[test]
    fn evaluate_variables_shadow_constants() {
        let variables = Variables::from([("pi".to_string(), 3.0)]);

        assert_eq!(eval_with("pi", &variables), Ok(3.0));
    }

    #[test]
    fn evaluate_unknown_identifier() {
        assert_eq!(
            eval("rate * 2"),
            Err(CalcError::UnknownIdentifier("rate".to_string()))
        );
    }

    #[test]
    fn evaluate_unknown_function() {
        assert_eq!(
            eval("open(1)"),
            Err(CalcError::UnknownIdentifier("open".to_string()))
        );
    }

    #[test]
    fn evaluate_calling_a_variable_is_an_error() {
        let variables = Variables::from([("sin".to_string(), 1.0)]);

        assert_eq!(
            eval_with("sin(1)", &variables),
            Err(CalcError::Evaluation("'sin' is not callable".to_string()))
        );
    }

    #[test]
    fn evaluate_bare_function_name_is_an_error() {
        assert!(matches!(eval("sqrt + 1"), Err(CalcError::Evaluation(_))));
    }

    // =========================================================================
    // builtins
    // =========================================================================

    #[test]
    fn evaluate_factor_function_takes_rate_literally() {
        let result = eval("A_P(5%, 10) * 100").unwrap();

        assert_eq!(result, Factor::CapitalRecovery.evaluate(0.05, 10) * 100.0);
    }

    #[test]
    fn evaluate_factor_function_lowercase_alias() {
        assert_eq!(eval("f_p(0, 12)"), Ok(1.0));
    }

    #[test]
    fn evaluate_factor_function_rejects_fractional_periods() {
        assert!(matches!(eval("F_P(5%, 2.5)"), Err(CalcError::Evaluation(_))));
        assert!(matches!(eval("F_P(5%, -1)"), Err(CalcError::Evaluation(_))));
    }

    #[test]
    fn evaluate_factor_function_checks_arity() {
        assert_eq!(
            eval("A_P(5%)"),
            Err(CalcError::Evaluation(
                "A_P() takes exactly 2 arguments (1 given)".to_string()
            ))
        );
    }

    #[test]
    fn evaluate_abs_negates_negative_values() {
        assert_eq!(eval("abs(-3.5)"), Ok(3.5));
        assert_eq!(eval("abs(2)"), Ok(2.0));
    }

    #[test]
    fn evaluate_math_functions_and_constants() {
        assert_eq!(eval("sqrt(16)"), Ok(4.0));
        assert_eq!(eval("log(8, 2)"), Ok(3.0));
        assert_eq!(eval("max(1, 7, 3)"), Ok(7.0));
        assert_eq!(eval("floor(pi)"), Ok(3.0));
        assert_eq!(eval("cos(0)"), Ok(1.0));
        assert_eq!(eval("fmod(7, 3)"), Ok(1.0));
        assert_eq!(eval("factorial(5) / comb(5, 2)"), Ok(12.0));
        assert_eq!(eval("gcd(12, 18) + lcm(4, 6)"), Ok(18.0));
        assert_eq!(eval("hypot(3, 4, 12)"), Ok(13.0));
        assert_eq!(eval("isqrt(17) * cbrt(8)"), Ok(8.0));
    }

    #[test]
    fn evaluate_overflow_is_a_range_error() {
        for text in ["10 ** 400", "exp(1000)", "pow(10, 400)"] {
            assert_eq!(
                eval(text),
                Err(CalcError::Evaluation("math range error".to_string())),
                "{text}"
            );
        }
        assert_eq!(eval("inf ** 2"), Ok(f64::INFINITY));
        assert_eq!(eval("1e308 * 10"), Ok(f64::INFINITY));
    }

    #[test]
    fn evaluate_math_domain_errors() {
        for text in ["sqrt(-1)", "log(0)", "asin(2)", "log(10, 1)"] {
            assert!(
                matches!(eval(text), Err(CalcError::Evaluation(_))),
                "{text} should fail"
            );
        }
    }

    #[test]
    fn evaluate_constant_is_not_callable() {
        assert_eq!(
            eval("pi(2)"),
            Err(CalcError::Evaluation("'pi' is not callable".to_string()))
        );
    }

    #[test]
    fn registry_lists_sorted_names() {
        let mut builtins = Builtins::new();
        builtins.register_constant("zeta", 1.0);
        builtins.register_function("alpha", Arity::Exactly(0), |_| Ok(0.0));

        assert_eq!(builtins.names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn registry_custom_function_is_callable() {
        let mut builtins = Builtins::new();
        builtins.register_function("double", Arity::Exactly(1), |args| Ok(args[0] * 2.0));
        let variables = Variables::new();
        let expr = parse_expression("double(21)").unwrap();

        let result = Environment::new(&variables, &builtins).evaluate(&expr);

        assert_eq!(result, Ok(42.0));
    }
}
