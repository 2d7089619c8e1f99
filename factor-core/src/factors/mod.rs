//! Time-value-of-money factor library.
//!
//! Each factor converts one cash-flow form into another at a periodic rate
//! `i` over `n` periods:
//!
//! | Factor | Converts | Formula |
//! |--------|----------|---------|
//! | `F_P`  | P to F   | `(1+i)^n` |
//! | `P_F`  | F to P   | `(1+i)^-n` |
//! | `P_A`  | A to P   | `(1 - (1+i)^-n)/i` |
//! | `A_P`  | P to A   | `i(1+i)^n / ((1+i)^n - 1)` |
//! | `F_A`  | A to F   | `((1+i)^n - 1)/i` |
//! | `A_F`  | F to A   | `i / ((1+i)^n - 1)` |
//! | `A_G`  | G to A   | `1/i - n/((1+i)^n - 1)` |
//! | `P_G`  | G to P   | `A_G * P_A` |
//!
//! # Example
//!
//! ```
//! use factor_core::Factor;
//!
//! let factor = Factor::from_name("a_p").unwrap();
//! assert_eq!(factor, Factor::CapitalRecovery);
//! assert_eq!(factor.evaluate(0.0, 4), 0.25);
//! ```

pub mod common;
pub mod formulas;

use std::fmt;

/// One of the eight interest factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    /// `F_P`: future worth of a present sum.
    CompoundAmount,
    /// `P_F`: present worth of a future sum.
    PresentWorth,
    /// `P_A`: present worth of a uniform series.
    SeriesPresentWorth,
    /// `A_P`: uniform series that recovers a present sum.
    CapitalRecovery,
    /// `F_A`: future worth of a uniform series.
    SeriesCompoundAmount,
    /// `A_F`: uniform series that accumulates a future sum.
    SinkingFund,
    /// `A_G`: uniform series equivalent of an arithmetic gradient.
    GradientUniformSeries,
    /// `P_G`: present worth of an arithmetic gradient.
    GradientPresentWorth,
}

impl Factor {
    /// Every factor, in the order they are listed to users.
    pub const ALL: [Factor; 8] = [
        Self::CompoundAmount,
        Self::PresentWorth,
        Self::SeriesPresentWorth,
        Self::CapitalRecovery,
        Self::SeriesCompoundAmount,
        Self::SinkingFund,
        Self::GradientUniformSeries,
        Self::GradientPresentWorth,
    ];

    /// Canonical name, e.g. `"A_P"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CompoundAmount => "F_P",
            Self::PresentWorth => "P_F",
            Self::SeriesPresentWorth => "P_A",
            Self::CapitalRecovery => "A_P",
            Self::SeriesCompoundAmount => "F_A",
            Self::SinkingFund => "A_F",
            Self::GradientUniformSeries => "A_G",
            Self::GradientPresentWorth => "P_G",
        }
    }

    /// Lowercase alias, e.g. `"a_p"`.
    pub fn alias(&self) -> &'static str {
        match self {
            Self::CompoundAmount => "f_p",
            Self::PresentWorth => "p_f",
            Self::SeriesPresentWorth => "p_a",
            Self::CapitalRecovery => "a_p",
            Self::SeriesCompoundAmount => "f_a",
            Self::SinkingFund => "a_f",
            Self::GradientUniformSeries => "a_g",
            Self::GradientPresentWorth => "p_g",
        }
    }

    /// Looks a factor up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|factor| factor.name().eq_ignore_ascii_case(name))
    }

    /// Canonical names joined for error messages: `"F_P, P_F, ..."`.
    pub fn name_list() -> String {
        Self::ALL
            .iter()
            .map(Factor::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Short description with the formula, as shown in help output.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CompoundAmount => "F given P = (1+i)^n",
            Self::PresentWorth => "P given F = (1+i)^-n",
            Self::SeriesPresentWorth => "P given A = (1 - (1+i)^-n)/i",
            Self::CapitalRecovery => "A given P = i(1+i)^n / ((1+i)^n - 1)",
            Self::SeriesCompoundAmount => "F given A = ((1+i)^n - 1)/i",
            Self::SinkingFund => "A given F = i / ((1+i)^n - 1)",
            Self::GradientUniformSeries => {
                "A given arithmetic gradient G = (1/i) - n/((1+i)^n - 1)"
            }
            Self::GradientPresentWorth => "P given arithmetic gradient G = (A_G) * (P_A)",
        }
    }

    /// Evaluates the factor at rate `i` (a fraction) over `n` periods.
    pub fn evaluate(
        &self,
        i: f64,
        n: u32,
    ) -> f64 {
        let formula: fn(f64, u32) -> f64 = match self {
            Self::CompoundAmount => formulas::f_p,
            Self::PresentWorth => formulas::p_f,
            Self::SeriesPresentWorth => formulas::p_a,
            Self::CapitalRecovery => formulas::a_p,
            Self::SeriesCompoundAmount => formulas::f_a,
            Self::SinkingFund => formulas::a_f,
            Self::GradientUniformSeries => formulas::a_g,
            Self::GradientPresentWorth => formulas::p_g,
        };
        formula(i, n)
    }
}

impl fmt::Display for Factor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}
