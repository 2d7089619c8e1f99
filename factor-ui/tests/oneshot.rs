//! One-shot rendering, as printed by `factor-calc <EXPR>...`.

use factor_core::CalcError;
use factor_ui::oneshot::render;
use pretty_assertions::assert_eq;

#[test]
fn render_capital_recovery() {
    let line = render("A_P(2.5%, 10)").unwrap();

    assert_eq!(line, "A_P @ i=2.5%, n=10  ->  0.114258763177");
}

#[test]
fn render_rate_without_percent_sign() {
    let line = render("P_F(5, 3)").unwrap();

    assert_eq!(line, "P_F @ i=5%, n=3  ->  0.863837598531");
}

#[test]
fn render_uses_canonical_name_for_alias() {
    let line = render("f_p(0, 12)").unwrap();

    assert_eq!(line, "F_P @ i=0%, n=12  ->  1.000000000000");
}

#[test]
fn render_infinite_result() {
    let line = render("A_P(0%, 0)").unwrap();

    assert_eq!(line, "A_P @ i=0%, n=0  ->  inf");
}

#[test]
fn render_rejects_expressions() {
    let result = render("A_P(2.5%, 10) * 1000");

    assert_eq!(
        result,
        Err(CalcError::Parse(
            "Could not parse. Expected like: A_P(2.5%, 10)".to_string()
        ))
    );
}

#[test]
fn render_unknown_factor_lists_valid_names() {
    let error = render("X_Y(5, 10)").unwrap_err();

    assert_eq!(
        error.to_string(),
        "Unknown factor 'X_Y'. Try one of: F_P, P_F, P_A, A_P, F_A, A_F, A_G, P_G"
    );
}
