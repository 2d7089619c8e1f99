use factor_core::expression::parse_factor_call;
use factor_core::{CalcError, Factor, Response, Session, SessionState, TranscriptEntry};
use pretty_assertions::assert_eq;

fn run(
    session: &mut Session,
    lines: &[&str],
) -> Vec<Response> {
    lines.iter().map(|line| session.submit(line)).collect()
}

fn last_output(session: &Session) -> Option<String> {
    session
        .transcript()
        .last()
        .and_then(|entry| entry.output.clone())
}

// =============================================================================
// factor calls
// =============================================================================

#[test]
fn factor_call_with_percent_sign() {
    let call = parse_factor_call("A_P(2.5%, 10)").unwrap();

    assert_eq!(call.factor, Factor::CapitalRecovery);
    assert_eq!(call.rate, 0.025);
    assert_eq!(call.periods, 10);

    let expected = 0.025 * 1.025_f64.powi(10) / (1.025_f64.powi(10) - 1.0);
    assert!((call.evaluate() - expected).abs() < 1e-12);
    assert!((call.evaluate() - 0.1142588).abs() < 1e-6);
}

#[test]
fn factor_call_zero_rate_zero_periods_is_infinite() {
    let mut session = Session::new();

    session.submit("A_P(0%, 0)");

    assert_eq!(last_output(&session).as_deref(), Some("Result: inf"));
}

#[test]
fn factor_identities_hold_at_one_rate() {
    let (i, n) = (0.07, 12);
    let a_p = Factor::CapitalRecovery.evaluate(i, n);
    let p_a = Factor::SeriesPresentWorth.evaluate(i, n);
    let f_a = Factor::SeriesCompoundAmount.evaluate(i, n);
    let a_f = Factor::SinkingFund.evaluate(i, n);
    let a_g = Factor::GradientUniformSeries.evaluate(i, n);
    let p_g = Factor::GradientPresentWorth.evaluate(i, n);

    assert!((a_p - 1.0 / p_a).abs() < 1e-12);
    assert!((f_a * a_f - 1.0).abs() < 1e-12);
    assert_eq!(p_g, a_g * p_a);
}

// =============================================================================
// variables and expressions
// =============================================================================

#[test]
fn assigned_variable_renders_with_decimal_point() {
    let mut session = Session::new();

    run(&mut session, &["x = 5", "x"]);

    assert_eq!(last_output(&session).as_deref(), Some("x = 5.0"));
}

#[test]
fn percent_literal_only_rewrites_suffixed_numbers() {
    let mut session = Session::new();

    session.submit("5% + 10");

    assert_eq!(last_output(&session).as_deref(), Some("Result: 10.05"));
}

#[test]
fn loan_payment_worked_through_variables() {
    let mut session = Session::new();

    run(
        &mut session,
        &["principal = 20000", "rate = 6%", "payment = principal * A_P(rate, 5)"],
    );

    let payment = session.variables()["payment"];
    let expected = 20000.0 * Factor::CapitalRecovery.evaluate(0.06, 5);
    assert_eq!(payment, expected);
}

#[test]
fn sandbox_rejects_host_language_constructs() {
    let mut session = Session::new();

    for line in ["__import__('os')", "open(1)", "[1, 2]", "x; y"] {
        let response = session.submit(line);
        let entry = response.entry().unwrap();
        assert!(entry.is_error(), "{line} should be rejected");
    }
    assert!(session.variables().is_empty());
}

#[test]
fn evaluate_reports_typed_errors() {
    let session = Session::new();

    assert_eq!(
        session.evaluate("missing + 1"),
        Err(CalcError::UnknownIdentifier("missing".to_string()))
    );
    assert!(matches!(session.evaluate("sqrt(-1)"), Err(CalcError::Evaluation(_))));
    assert!(matches!(session.evaluate("(1 + 2"), Err(CalcError::Parse(_))));
}

// =============================================================================
// case scopes
// =============================================================================

#[test]
fn variable_from_closed_case_is_gone() {
    let mut session = Session::new();

    run(&mut session, &["case", "x = 1", "endcase", "x"]);

    assert_eq!(
        session.transcript().last(),
        Some(&TranscriptEntry::error(
            "x",
            "Variable 'x' not found in current scope."
        ))
    );
}

#[test]
fn case_does_not_see_parent_variables() {
    let mut session = Session::new();

    run(&mut session, &["x = 1", "case", "x"]);

    assert_eq!(
        last_output(&session).as_deref(),
        Some("Variable 'x' not found in current scope.")
    );
}

#[test]
fn endcase_without_case_changes_nothing() {
    let mut session = Session::new();
    run(&mut session, &["x = 1", "x"]);
    let before = session.transcript().len();

    let response = session.submit("endcase");

    assert_eq!(
        response,
        Response::Entry(TranscriptEntry::error("endcase", "No case to end."))
    );
    assert_eq!(session.transcript().len(), before + 1);
    assert_eq!(session.state(), SessionState::Root);
    assert_eq!(session.variables()["x"], 1.0);
}

#[test]
fn nested_cases_restore_in_order() {
    let mut session = Session::new();

    run(
        &mut session,
        &["x = 1", "case", "x = 2", "case", "x = 3", "endcase", "x"],
    );
    assert_eq!(last_output(&session).as_deref(), Some("x = 2.0"));

    run(&mut session, &["endcase", "x"]);
    assert_eq!(last_output(&session).as_deref(), Some("x = 1.0"));
    assert_eq!(session.depth(), 0);
}

#[test]
fn every_line_but_cls_and_quit_appends_one_entry() {
    let mut session = Session::new();
    let lines = ["help", "x = 1", "x", "y", "1 + 1", "1 +", "A_P(5, 10)"];

    run(&mut session, &lines);

    assert_eq!(session.transcript().len(), lines.len());

    session.submit("cls");
    session.submit("quit");
    assert!(session.transcript().is_empty());
}

// =============================================================================
// oversized input
// =============================================================================

#[test]
fn deeply_nested_input_is_an_error_not_a_crash() {
    let mut session = Session::new();
    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let signs = format!("{}1", "-".repeat(10_000));

    for line in [parens, signs] {
        let response = session.submit(&line);

        assert_eq!(
            response.entry().and_then(|entry| entry.output.as_deref()),
            Some("Error: invalid syntax: expression is nested too deeply")
        );
    }

    session.submit("x = (((2)))");
    assert_eq!(session.variables().get("x"), Some(&2.0));
}

#[test]
fn nested_assignment_is_rejected_and_binds_nothing() {
    let mut session = Session::new();

    session.submit(&format!("x = {}1{}", "(".repeat(10_000), ")".repeat(10_000)));

    assert_eq!(
        last_output(&session).as_deref(),
        Some("Error in assignment: invalid syntax: expression is nested too deeply")
    );
    assert!(session.variables().is_empty());
}

#[test]
fn long_flat_expression_evaluates() {
    let mut session = Session::new();

    session.submit(&format!("{}1", "1+".repeat(10_000)));

    assert_eq!(last_output(&session).as_deref(), Some("Result: 10001.0"));
}
