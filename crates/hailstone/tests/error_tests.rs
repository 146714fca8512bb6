//! Error taxonomy and fail-fast behavior

use hailstone::prelude::*;
use hailstone::explore;

#[test]
fn test_invalid_start_zero() {
    let err = explore(0, None, None).unwrap_err();
    assert_eq!(err, ExplorerError::InvalidStart { value: 0 });
}

#[test]
fn test_invalid_start_negative() {
    let err = explore(-5, None, None).unwrap_err();
    assert_eq!(err, ExplorerError::InvalidStart { value: -5 });
}

#[test]
fn test_bad_start_and_bad_rules_still_fail_fast() {
    // Both inputs are invalid; either error is acceptable, but no sequence
    // may be produced.
    let err = explore(-1, None, Some(("n //", "n"))).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::RuleEvaluation(_) | ExplorerError::InvalidStart { .. }
    ));
}

#[test]
fn test_malformed_rule_is_rule_evaluation_error() {
    let err = explore(7, None, Some(("n +", "n"))).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::RuleEvaluation(RuleError::ParseError { .. })
    ));
}

#[test]
fn test_unknown_name_is_rule_evaluation_error() {
    let err = explore(7, None, Some(("n // 2", "steps + 1"))).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::RuleEvaluation(RuleError::UnknownVariable { .. })
    ));
}

#[test]
fn test_runtime_division_by_zero_surfaces() {
    let err = explore(4, None, Some(("n // (n - 4)", "n"))).unwrap_err();
    assert_eq!(
        err,
        ExplorerError::RuleEvaluation(RuleError::DivisionByZero { value: 4 })
    );
}

#[test]
fn test_overflowing_rule_surfaces() {
    // Squaring grows without bound and overflows i64 quickly
    let err = explore(3, None, Some(("n * n", "n * n"))).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::RuleEvaluation(RuleError::Overflow { .. })
    ));
}

#[test]
fn test_step_cap_is_not_an_error() {
    // Truncation is informational: valid data, flagged incomplete
    let seq = explore(27, Some(3), None).unwrap();
    assert_eq!(seq.termination(), Termination::CapExhausted);
    assert!(!seq.is_complete());
    assert_eq!(seq.len(), 4);
}

#[test]
fn test_errors_are_displayable() {
    let err = explore(0, None, None).unwrap_err();
    assert!(!format!("{}", err).is_empty());

    let err = explore(7, None, Some(("(", "n"))).unwrap_err();
    assert!(!format!("{}", err).is_empty());
}
