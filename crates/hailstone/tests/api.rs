//! Integration tests for the public API

use hailstone::prelude::*;
use hailstone::{collatz, explore};

#[test]
fn test_collatz_trivial_start() {
    let seq = collatz(1).unwrap();
    assert_eq!(seq.values(), &[1]);
    assert_eq!(seq.termination(), Termination::ReachedOne);
}

#[test]
fn test_collatz_known_sequence_for_seven() {
    let seq = collatz(7).unwrap();
    assert_eq!(
        seq.values(),
        &[7, 22, 11, 34, 17, 52, 26, 13, 40, 20, 10, 5, 16, 8, 4, 2, 1]
    );
}

#[test]
fn test_collatz_power_of_two_descends_directly() {
    let seq = collatz(16).unwrap();
    assert_eq!(seq.values(), &[16, 8, 4, 2, 1]);
}

#[test]
fn test_stats_for_known_sequence() {
    let seq = collatz(7).unwrap();
    let stats = SequenceStats::of(&seq);
    assert_eq!(stats.length, 17);
    assert_eq!(stats.max_value, 52);
    assert_eq!(stats.odd_count + stats.even_count, 17);
    assert!(stats.odd_even_ratio().is_finite());
}

#[test]
fn test_explore_with_cap_truncates() {
    let seq = explore(27, Some(5), None).unwrap();
    assert_eq!(seq.len(), 6);
    assert!(!seq.is_complete());
    assert_eq!(seq.termination(), Termination::CapExhausted);
}

#[test]
fn test_explore_custom_rules_cycle() {
    // Doubling evens and fixing odds: 3 is odd and maps to itself
    let seq = explore(3, None, Some(("2 * n", "n"))).unwrap();
    assert_eq!(seq.values(), &[3, 3]);
    assert_eq!(seq.termination(), Termination::Cycle);
}

#[test]
fn test_explore_custom_rules_longer_cycle() {
    // 4 -> 2 -> 1 -> 4 under the Collatz expressions run as custom rules
    let seq = explore(4, None, Some(("n // 2", "3 * n + 1"))).unwrap();
    assert_eq!(seq.values(), &[4, 2, 1, 4]);
    assert_eq!(seq.termination(), Termination::Cycle);
}

#[test]
fn test_sequence_accessors() {
    let seq = collatz(6).unwrap();
    assert_eq!(seq.start(), 6);
    assert_eq!(seq.last(), 1);
    assert!(!seq.is_empty());
    assert_eq!(seq.iter().count(), seq.len());
    assert_eq!((&seq).into_iter().copied().max(), Some(16));
}

#[test]
fn test_rule_api_direct_use() {
    let rule = Rule::parse("(n + 3) ** 2").unwrap();
    assert_eq!(rule.eval(2).unwrap(), 25);
    assert_eq!(rule.source(), "(n + 3) ** 2");
}

#[test]
fn test_ruleset_default_is_canonical() {
    assert!(Ruleset::default().is_canonical());
}

#[test]
fn test_generate_sequence_with_explicit_ruleset() {
    let ruleset = Ruleset::custom("n // 2", "n * 3 + 1").unwrap();
    let seq = generate_sequence(7, Some(2), &ruleset).unwrap();
    assert_eq!(seq.values(), &[7, 22, 11]);
}
