//! Hailstone - Explore Collatz-style sequences with custom rule pairs
//!
//! A library for generating hailstone sequences: starting from a positive
//! integer, a transformation rule is applied repeatedly until the sequence
//! reaches 1, revisits a value, or hits a step cap. The canonical Collatz
//! rule (halve if even, else triple and add one) is built in; custom rule
//! pairs are compiled from a restricted arithmetic expression grammar so
//! user input can never execute arbitrary code.
//!
//! # Quick Start
//!
//! ```rust
//! use hailstone::collatz;
//!
//! let seq = collatz(7).unwrap();
//! assert_eq!(seq.values().first(), Some(&7));
//! assert_eq!(seq.last(), 1);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, build the pieces yourself:
//!
//! ```rust
//! use hailstone::prelude::*;
//!
//! // A custom rule pair: expressions of the single variable `n`
//! let ruleset = Ruleset::custom("n // 2", "5 * n - 1").unwrap();
//! let seq = generate_sequence(9, Some(100), &ruleset).unwrap();
//!
//! let stats = SequenceStats::of(&seq);
//! assert_eq!(stats.length, seq.len());
//! ```

pub mod core;
pub mod rule;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        generate_sequence, ExplorerError, RuleError, Sequence, SequenceStats, Termination,
        DEFAULT_STEP_CAP,
    };
    pub use crate::rule::{collatz_step, Rule, RulePair, Ruleset};
}

use rule::Ruleset;

/// Generate the canonical Collatz sequence for `start`
///
/// Uses the default step cap. This is the simplest entry point.
///
/// # Example
/// ```rust
/// use hailstone::collatz;
///
/// let seq = collatz(6).unwrap();
/// assert_eq!(seq.values(), &[6, 3, 10, 5, 16, 8, 4, 2, 1]);
/// ```
pub fn collatz(start: i64) -> Result<Sequence, ExplorerError> {
    generate_sequence(start, None, &Ruleset::Canonical)
}

/// Generate a sequence with optional cap and custom rule expressions
///
/// `rules` is an optional `(even, odd)` pair of expression sources; `None`
/// selects the canonical Collatz rules. A `step_cap` of `None` or `Some(0)`
/// selects the default cap.
///
/// # Example
/// ```rust
/// use hailstone::{explore, Termination};
///
/// // An identity rule cycles immediately
/// let seq = explore(4, None, Some(("n", "n"))).unwrap();
/// assert_eq!(seq.values(), &[4, 4]);
/// assert_eq!(seq.termination(), Termination::Cycle);
/// ```
pub fn explore(
    start: i64,
    step_cap: Option<usize>,
    rules: Option<(&str, &str)>,
) -> Result<Sequence, ExplorerError> {
    let ruleset = match rules {
        Some((even, odd)) => Ruleset::custom(even, odd)?,
        None => Ruleset::Canonical,
    };
    generate_sequence(start, step_cap, &ruleset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collatz_reaches_one() {
        let seq = collatz(27).unwrap();
        assert_eq!(seq.last(), 1);
        assert_eq!(seq.termination(), Termination::ReachedOne);
    }

    #[test]
    fn test_explore_defaults_to_canonical() {
        assert_eq!(explore(7, None, None).unwrap(), collatz(7).unwrap());
    }

    #[test]
    fn test_explore_with_custom_rules() {
        let seq = explore(10, Some(5), Some(("n + 2", "n + 1"))).unwrap();
        assert_eq!(seq.values(), &[10, 12, 14, 16, 18, 20]);
    }

    #[test]
    fn test_explore_invalid_start() {
        assert!(explore(0, None, None).is_err());
        assert!(explore(-5, None, None).is_err());
    }

    #[test]
    fn test_explore_bad_rule_expression() {
        let result = explore(7, None, Some(("import os", "n")));
        assert!(result.is_err());
    }
}
