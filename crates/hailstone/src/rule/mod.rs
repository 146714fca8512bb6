//! Transformation rules for sequence generation
//!
//! A [`Ruleset`] decides how the next sequence value is derived from the
//! current one: either the canonical Collatz step pair, or a user-supplied
//! [`RulePair`] of compiled arithmetic expressions (one for even values,
//! one for odd).

pub mod eval;
pub mod parser;

use tracing::debug;

use crate::core::RuleError;
use parser::{Expr, RuleParser};

/// A compiled rule expression: one unary integer function of `n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    source: String,
    expr: Expr,
}

impl Rule {
    /// Compile a rule from its expression source
    pub fn parse(source: &str) -> Result<Self, RuleError> {
        let expr = RuleParser::new().parse_expression(source)?;
        debug!(source, "Compiled rule expression");
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Evaluate the rule with `n` bound to `value`
    pub fn eval(&self, value: i64) -> Result<i64, RuleError> {
        eval::evaluate(&self.expr, value)
    }

    /// The expression source this rule was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A pair of rules keyed on the parity of the current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePair {
    even: Rule,
    odd: Rule,
}

impl RulePair {
    /// Compile a rule pair from expression sources
    pub fn parse(even: &str, odd: &str) -> Result<Self, RuleError> {
        Ok(Self {
            even: Rule::parse(even)?,
            odd: Rule::parse(odd)?,
        })
    }

    /// The rule applied to even values
    pub fn even(&self) -> &Rule {
        &self.even
    }

    /// The rule applied to odd values
    pub fn odd(&self) -> &Rule {
        &self.odd
    }

    /// Apply the parity-matching rule to `value`
    pub fn apply(&self, value: i64) -> Result<i64, RuleError> {
        if value % 2 == 0 {
            self.even.eval(value)
        } else {
            self.odd.eval(value)
        }
    }
}

/// The active transformation rules for a generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ruleset {
    /// The canonical Collatz step: halve if even, else triple and add one
    Canonical,
    /// User-supplied expressions for the even and odd cases
    Custom(RulePair),
}

impl Ruleset {
    /// Build a custom ruleset from expression sources
    pub fn custom(even: &str, odd: &str) -> Result<Self, RuleError> {
        Ok(Self::Custom(RulePair::parse(even, odd)?))
    }

    /// True for the canonical Collatz ruleset
    ///
    /// Only the canonical ruleset is known to target 1; the generator's
    /// stop-at-1 check applies exclusively to it.
    pub fn is_canonical(&self) -> bool {
        matches!(self, Ruleset::Canonical)
    }

    /// Apply one transformation step to `value`
    pub fn apply(&self, value: i64) -> Result<i64, RuleError> {
        match self {
            Ruleset::Canonical => collatz_step(value),
            Ruleset::Custom(pair) => pair.apply(value),
        }
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset::Canonical
    }
}

/// Perform a single step of the canonical Collatz operation
///
/// Even values halve (floor division, so negatives stay consistent with
/// custom `n // 2` rules); odd values map to `3n + 1` with overflow checked.
pub fn collatz_step(value: i64) -> Result<i64, RuleError> {
    if value % 2 == 0 {
        Ok(value.div_euclid(2))
    } else {
        value
            .checked_mul(3)
            .and_then(|tripled| tripled.checked_add(1))
            .ok_or(RuleError::overflow("collatz step", value))
    }
}
