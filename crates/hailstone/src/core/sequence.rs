//! Sequence generation
//!
//! The generator repeatedly applies a [`Ruleset`] to a starting value and
//! collects the results until it reaches 1 (canonical rules only), detects a
//! cycle, or exhausts the step cap.

use std::collections::HashSet;

use tracing::{debug, span, trace, Level};

use crate::core::ExplorerError;
use crate::rule::Ruleset;

/// Safety guard applied when no explicit step cap is given.
///
/// Custom rules may never terminate; the cap stands in for a wall-clock
/// deadline.
pub const DEFAULT_STEP_CAP: usize = 1_000_000;

/// How a generated sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The canonical ruleset reached the value 1
    ReachedOne,
    /// A value reappeared; the repeat is included once at the end
    Cycle,
    /// The step cap ran out before termination; the data is valid but
    /// flagged as incomplete
    CapExhausted,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::ReachedOne => write!(f, "reached 1"),
            Termination::Cycle => write!(f, "cycle detected"),
            Termination::CapExhausted => write!(f, "step cap exhausted"),
        }
    }
}

/// A generated sequence together with how it terminated
///
/// Invariant: never empty; the first element is the starting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<i64>,
    termination: Termination,
}

impl Sequence {
    /// The sequence values, starting value first
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// How generation ended
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// False when the sequence was truncated by the step cap
    pub fn is_complete(&self) -> bool {
        self.termination != Termination::CapExhausted
    }

    /// Number of elements (always at least 1)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The starting value
    pub fn start(&self) -> i64 {
        self.values[0]
    }

    /// The final value
    pub fn last(&self) -> i64 {
        self.values[self.values.len() - 1]
    }

    /// Iterate over the values
    pub fn iter(&self) -> std::slice::Iter<'_, i64> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a i64;
    type IntoIter = std::slice::Iter<'a, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Generate a sequence from `start` under `ruleset`
///
/// # Arguments
/// * `start` - positive starting value; anything else fails with
///   [`ExplorerError::InvalidStart`]
/// * `step_cap` - maximum number of rule applications; `None` or `Some(0)`
///   selects [`DEFAULT_STEP_CAP`]
/// * `ruleset` - canonical Collatz or a custom pair
///
/// The returned sequence always has `start` as its first element and at most
/// `cap + 1` elements. Generation stops at 1 only under the canonical
/// ruleset; custom rules run until a value repeats or the cap runs out, with
/// the repeated value appended exactly once for visibility.
///
/// # Errors
/// Fails fast — no partial sequence is returned — on an invalid start or on
/// a rule evaluation failure (malformed arithmetic was already rejected at
/// compile time; this covers division by zero and overflow at runtime).
pub fn generate_sequence(
    start: i64,
    step_cap: Option<usize>,
    ruleset: &Ruleset,
) -> Result<Sequence, ExplorerError> {
    let generate_span = span!(Level::INFO, "generate_sequence", start, canonical = ruleset.is_canonical());
    let _enter = generate_span.enter();

    if start <= 0 {
        return Err(ExplorerError::invalid_start(start));
    }

    let cap = match step_cap {
        Some(0) | None => DEFAULT_STEP_CAP,
        Some(cap) => cap,
    };
    trace!(cap, "Starting generation");

    let mut values = vec![start];
    let mut seen: HashSet<i64> = HashSet::from([start]);
    let mut current = start;
    let mut termination = Termination::CapExhausted;

    for step in 0..cap {
        if current == 1 && ruleset.is_canonical() {
            termination = Termination::ReachedOne;
            break;
        }

        let next = ruleset.apply(current)?;
        trace!(step, current, next, "Applied rule");

        if !seen.insert(next) {
            // Include the repeated value once so the cycle is visible
            values.push(next);
            termination = Termination::Cycle;
            break;
        }

        values.push(next);
        current = next;
    }

    // A capped run can still land exactly on 1 at its final step
    if termination == Termination::CapExhausted && current == 1 && ruleset.is_canonical() {
        termination = Termination::ReachedOne;
    }

    debug!(
        length = values.len(),
        %termination,
        "Generation completed"
    );

    Ok(Sequence {
        values,
        termination,
    })
}
