//! Summary statistics over generated sequences

use std::fmt;

use crate::core::Sequence;

/// Read-only summary of a sequence
///
/// Pure and total over any sequence the generator can return (sequences are
/// never empty, so `max_value` always exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStats {
    /// Number of elements
    pub length: usize,
    /// Largest value in the sequence
    pub max_value: i64,
    /// Count of odd elements
    pub odd_count: usize,
    /// Count of even elements
    pub even_count: usize,
}

impl SequenceStats {
    /// Compute statistics for a sequence
    pub fn of(sequence: &Sequence) -> Self {
        Self::from_values(sequence.values())
    }

    /// Compute statistics from raw values
    ///
    /// Callers outside the generator (e.g. tests) can use this directly;
    /// the slice must be non-empty.
    pub fn from_values(values: &[i64]) -> Self {
        let odd_count = values.iter().filter(|v| *v % 2 != 0).count();
        let max_value = values.iter().copied().max().unwrap_or(0);
        Self {
            length: values.len(),
            max_value,
            odd_count,
            even_count: values.len() - odd_count,
        }
    }

    /// Ratio of odd to even elements
    ///
    /// Positive infinity when there are no even elements; displayed as a
    /// distinct "inf" marker, never an error.
    pub fn odd_even_ratio(&self) -> f64 {
        if self.even_count == 0 {
            f64::INFINITY
        } else {
            self.odd_count as f64 / self.even_count as f64
        }
    }
}

impl fmt::Display for SequenceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Length:         {}", self.length)?;
        writeln!(f, "Maximum value:  {}", self.max_value)?;
        writeln!(f, "Odd count:      {}", self.odd_count)?;
        writeln!(f, "Even count:     {}", self.even_count)?;
        let ratio = self.odd_even_ratio();
        if ratio.is_infinite() {
            write!(f, "Odd/even ratio: inf")
        } else {
            write!(f, "Odd/even ratio: {:.3}", ratio)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_for_known_sequence() {
        let values = [7, 22, 11, 34, 17, 52, 26, 13, 40, 20, 10, 5, 16, 8, 4, 2, 1];
        let stats = SequenceStats::from_values(&values);
        assert_eq!(stats.length, 17);
        assert_eq!(stats.max_value, 52);
        assert_eq!(stats.odd_count + stats.even_count, 17);
        assert_eq!(stats.odd_count, 6);
        assert_eq!(stats.even_count, 11);
    }

    #[test]
    fn test_stats_all_odd_sequence() {
        let stats = SequenceStats::from_values(&[1, 3, 5, 7]);
        assert_eq!(stats.even_count, 0);
        assert_eq!(stats.odd_count, 4);
        assert_eq!(stats.odd_even_ratio(), f64::INFINITY);
    }

    #[test]
    fn test_stats_negative_values() {
        let stats = SequenceStats::from_values(&[-3, -2, 5]);
        assert_eq!(stats.odd_count, 2);
        assert_eq!(stats.even_count, 1);
        assert_eq!(stats.max_value, 5);
    }

    #[test]
    fn test_stats_display_finite_ratio() {
        let stats = SequenceStats::from_values(&[1, 2]);
        let text = format!("{}", stats);
        assert!(text.contains("Length:         2"));
        assert!(text.contains("Odd/even ratio: 1.000"));
    }

    #[test]
    fn test_stats_display_infinite_ratio() {
        let stats = SequenceStats::from_values(&[1, 3]);
        let text = format!("{}", stats);
        assert!(text.contains("Odd/even ratio: inf"));
    }
}
