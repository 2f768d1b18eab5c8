//! Rank-based (midpoint) percentile of the special number.
//!
//! `percentile = (L + 0.5 * E) / N * 100` where `L` counts values strictly below
//! the special number and `E` counts values equal to it.

use serde::Serialize;

use crate::domain::{NumberSet, PercentileRounding};

/// Percentile rank of the special number within its set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileRank {
    /// Full-precision rank.
    pub exact: f64,
    /// Rank after rounding; the only value the mapper sees.
    pub value: f64,
    pub rounding: PercentileRounding,
    pub less: usize,
    pub equal: usize,
    pub total: usize,
}

impl PercentileRank {
    /// 1-based position of the special number in the sorted set.
    pub fn position(&self) -> usize {
        self.less + 1
    }

    /// Rank rounded to a whole percent (for prize bands).
    pub fn whole_percent(&self) -> i64 {
        self.value.round() as i64
    }
}

pub fn percentile_rank(numbers: &NumberSet, rounding: PercentileRounding) -> PercentileRank {
    let special = numbers.special();
    let values = numbers.values();

    let less = values.iter().filter(|&&v| v < special).count();
    let equal = values.iter().filter(|&&v| v == special).count();
    let total = values.len();

    let exact = (less as f64 + 0.5 * equal as f64) / total as f64 * 100.0;

    PercentileRank {
        exact,
        value: rounding.apply(exact),
        rounding,
        less,
        equal,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NumberRange, Submission};
    use crate::lucky::validate::validate_submission;

    fn set(primary: &[i64], special: i64) -> NumberSet {
        validate_submission(&Submission::from_numbers(primary, special), NumberRange::default()).unwrap()
    }

    #[test]
    fn minimum_special() {
        let rank = percentile_rank(&set(&[10, 20, 30, 40, 50, 55], 3), PercentileRounding::Exact);
        assert!((rank.exact - 0.5 / 7.0 * 100.0).abs() < 1e-12);
        assert!((rank.exact - 7.142857).abs() < 1e-5);
        assert_eq!(rank.position(), 1);
    }

    #[test]
    fn maximum_special() {
        let rank = percentile_rank(&set(&[10, 20, 30, 40, 50, 1], 55), PercentileRounding::Exact);
        assert!((rank.exact - 6.5 / 7.0 * 100.0).abs() < 1e-12);
        assert!((rank.exact - 92.857142).abs() < 1e-5);
        assert_eq!(rank.position(), 7);
    }

    #[test]
    fn strictly_inside_and_monotone() {
        let others = [8, 16, 24, 32, 40, 48];
        let mut prev = 0.0;
        for special in [1, 9, 17, 25, 33, 41, 49] {
            let rank = percentile_rank(&set(&others, special), PercentileRounding::Exact);
            assert!(rank.exact > 0.0 && rank.exact < 100.0);
            assert!(rank.exact > prev, "rank must grow with position");
            prev = rank.exact;
        }
    }

    #[test]
    fn rounding_only_touches_value() {
        let numbers = set(&[10, 20, 30, 40, 50, 55], 3);
        let rank = percentile_rank(&numbers, PercentileRounding::Integer);
        assert_eq!(rank.value, 7.0);
        assert!((rank.exact - 7.142857).abs() < 1e-5);

        let rank = percentile_rank(&numbers, PercentileRounding::FourDecimals);
        assert!((rank.value - 7.1429).abs() < 1e-12);
    }
}
