//! Lucky-number resolution.
//!
//! Submission -> validated `NumberSet` -> percentile rank -> projection onto the
//! reference sequence -> floor selection. Everything here is deterministic: the
//! same submission and roster always give the same outcome.

use serde::Serialize;
use tracing::debug;

use crate::domain::{LuckyConfig, Nominee, NumberSet, Submission};
use crate::error::DrawError;

pub mod mapper;
pub mod percentile;
pub mod prize;
pub mod reference;
pub mod selector;
pub mod validate;

pub use mapper::{MappedValue, map_percentile};
pub use percentile::{PercentileRank, percentile_rank};
pub use prize::{find_prize, validate_bands};
pub use reference::{ReferenceSequence, ResolvedReference, SkippedEntry, resolve_reference};
pub use selector::{Selection, select_lucky_number};
pub use validate::validate_submission;

/// Every intermediate value of one lucky-number calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuckyOutcome {
    pub numbers: NumberSet,
    pub percentile: PercentileRank,
    pub reference: ReferenceSequence,
    pub skipped: Vec<SkippedEntry>,
    pub mapped: MappedValue,
    pub selection: Selection,
}

impl LuckyOutcome {
    pub fn lucky_number(&self) -> i64 {
        self.selection.lucky_number
    }
}

/// Resolve the lucky number for one submission against a nominee roster.
///
/// Fails with `DrawError::Validation` before touching the roster when the
/// submission is invalid, and with `DrawError::EmptyReference` when the roster
/// has no usable lucky numbers.
pub fn compute_lucky_number(
    submission: &Submission,
    roster: &[Nominee],
    config: &LuckyConfig,
) -> Result<LuckyOutcome, DrawError> {
    let numbers = validate_submission(submission, config.range)?;
    let percentile = percentile_rank(&numbers, config.rounding);

    let ResolvedReference { sequence, skipped } = resolve_reference(roster)?;
    let mapped = map_percentile(percentile.value, &sequence, config.mapping);
    let selection = select_lucky_number(&sequence, mapped.value);

    debug!(
        special = numbers.special(),
        rank = percentile.value,
        index = mapped.index,
        threshold = mapped.value,
        lucky = selection.lucky_number,
        fallback = selection.fallback,
        "lucky number resolved"
    );

    Ok(LuckyOutcome {
        numbers,
        percentile,
        reference: sequence,
        skipped,
        mapped,
        selection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LuckyField, MappingPolicy, NumberRange, PercentileRounding};
    use crate::error::ValidationError;

    fn roster(values: &[i64]) -> Vec<Nominee> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Nominee {
                id: format!("N{}", i + 1),
                name: format!("Nominee {}", i + 1),
                department: None,
                bio: None,
                thumbnail: None,
                lucky_number: Some(LuckyField::Text(v.to_string())),
            })
            .collect()
    }

    #[test]
    fn end_to_end_interpolated() {
        // Special 30 is 4th of 7: (3 + 0.5) / 7 = 50%. idx = 0.5 * 4 = 2 -> 30.
        let sub = Submission::from_numbers(&[5, 10, 20, 40, 50, 55], 30);
        let out = compute_lucky_number(&sub, &roster(&[50, 10, 40, 20, 30]), &LuckyConfig::default())
            .unwrap();
        assert_eq!(out.percentile.value, 50.0);
        assert!(out.mapped.exact_position);
        assert_eq!(out.lucky_number(), 30);
        assert!(!out.selection.fallback);
    }

    #[test]
    fn end_to_end_minimum_special_floor() {
        // 7.1429% over 5 candidates: idx 0.285716 -> floor -> 10.
        let sub = Submission::from_numbers(&[5, 10, 20, 40, 50, 55], 1);
        let config = LuckyConfig {
            mapping: MappingPolicy::Floor,
            ..LuckyConfig::default()
        };
        let out = compute_lucky_number(&sub, &roster(&[10, 20, 30, 40, 50]), &config).unwrap();
        assert_eq!(out.lucky_number(), 10);
        assert_eq!(out.mapped.value, 10.0);
    }

    #[test]
    fn duplicate_input_fails_before_roster() {
        let sub = Submission::from_numbers(&[1, 1, 2, 3, 4, 5], 6);
        let err = compute_lucky_number(&sub, &[], &LuckyConfig::default()).unwrap_err();
        assert!(matches!(err, DrawError::Validation(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn out_of_range_input() {
        let sub = Submission::from_numbers(&[0, 2, 3, 4, 5, 6], 7);
        let err = compute_lucky_number(&sub, &roster(&[1]), &LuckyConfig::default()).unwrap_err();
        assert!(matches!(err, DrawError::Validation(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn empty_roster_is_reported() {
        let sub = Submission::from_numbers(&[1, 2, 3, 4, 5, 6], 7);
        let err = compute_lucky_number(&sub, &[], &LuckyConfig::default()).unwrap_err();
        assert!(matches!(err, DrawError::EmptyReference));
    }

    #[test]
    fn repeated_calls_agree() {
        let sub = Submission::from_numbers(&[12, 3, 44, 27, 9, 51], 33);
        let r = roster(&[7, 77, 18, 29, 4, 61, 35, 35, 90]);
        let config = LuckyConfig {
            range: NumberRange::new(1, 99).unwrap(),
            rounding: PercentileRounding::Exact,
            mapping: MappingPolicy::Interpolate,
        };
        let a = compute_lucky_number(&sub, &r, &config).unwrap();
        let b = compute_lucky_number(&sub, &r, &config).unwrap();
        assert_eq!(a, b);
        assert!(a.reference.contains(a.lucky_number()));
    }
}
