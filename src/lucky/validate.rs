//! Submission validation.
//!
//! Rules are checked in a fixed order and the first violation wins:
//! 1. exactly six primary numbers
//! 2. every entry parsed as an integer
//! 3. every entry inside the configured range
//! 4. all seven entries pairwise distinct

use std::collections::HashMap;

use crate::domain::{NUMBER_COUNT, NumberRange, NumberSet, PRIMARY_COUNT, Submission};
use crate::error::ValidationError;

/// Validate a raw submission and turn it into a `NumberSet`.
pub fn validate_submission(
    submission: &Submission,
    range: NumberRange,
) -> Result<NumberSet, ValidationError> {
    if submission.primary.len() != PRIMARY_COUNT {
        return Err(ValidationError::WrongCount {
            expected: PRIMARY_COUNT,
            got: submission.primary.len(),
        });
    }

    let mut numbers = [0i64; NUMBER_COUNT];
    for (idx, entry) in submission.entries().enumerate() {
        numbers[idx] = entry.ok_or(ValidationError::NonNumeric { position: idx + 1 })?;
    }

    if let Some((idx, &value)) = numbers.iter().enumerate().find(|(_, v)| !range.contains(**v)) {
        return Err(ValidationError::OutOfRange {
            position: idx + 1,
            value,
            min: range.min(),
            max: range.max(),
        });
    }

    let mut seen: HashMap<i64, usize> = HashMap::with_capacity(NUMBER_COUNT);
    for (idx, &value) in numbers.iter().enumerate() {
        if let Some(&first) = seen.get(&value) {
            return Err(ValidationError::Duplicate {
                value,
                first,
                second: idx + 1,
            });
        }
        seen.insert(value, idx + 1);
    }

    Ok(NumberSet::from_validated(numbers))
}
