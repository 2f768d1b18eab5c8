//! Projection of a percentile rank onto the reference sequence.
//!
//! `idx = rank / 100 * (M - 1)`, clamped to `[0, M - 1]`. Whole indices read the
//! element directly; fractional indices follow the configured `MappingPolicy`.

use serde::Serialize;

use crate::domain::MappingPolicy;
use crate::lucky::reference::ReferenceSequence;

/// Indices closer than this to a whole number are treated as exact positions.
const INDEX_EPSILON: f64 = 1e-9;

/// Result of projecting a rank onto the reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MappedValue {
    /// Clamped fractional index into the sequence.
    pub index: f64,
    /// Whether `index` landed on a whole position.
    pub exact_position: bool,
    pub policy: MappingPolicy,
    /// Threshold value used for selection (integral under `Floor`).
    pub value: f64,
}

pub fn map_percentile(rank: f64, sequence: &ReferenceSequence, policy: MappingPolicy) -> MappedValue {
    let values = sequence.values();
    let last = values.len() - 1;

    let raw = rank / 100.0 * last as f64;
    let index = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, last as f64) };

    let nearest = index.round();
    if (index - nearest).abs() < INDEX_EPSILON {
        return MappedValue {
            index,
            exact_position: true,
            policy,
            value: values[nearest as usize] as f64,
        };
    }

    let lower = index.floor() as usize;
    let upper = (index.ceil() as usize).min(last);
    let value = match policy {
        MappingPolicy::Floor => values[lower] as f64,
        MappingPolicy::Interpolate => {
            let fraction = index - lower as f64;
            let lo = values[lower] as f64;
            let hi = values[upper] as f64;
            lo + (hi - lo) * fraction
        }
    };

    MappedValue {
        index,
        exact_position: false,
        policy,
        value,
    }
}
