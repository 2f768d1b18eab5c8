//! Floor selection of the final lucky number.

use serde::Serialize;

use crate::lucky::reference::ReferenceSequence;

/// The chosen lucky number and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub lucky_number: i64,
    /// True when no candidate was `<=` the threshold and the smallest one was taken.
    pub fallback: bool,
}

/// Pick the largest candidate not exceeding `threshold`.
///
/// When the threshold sits below every candidate (possible for very low ranks
/// under interpolation), the smallest candidate is returned. This is a normal
/// outcome, not an error.
pub fn select_lucky_number(sequence: &ReferenceSequence, threshold: f64) -> Selection {
    match sequence.values().iter().rev().find(|&&v| v as f64 <= threshold) {
        Some(&lucky_number) => Selection {
            lucky_number,
            fallback: false,
        },
        None => Selection {
            lucky_number: sequence.first(),
            fallback: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[i64]) -> ReferenceSequence {
        ReferenceSequence::new(values.to_vec()).unwrap()
    }

    #[test]
    fn largest_not_exceeding_threshold() {
        let s = seq(&[10, 20, 30, 40, 50]);
        assert_eq!(select_lucky_number(&s, 25.0).lucky_number, 20);
        assert_eq!(select_lucky_number(&s, 30.0).lucky_number, 30);
        assert_eq!(select_lucky_number(&s, 1000.0).lucky_number, 50);
    }

    #[test]
    fn falls_back_to_minimum() {
        let sel = select_lucky_number(&seq(&[10, 20, 30]), 5.0);
        assert_eq!(sel.lucky_number, 10);
        assert!(sel.fallback);
    }

    #[test]
    fn result_is_always_a_member() {
        let s = seq(&[3, 3, 8, 21, 34, 34, 55]);
        let mut t = -5.0;
        while t < 70.0 {
            let sel = select_lucky_number(&s, t);
            assert!(s.contains(sel.lucky_number), "threshold {t} gave {}", sel.lucky_number);
            t += 0.25;
        }
    }
}
