//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - read straight from the event data files (JSON/CSV)
//! - used in-memory during calculation
//! - exported again as part of a result file

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DrawError;

/// Numbers in a full submission: six primaries plus the special number.
pub const NUMBER_COUNT: usize = 7;

/// Primary numbers in a submission.
pub const PRIMARY_COUNT: usize = NUMBER_COUNT - 1;

pub const DEFAULT_NUMBER_MIN: i64 = 1;
pub const DEFAULT_NUMBER_MAX: i64 = 55;

/// Nominee slots per vote record.
pub const DEFAULT_VOTE_SLOTS: usize = 3;

/// Closed range `[min, max]` that every submitted number must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberRange {
    min: i64,
    max: i64,
}

impl NumberRange {
    /// Build a range; it must be able to hold seven distinct numbers.
    pub fn new(min: i64, max: i64) -> Result<Self, DrawError> {
        // `max - min` only overflows for ranges far wider than we need.
        let wide_enough = match max.checked_sub(min) {
            Some(span) => span >= (NUMBER_COUNT as i64 - 1),
            None => max > min,
        };
        if !wide_enough {
            return Err(DrawError::InvalidRange {
                min,
                max,
                needed: NUMBER_COUNT,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for NumberRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_NUMBER_MIN,
            max: DEFAULT_NUMBER_MAX,
        }
    }
}

/// A raw participant submission, before validation.
///
/// `None` marks an entry that did not parse as an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub primary: Vec<Option<i64>>,
    pub special: Option<i64>,
}

impl Submission {
    /// Parse text fields as typed by a participant.
    pub fn parse<S: AsRef<str>>(primary: &[S], special: &str) -> Self {
        Self {
            primary: primary.iter().map(|s| parse_number(s.as_ref())).collect(),
            special: parse_number(special),
        }
    }

    pub fn from_numbers(primary: &[i64], special: i64) -> Self {
        Self {
            primary: primary.iter().copied().map(Some).collect(),
            special: Some(special),
        }
    }

    /// All seven entries in submission order, special last.
    pub fn entries(&self) -> impl Iterator<Item = Option<i64>> + '_ {
        self.primary.iter().copied().chain(std::iter::once(self.special))
    }
}

/// Parse one submitted number. Surrounding whitespace is ignored.
pub fn parse_number(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Seven validated, pairwise-distinct numbers. The last one is the special number.
///
/// Only `validate::validate_submission` constructs this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberSet {
    numbers: [i64; NUMBER_COUNT],
}

impl NumberSet {
    pub(crate) fn from_validated(numbers: [i64; NUMBER_COUNT]) -> Self {
        Self { numbers }
    }

    pub fn special(&self) -> i64 {
        self.numbers[NUMBER_COUNT - 1]
    }

    pub fn primaries(&self) -> &[i64] {
        &self.numbers[..PRIMARY_COUNT]
    }

    /// All numbers in submission order.
    pub fn values(&self) -> &[i64] {
        &self.numbers
    }

    pub fn sorted(&self) -> Vec<i64> {
        let mut out = self.numbers.to_vec();
        out.sort_unstable();
        out
    }
}

/// How the percentile rank is rounded before it is projected onto the reference sequence.
///
/// The rounded value is the only one used downstream; the exact value is kept for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PercentileRounding {
    /// Keep full `f64` precision.
    Exact,
    /// Round to 4 decimal places (e.g. `7.1429`).
    #[default]
    FourDecimals,
    /// Round to the nearest whole percent.
    Integer,
}

impl PercentileRounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            PercentileRounding::Exact => value,
            PercentileRounding::FourDecimals => (value * 10_000.0).round() / 10_000.0,
            PercentileRounding::Integer => value.round(),
        }
    }
}

/// What to do when the projected index falls between two reference positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MappingPolicy {
    /// Take the element at `floor(idx)`.
    Floor,
    /// Interpolate linearly between `floor(idx)` and `ceil(idx)`.
    #[default]
    Interpolate,
}

/// Lucky-number field of a roster entry.
///
/// Roster exports carry it either as a JSON number or as a string; anything
/// else is kept so it can be reported when the entry is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LuckyField {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl LuckyField {
    pub fn parse(&self) -> Option<i64> {
        match self {
            LuckyField::Number(n) => Some(*n),
            LuckyField::Text(s) => parse_number(s),
            LuckyField::Other(_) => None,
        }
    }

    /// The raw value as text (for diagnostics).
    pub fn raw(&self) -> String {
        match self {
            LuckyField::Number(n) => n.to_string(),
            LuckyField::Text(s) => s.clone(),
            LuckyField::Other(v) => v.to_string(),
        }
    }
}

/// A nominee roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nominee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub lucky_number: Option<LuckyField>,
}

impl Nominee {
    /// Parsed lucky number, if the entry has a usable one.
    pub fn parsed_lucky_number(&self) -> Option<i64> {
        self.lucky_number.as_ref().and_then(LuckyField::parse)
    }
}

/// One ballot: up to `slots` nominee references in preference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    #[serde(default)]
    pub voter: Option<String>,
    #[serde(default)]
    pub nominees: Vec<String>,
}

/// A grand-prize draw participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    /// Ticket count for weighted draws (missing means 1).
    #[serde(default)]
    pub tickets: Option<u32>,
}

impl Participant {
    pub fn tickets(&self) -> u32 {
        self.tickets.unwrap_or(1)
    }
}

/// Prize awarded for an inclusive band of whole-percent ranks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeBand {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

impl PrizeBand {
    pub fn contains(&self, percent: i64) -> bool {
        (self.min..=self.max).contains(&percent)
    }
}

/// Calculation settings for a lucky-number run.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LuckyConfig {
    pub range: NumberRange,
    pub rounding: PercentileRounding,
    pub mapping: MappingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_needs_room_for_seven_numbers() {
        assert!(NumberRange::new(1, 7).is_ok());
        assert!(NumberRange::new(1, 6).is_err());
        assert!(NumberRange::new(10, 1).is_err());
        assert!(NumberRange::new(i64::MIN, i64::MAX).is_ok());
    }

    #[test]
    fn config_range_is_written_as_bounds() {
        let value = serde_json::to_value(LuckyConfig::default()).unwrap();
        assert_eq!(value["range"], serde_json::json!({"min": 1, "max": 55}));
    }

    #[test]
    fn rounding_policies() {
        let v = 100.0 / 14.0;
        assert_eq!(PercentileRounding::Exact.apply(v), v);
        assert!((PercentileRounding::FourDecimals.apply(v) - 7.1429).abs() < 1e-12);
        assert_eq!(PercentileRounding::Integer.apply(v), 7.0);
    }

    #[test]
    fn lucky_field_accepts_text_and_numbers() {
        let roster: Vec<Nominee> = serde_json::from_str(
            r#"[
                {"id": "N1", "name": "An", "lucky_number": "17"},
                {"id": "N2", "name": "Binh", "lucky_number": 23},
                {"id": "N3", "name": "Chi", "lucky_number": "n/a"},
                {"id": "N4", "name": "Dung", "lucky_number": 4.5},
                {"id": "N5", "name": "Em"}
            ]"#,
        )
        .unwrap();

        let parsed: Vec<Option<i64>> = roster.iter().map(Nominee::parsed_lucky_number).collect();
        assert_eq!(parsed, vec![Some(17), Some(23), None, None, None]);
    }

    #[test]
    fn submission_parse_marks_non_numeric() {
        let s = Submission::parse(&["1", " 2 ", "x", "4", "5", "6"], "7");
        assert_eq!(s.primary[1], Some(2));
        assert_eq!(s.primary[2], None);
        assert_eq!(s.entries().count(), NUMBER_COUNT);
    }
}
