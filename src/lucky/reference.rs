//! Reference sequence ("lucky-number chain") construction.
//!
//! The chain is rebuilt from the nominee roster on every calculation:
//! every parseable lucky number, sorted ascending. Duplicates are kept, so a
//! number declared by several nominees occupies several positions.

use serde::Serialize;
use tracing::warn;

use crate::domain::Nominee;
use crate::error::DrawError;

/// Sorted, non-empty sequence of candidate lucky numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSequence {
    values: Vec<i64>,
}

impl ReferenceSequence {
    /// Sort `values` ascending; fails on an empty input.
    pub fn new(mut values: Vec<i64>) -> Result<Self, DrawError> {
        if values.is_empty() {
            return Err(DrawError::EmptyReference);
        }
        values.sort_unstable();
        Ok(Self { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> i64 {
        self.values[0]
    }

    pub fn last(&self) -> i64 {
        self.values[self.values.len() - 1]
    }

    pub fn contains(&self, value: i64) -> bool {
        self.values.binary_search(&value).is_ok()
    }
}

/// A roster entry left out of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub id: String,
    /// Raw field value, or `None` when the field is missing.
    pub raw: Option<String>,
}

impl SkippedEntry {
    pub fn reason(&self) -> String {
        match &self.raw {
            Some(raw) => format!("lucky number '{raw}' is not an integer"),
            None => "no lucky number".to_string(),
        }
    }
}

/// Reference sequence plus the entries that could not contribute to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedReference {
    pub sequence: ReferenceSequence,
    pub skipped: Vec<SkippedEntry>,
}

/// Build the reference sequence from a roster.
///
/// Malformed or missing lucky numbers are skipped with a warning. Fails with
/// `DrawError::EmptyReference` when nothing usable remains.
pub fn resolve_reference(roster: &[Nominee]) -> Result<ResolvedReference, DrawError> {
    let mut values = Vec::with_capacity(roster.len());
    let mut skipped = Vec::new();

    for nominee in roster {
        match nominee.parsed_lucky_number() {
            Some(v) => values.push(v),
            None => {
                let entry = SkippedEntry {
                    id: nominee.id.clone(),
                    raw: nominee.lucky_number.as_ref().map(|f| f.raw()),
                };
                warn!(nominee = %entry.id, "skipping roster entry: {}", entry.reason());
                skipped.push(entry);
            }
        }
    }

    let sequence = ReferenceSequence::new(values)?;
    Ok(ResolvedReference { sequence, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LuckyField;

    fn nominee(id: &str, lucky: Option<LuckyField>) -> Nominee {
        Nominee {
            id: id.to_string(),
            name: id.to_string(),
            department: None,
            bio: None,
            thumbnail: None,
            lucky_number: lucky,
        }
    }

    #[test]
    fn sorts_and_keeps_duplicates() {
        let roster = vec![
            nominee("A", Some(LuckyField::Text("30".into()))),
            nominee("B", Some(LuckyField::Number(10))),
            nominee("C", Some(LuckyField::Text(" 30 ".into()))),
            nominee("D", Some(LuckyField::Number(20))),
        ];
        let resolved = resolve_reference(&roster).unwrap();
        assert_eq!(resolved.sequence.values(), &[10, 20, 30, 30]);
        assert!(resolved.skipped.is_empty());
    }

    #[test]
    fn skips_malformed_entries() {
        let roster = vec![
            nominee("A", Some(LuckyField::Text("seven".into()))),
            nominee("B", None),
            nominee("C", Some(LuckyField::Number(42))),
        ];
        let resolved = resolve_reference(&roster).unwrap();
        assert_eq!(resolved.sequence.values(), &[42]);
        assert_eq!(resolved.skipped.len(), 2);
        assert_eq!(resolved.skipped[0].raw.as_deref(), Some("seven"));
        assert_eq!(resolved.skipped[1].raw, None);
    }

    #[test]
    fn empty_when_nothing_parses() {
        let roster = vec![nominee("A", None), nominee("B", Some(LuckyField::Text("".into())))];
        assert!(matches!(resolve_reference(&roster), Err(DrawError::EmptyReference)));
        assert!(matches!(resolve_reference(&[]), Err(DrawError::EmptyReference)));
    }
}
