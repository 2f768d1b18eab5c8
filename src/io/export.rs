//! Result exports.
//!
//! - lucky-number outcome as pretty JSON (with a generation timestamp)
//! - vote tally as CSV, easy to open in a spreadsheet

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{LuckyConfig, Nominee, PrizeBand};
use crate::error::AppError;
use crate::lucky::LuckyOutcome;
use crate::tally::TallyResult;

/// Saved lucky-number result (JSON).
#[derive(Debug, Serialize)]
pub struct LuckyExport<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub config: &'a LuckyConfig,
    pub outcome: &'a LuckyOutcome,
    pub winners: &'a [Nominee],
    pub prize: Option<&'a PrizeBand>,
}

#[derive(Debug, Serialize)]
struct TallyRow<'a> {
    nominee_id: &'a str,
    name: &'a str,
    department: &'a str,
    votes: u64,
    winner: bool,
}

/// Write a lucky-number result JSON file.
pub fn write_lucky_json(path: &Path, export: &LuckyExport<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create result JSON '{}': {e}", path.display())))?;
    write_lucky_json_to(file, export)
}

pub fn write_lucky_json_to<W: Write>(writer: W, export: &LuckyExport<'_>) -> Result<(), AppError> {
    serde_json::to_writer_pretty(writer, export)
        .map_err(|e| AppError::new(4, format!("Failed to write result JSON: {e}")))
}

/// Write per-nominee vote counts to a CSV file.
pub fn write_tally_csv(path: &Path, tally: &TallyResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_tally_csv_to(file, tally)
}

pub fn write_tally_csv_to<W: Write>(writer: W, tally: &TallyResult) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for c in &tally.counts {
        wtr.serialize(TallyRow {
            nominee_id: &c.id,
            name: &c.name,
            department: c.department.as_deref().unwrap_or(""),
            votes: c.votes,
            winner: tally.winners.contains(&c.id),
        })
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    wtr.flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
