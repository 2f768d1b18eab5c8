//! Event data ingest.
//!
//! Each file kind has exactly one schema:
//! - nominee roster: JSON array of `Nominee`
//! - participants: JSON array of `Participant`
//! - prize bands: JSON array of `PrizeBand`
//! - vote records: JSON array of `VoteRecord`, or CSV with `voter` (optional)
//!   and `nominee_1..nominee_K` columns
//!
//! Design goals:
//! - **Strict schema** for whole files (a file that does not match is an error)
//! - **Row-level validation** for votes (skip bad rows, but report what happened)
//! - **No calculation logic here**

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Nominee, Participant, PrizeBand, VoteRecord};
use crate::error::DrawError;
use crate::lucky::validate_bands;

/// A CSV row that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Vote records plus CSV row diagnostics (always empty for JSON input).
#[derive(Debug, Clone, Default)]
pub struct VoteIngest {
    pub records: Vec<VoteRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

pub fn load_roster(path: &Path) -> Result<Vec<Nominee>, DrawError> {
    let roster: Vec<Nominee> = read_json(open(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), entries = roster.len(), "loaded nominee roster");
    Ok(roster)
}

pub fn load_participants(path: &Path) -> Result<Vec<Participant>, DrawError> {
    let participants: Vec<Participant> = read_json(open(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), entries = participants.len(), "loaded participants");
    Ok(participants)
}

pub fn load_prize_bands(path: &Path) -> Result<Vec<PrizeBand>, DrawError> {
    let source_name = path.display().to_string();
    let bands: Vec<PrizeBand> = read_json(open(path)?, &source_name)?;
    validate_bands(&bands, &source_name)?;
    Ok(bands)
}

/// Load vote records; `.csv` files use the CSV schema, everything else is JSON.
pub fn load_votes(path: &Path, slots: usize) -> Result<VoteIngest, DrawError> {
    let source_name = path.display().to_string();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let ingest = if is_csv {
        read_votes_csv(open(path)?, &source_name, slots)?
    } else {
        read_votes_json(open(path)?, &source_name)?
    };

    debug!(path = %source_name, records = ingest.records.len(), "loaded vote records");
    Ok(ingest)
}

/// Parse a JSON document of type `T`.
pub fn read_json<T: DeserializeOwned, R: Read>(reader: R, source_name: &str) -> Result<T, DrawError> {
    serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| DrawError::input(source_name, format!("invalid JSON: {e}")))
}

/// Parse vote records from a JSON array.
///
/// Records without a single non-blank nominee are reported as row errors and
/// skipped, the same way empty CSV rows are. `line` is the 1-based record index.
pub fn read_votes_json<R: Read>(reader: R, source_name: &str) -> Result<VoteIngest, DrawError> {
    let records: Vec<VoteRecord> = read_json(reader, source_name)?;
    let mut ingest = VoteIngest {
        rows_read: records.len(),
        ..VoteIngest::default()
    };

    for (idx, record) in records.into_iter().enumerate() {
        if record.nominees.iter().all(|n| n.trim().is_empty()) {
            ingest.row_errors.push(RowError {
                line: idx + 1,
                message: "record has no nominee".to_string(),
            });
            continue;
        }
        ingest.records.push(record);
    }

    for err in &ingest.row_errors {
        warn!(source = source_name, record = err.line, "skipping vote record: {}", err.message);
    }

    Ok(ingest)
}

/// Parse vote records from CSV.
///
/// Only the first `slots` nominee columns are read. Rows with no nominee at
/// all are reported as row errors and skipped.
pub fn read_votes_csv<R: Read>(reader: R, source_name: &str, slots: usize) -> Result<VoteIngest, DrawError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DrawError::input(source_name, format!("failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let nominee_columns: Vec<usize> = (1..=slots)
        .filter_map(|i| header_map.get(&format!("nominee_{i}")).copied())
        .collect();
    if nominee_columns.is_empty() {
        return Err(DrawError::input(
            source_name,
            "missing nominee columns (expected `nominee_1`..`nominee_K`)",
        ));
    }
    let voter_column = header_map.get("voter").copied();

    let mut ingest = VoteIngest::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and lines are 1-based.
        let line = idx + 2;
        ingest.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                ingest.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let nominees: Vec<String> = nominee_columns
            .iter()
            .filter_map(|&col| record.get(col))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if nominees.is_empty() {
            ingest.row_errors.push(RowError {
                line,
                message: "row has no nominee".to_string(),
            });
            continue;
        }

        let voter = voter_column
            .and_then(|col| record.get(col))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        ingest.records.push(VoteRecord { voter, nominees });
    }

    for err in &ingest.row_errors {
        warn!(source = source_name, line = err.line, "skipping vote row: {}", err.message);
    }

    Ok(ingest)
}

fn open(path: &Path) -> Result<File, DrawError> {
    File::open(path).map_err(|e| DrawError::input(path.display().to_string(), format!("failed to open: {e}")))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}
