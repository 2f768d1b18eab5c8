//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculation code stays clean and testable
//! - output changes are localized

use crate::domain::{Nominee, Participant, PrizeBand};
use crate::io::ingest::RowError;
use crate::lucky::LuckyOutcome;
use crate::tally::TallyResult;

/// Full calculation breakdown for one lucky-number run.
pub fn format_lucky_report(
    outcome: &LuckyOutcome,
    winners: &[Nominee],
    prize: Option<&PrizeBand>,
    bands_loaded: bool,
) -> String {
    let mut out = String::new();
    let numbers = &outcome.numbers;
    let rank = &outcome.percentile;
    let mapped = &outcome.mapped;

    out.push_str("=== gala - Lucky Number ===\n");
    out.push_str(&format!(
        "Numbers: {} | special {}\n",
        fmt_ints(numbers.primaries()),
        numbers.special()
    ));
    out.push_str(&format!(
        "Sorted: {} (special at position {} of {})\n",
        fmt_ints(&numbers.sorted()),
        rank.position(),
        rank.total
    ));
    out.push_str(&format!(
        "Percentile rank: {:.4}% (exact {:.6}, rounding {:?})\n",
        rank.value, rank.exact, rank.rounding
    ));
    out.push_str(&format!(
        "Lucky-number chain (M={}): [{}]\n",
        outcome.reference.len(),
        fmt_ints(outcome.reference.values())
    ));
    out.push_str(&format!(
        "Index: {:.4}{} | mapping {:?}\n",
        mapped.index,
        if mapped.exact_position { " (exact position)" } else { "" },
        mapped.policy
    ));
    out.push_str(&format!("Threshold: {:.4}\n", mapped.value));
    out.push_str(&format!("Lucky number: {}\n", outcome.lucky_number()));
    if outcome.selection.fallback {
        out.push_str("  (threshold below every candidate; smallest candidate taken)\n");
    }

    if !outcome.skipped.is_empty() {
        out.push_str(&format!("\nSkipped roster entries ({}):\n", outcome.skipped.len()));
        for s in &outcome.skipped {
            out.push_str(&format!("  - {}: {}\n", s.id, s.reason()));
        }
    }

    if bands_loaded {
        out.push('\n');
        match prize {
            Some(band) => out.push_str(&format!(
                "Prize: {} (band {}..={}%, rank {}%)\n",
                band.name,
                band.min,
                band.max,
                rank.whole_percent()
            )),
            None => out.push_str(&format!("Prize: none for rank {}%\n", rank.whole_percent())),
        }
    }

    out.push('\n');
    if winners.is_empty() {
        out.push_str("Winners: nobody holds this lucky number.\n");
    } else {
        out.push_str("Winners:\n");
        let rows = winners
            .iter()
            .map(|n| (n.id.as_str(), n.name.as_str(), n.department.as_deref()));
        out.push_str(&format_people(rows));
    }

    out
}

/// Ranked vote table plus winners.
pub fn format_tally(tally: &TallyResult, row_errors: &[RowError]) -> String {
    let mut out = String::new();

    out.push_str("=== gala - Vote Tally ===\n");
    out.push_str(&format!(
        "Ballots: {} | counted votes: {} | ignored: {}\n",
        tally.ballots, tally.counted, tally.ignored
    ));
    if !row_errors.is_empty() {
        out.push_str(&format!("Skipped rows: {}\n", row_errors.len()));
        for e in row_errors {
            out.push_str(&format!("  - line {}: {}\n", e.line, e.message));
        }
    }
    out.push('\n');

    if tally.counts.is_empty() {
        out.push_str("No votes were counted.\n");
        return out;
    }

    let header = format!("{:<4} {:<12} {:<28} {:<16} {:>6}", "#", "id", "name", "department", "votes");
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<12} {:-<28} {:-<16} {:->6}", "", "", "", "", "").trim_end());
    out.push('\n');

    for (idx, c) in tally.counts.iter().enumerate() {
        let marker = if tally.winners.contains(&c.id) { "*" } else { " " };
        out.push_str(
            format!(
                "{:<4} {:<12} {:<28} {:<16} {:>6}",
                format!("{}{}", idx + 1, marker),
                truncate(&c.id, 12),
                truncate(&c.name, 28),
                truncate(c.department.as_deref().unwrap_or(""), 16),
                c.votes
            )
            .trim_end(),
        );
        out.push('\n');
    }

    let label = if tally.winners.len() > 1 { "Winners (tie)" } else { "Winner" };
    let names: Vec<String> = tally
        .winner_entries()
        .map(|c| format!("{} ({} votes)", c.name, c.votes))
        .collect();
    out.push_str(&format!("\n{label}: {}\n", names.join(", ")));

    out
}

pub fn format_draw(winner: &Participant, pool_size: usize, weighted: bool) -> String {
    let mut out = String::new();
    out.push_str("=== gala - Grand Prize Draw ===\n");
    out.push_str(&format!(
        "Pool: {pool_size} participant(s) | {}\n",
        if weighted { "weighted by tickets" } else { "uniform" }
    ));
    out.push_str(&format!("Winner: {} ({})", winner.name, winner.id));
    if let Some(dept) = &winner.department {
        out.push_str(&format!(" - {dept}"));
    }
    out.push('\n');
    out
}

fn format_people<'a>(rows: impl Iterator<Item = (&'a str, &'a str, Option<&'a str>)>) -> String {
    let mut out = String::new();
    for (id, name, dept) in rows {
        out.push_str(
            format!(
                "  {:<12} {:<28} {:<16}",
                truncate(id, 12),
                truncate(name, 28),
                truncate(dept.unwrap_or(""), 16)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn fmt_ints(v: &[i64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    parts.join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
