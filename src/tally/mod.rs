//! Vote tallying.
//!
//! Each vote record names up to `slots` nominees. Every slot that resolves to a
//! nominee in the directory counts as one vote for that nominee; unknown
//! references are ignored. Ties at the top produce several winners.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Nominee, VoteRecord};

/// Lookup from nominee id to roster entry.
#[derive(Debug, Clone)]
pub struct NomineeDirectory<'a> {
    by_id: HashMap<&'a str, &'a Nominee>,
}

impl<'a> NomineeDirectory<'a> {
    pub fn new(roster: &'a [Nominee]) -> Self {
        let by_id = roster.iter().map(|n| (n.id.as_str(), n)).collect();
        Self { by_id }
    }

    pub fn get(&self, reference: &str) -> Option<&'a Nominee> {
        self.by_id.get(reference.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Vote count for one nominee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NomineeCount {
    pub id: String,
    pub name: String,
    pub department: Option<String>,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyResult {
    /// Nominees with at least one vote, by votes descending then id ascending.
    pub counts: Vec<NomineeCount>,
    /// Ids of every nominee sharing the top count (empty when nobody got a vote).
    pub winners: Vec<String>,
    pub ballots: usize,
    /// Slots that resolved to a known nominee.
    pub counted: u64,
    /// Non-empty slots that referenced an unknown nominee.
    pub ignored: u64,
}

impl TallyResult {
    pub fn votes_for(&self, id: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.votes)
            .unwrap_or(0)
    }

    pub fn winner_entries(&self) -> impl Iterator<Item = &NomineeCount> {
        self.counts.iter().filter(|c| self.winners.contains(&c.id))
    }
}

/// Count votes across all records.
pub fn tally_votes(records: &[VoteRecord], directory: &NomineeDirectory<'_>, slots: usize) -> TallyResult {
    let mut votes: HashMap<&str, u64> = HashMap::new();
    let mut counted = 0u64;
    let mut ignored = 0u64;

    for record in records {
        for reference in record.nominees.iter().take(slots) {
            let reference = reference.trim();
            if reference.is_empty() {
                continue;
            }
            match directory.get(reference) {
                Some(nominee) => {
                    *votes.entry(nominee.id.as_str()).or_insert(0) += 1;
                    counted += 1;
                }
                None => {
                    debug!(
                        voter = record.voter.as_deref().unwrap_or("-"),
                        reference,
                        "ignoring vote for unknown nominee"
                    );
                    ignored += 1;
                }
            }
        }
    }

    let mut counts: Vec<NomineeCount> = votes
        .into_iter()
        .filter_map(|(id, n)| {
            directory.get(id).map(|nominee| NomineeCount {
                id: nominee.id.clone(),
                name: nominee.name.clone(),
                department: nominee.department.clone(),
                votes: n,
            })
        })
        .collect();
    counts.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.id.cmp(&b.id)));

    let winners = match counts.first() {
        Some(top) => counts
            .iter()
            .take_while(|c| c.votes == top.votes)
            .map(|c| c.id.clone())
            .collect(),
        None => Vec::new(),
    };

    TallyResult {
        counts,
        winners,
        ballots: records.len(),
        counted,
        ignored,
    }
}
