//! Shared command logic, independent of how results are presented.
//!
//! Each function takes already-loaded data and returns everything a front-end
//! needs to print or export. The CLI only adds file loading and formatting.

use crate::domain::{LuckyConfig, Nominee, PrizeBand, Submission, VoteRecord};
use crate::error::DrawError;
use crate::lucky::{LuckyOutcome, compute_lucky_number, find_prize};
use crate::tally::{NomineeDirectory, TallyResult, tally_votes};

/// All computed outputs of a single `gala lucky` run.
#[derive(Debug, Clone)]
pub struct LuckyRun {
    pub outcome: LuckyOutcome,
    /// Roster entries holding the final lucky number.
    pub winners: Vec<Nominee>,
    pub prize: Option<PrizeBand>,
}

/// Resolve the lucky number, then find who holds it and which prize band applies.
pub fn run_lucky(
    submission: &Submission,
    roster: &[Nominee],
    bands: Option<&[PrizeBand]>,
    config: &LuckyConfig,
) -> Result<LuckyRun, DrawError> {
    let outcome = compute_lucky_number(submission, roster, config)?;
    let winners = holders_of(roster, outcome.lucky_number());
    let prize = bands
        .and_then(|b| find_prize(b, outcome.percentile.whole_percent()))
        .cloned();

    Ok(LuckyRun {
        outcome,
        winners,
        prize,
    })
}

/// Roster entries whose lucky number equals `lucky_number`.
pub fn holders_of(roster: &[Nominee], lucky_number: i64) -> Vec<Nominee> {
    roster
        .iter()
        .filter(|n| n.parsed_lucky_number() == Some(lucky_number))
        .cloned()
        .collect()
}

/// Tally votes against the roster.
pub fn run_tally(records: &[VoteRecord], roster: &[Nominee], slots: usize) -> TallyResult {
    let directory = NomineeDirectory::new(roster);
    tally_votes(records, &directory, slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LuckyField;

    fn nominee(id: &str, lucky: &str) -> Nominee {
        Nominee {
            id: id.to_string(),
            name: format!("Name {id}"),
            department: None,
            bio: None,
            thumbnail: None,
            lucky_number: Some(LuckyField::Text(lucky.to_string())),
        }
    }

    fn bands() -> Vec<PrizeBand> {
        vec![
            PrizeBand { name: "Consolation".into(), min: 0, max: 49 },
            PrizeBand { name: "Main".into(), min: 50, max: 100 },
        ]
    }

    #[test]
    fn every_holder_of_the_number_wins() {
        let roster = vec![nominee("A", "10"), nominee("B", "20"), nominee("C", "20"), nominee("D", "x")];
        // Special 30 -> 50% -> idx 0.5 * 2 = 1 -> chain [10, 20, 20] -> 20.
        let sub = Submission::from_numbers(&[5, 10, 20, 40, 50, 55], 30);
        let run = run_lucky(&sub, &roster, None, &LuckyConfig::default()).unwrap();

        assert_eq!(run.outcome.lucky_number(), 20);
        let ids: Vec<&str> = run.winners.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(run.outcome.skipped.len(), 1);
        assert!(run.prize.is_none());
    }

    #[test]
    fn prize_band_follows_whole_percent() {
        let roster = vec![nominee("A", "10"), nominee("B", "20")];
        let table = bands();

        let low = Submission::from_numbers(&[5, 10, 20, 40, 50, 55], 1);
        let run = run_lucky(&low, &roster, Some(&table), &LuckyConfig::default()).unwrap();
        assert_eq!(run.prize.unwrap().name, "Consolation");

        let high = Submission::from_numbers(&[5, 10, 20, 40, 50, 1], 55);
        let run = run_lucky(&high, &roster, Some(&table), &LuckyConfig::default()).unwrap();
        assert_eq!(run.prize.unwrap().name, "Main");
    }

    #[test]
    fn tally_through_roster() {
        let roster = vec![nominee("A", "1"), nominee("B", "2")];
        let records: Vec<VoteRecord> = ["A", "A", "A", "B"]
            .iter()
            .map(|id| VoteRecord { voter: None, nominees: vec![id.to_string()] })
            .collect();
        let result = run_tally(&records, &roster, 3);
        assert_eq!(result.votes_for("A"), 3);
        assert_eq!(result.votes_for("B"), 1);
        assert_eq!(result.winners, vec!["A".to_string()]);
    }
}
