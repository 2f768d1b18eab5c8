//! Command-line parsing for the gala scoring and drawing tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the calculation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_VOTE_SLOTS, MappingPolicy, PercentileRounding};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gala", version, about = "Gala night scoring: vote tally, lucky number, grand-prize draw")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose diagnostics (debug level) on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a participant's lucky number from seven submitted numbers.
    Lucky(LuckyArgs),
    /// Count votes per nominee and announce the winner(s).
    Tally(TallyArgs),
    /// Draw one grand-prize winner.
    Draw(DrawArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct LuckyArgs {
    /// Nominee roster JSON (source of the lucky-number chain).
    #[arg(long, value_name = "JSON")]
    pub roster: PathBuf,

    /// The six primary numbers, comma separated.
    #[arg(short = 'n', long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub numbers: Vec<String>,

    /// The special number.
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub special: String,

    /// Smallest allowed number (env: GALA_NUMBER_MIN, default 1).
    #[arg(long)]
    pub min: Option<i64>,

    /// Largest allowed number (env: GALA_NUMBER_MAX, default 55).
    #[arg(long)]
    pub max: Option<i64>,

    /// Rounding applied to the percentile rank before mapping.
    #[arg(long, value_enum, default_value_t = PercentileRounding::FourDecimals)]
    pub rounding: PercentileRounding,

    /// How fractional chain positions are resolved.
    #[arg(long, value_enum, default_value_t = MappingPolicy::Interpolate)]
    pub mapping: MappingPolicy,

    /// Prize band JSON (`[{name, min, max}]` in whole percent).
    #[arg(long, value_name = "JSON")]
    pub prizes: Option<PathBuf>,

    /// Export the full calculation to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct TallyArgs {
    /// Vote records (`.csv` or JSON).
    #[arg(long, value_name = "FILE")]
    pub votes: PathBuf,

    /// Nominee roster JSON.
    #[arg(long, value_name = "JSON")]
    pub roster: PathBuf,

    /// Nominee slots read per vote record.
    #[arg(long, default_value_t = DEFAULT_VOTE_SLOTS)]
    pub slots: usize,

    /// Export per-nominee counts to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct DrawArgs {
    /// Participant list JSON.
    #[arg(long, value_name = "JSON")]
    pub participants: PathBuf,

    /// Seed for a reproducible draw.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Weight participants by their `tickets` field.
    #[arg(long)]
    pub weighted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lucky_numbers_list() {
        let cli = Cli::parse_from([
            "gala", "lucky", "--roster", "roster.json", "-n", "1,2,3,4,5,6", "-s", "7", "--mapping", "floor",
        ]);
        let Command::Lucky(args) = cli.command else {
            panic!("expected lucky command");
        };
        assert_eq!(args.numbers, vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(args.special, "7");
        assert_eq!(args.mapping, MappingPolicy::Floor);
        assert_eq!(args.rounding, PercentileRounding::FourDecimals);
        assert_eq!(args.min, None);
    }

    #[test]
    fn tally_defaults_to_three_slots() {
        let cli = Cli::parse_from(["gala", "-v", "tally", "--votes", "v.csv", "--roster", "r.json"]);
        assert!(cli.verbose);
        let Command::Tally(args) = cli.command else {
            panic!("expected tally command");
        };
        assert_eq!(args.slots, 3);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
