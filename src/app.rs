//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - loads event data files
//! - runs the lucky-number / tally / draw logic
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Command, DrawArgs, LuckyArgs, TallyArgs};
use crate::domain::{DEFAULT_NUMBER_MAX, DEFAULT_NUMBER_MIN, LuckyConfig, NumberRange, Submission};
use crate::error::{AppError, DrawError};
use crate::io::export::LuckyExport;
use crate::lucky::validate_submission;

pub mod pipeline;

/// Environment override for the lowest allowed number.
pub const ENV_NUMBER_MIN: &str = "GALA_NUMBER_MIN";
/// Environment override for the highest allowed number.
pub const ENV_NUMBER_MAX: &str = "GALA_NUMBER_MAX";

/// Entry point for the `gala` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Lucky(args) => handle_lucky(args),
        Command::Tally(args) => handle_tally(args),
        Command::Draw(args) => handle_draw(args),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn handle_lucky(args: LuckyArgs) -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = lucky_config_from_args(&args, |key| std::env::var(key).ok())?;
    debug!(?config, "lucky-number configuration");

    let (run, bands_loaded) = lucky_from_files(&args, &config)?;

    println!(
        "{}",
        crate::report::format_lucky_report(&run.outcome, &run.winners, run.prize.as_ref(), bands_loaded)
    );

    if let Some(path) = &args.export {
        let export = LuckyExport {
            tool: "gala",
            generated_at: chrono::Utc::now(),
            config: &config,
            outcome: &run.outcome,
            winners: &run.winners,
            prize: run.prize.as_ref(),
        };
        crate::io::export::write_lucky_json(path, &export)?;
        info!(path = %path.display(), "wrote lucky-number result");
    }

    Ok(())
}

/// Validate the submitted numbers, then load the roster and prize bands and run.
///
/// Returns the run plus whether a prize band file was given.
fn lucky_from_files(
    args: &LuckyArgs,
    config: &LuckyConfig,
) -> Result<(pipeline::LuckyRun, bool), AppError> {
    let submission = Submission::parse(&args.numbers, &args.special);
    validate_submission(&submission, config.range).map_err(DrawError::from)?;

    let roster = crate::io::load_roster(&args.roster)?;
    let bands = args
        .prizes
        .as_deref()
        .map(crate::io::load_prize_bands)
        .transpose()?;

    let run = pipeline::run_lucky(&submission, &roster, bands.as_deref(), config)?;
    Ok((run, bands.is_some()))
}

fn handle_tally(args: TallyArgs) -> Result<(), AppError> {
    if args.slots == 0 {
        return Err(AppError::new(2, "--slots must be at least 1."));
    }

    let roster = crate::io::load_roster(&args.roster)?;
    let votes = crate::io::load_votes(&args.votes, args.slots)?;
    let tally = pipeline::run_tally(&votes.records, &roster, args.slots);

    println!("{}", crate::report::format_tally(&tally, &votes.row_errors));

    if let Some(path) = &args.export {
        crate::io::export::write_tally_csv(path, &tally)?;
        info!(path = %path.display(), "wrote vote tally");
    }

    Ok(())
}

fn handle_draw(args: DrawArgs) -> Result<(), AppError> {
    let participants = crate::io::load_participants(&args.participants)?;
    let mut rng = crate::draw::draw_rng(args.seed);

    let winner = if args.weighted {
        crate::draw::draw_prize_weighted(&participants, &mut rng)?
    } else {
        crate::draw::draw_prize(&participants, &mut rng)?
    };

    println!("{}", crate::report::format_draw(winner, participants.len(), args.weighted));
    Ok(())
}

/// Build the calculation config.
///
/// Range bounds come from flags first, then the environment (`lookup`), then
/// the built-in defaults.
pub fn lucky_config_from_args(
    args: &LuckyArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LuckyConfig, AppError> {
    let min = resolve_bound(args.min, ENV_NUMBER_MIN, DEFAULT_NUMBER_MIN, &lookup)?;
    let max = resolve_bound(args.max, ENV_NUMBER_MAX, DEFAULT_NUMBER_MAX, &lookup)?;

    Ok(LuckyConfig {
        range: NumberRange::new(min, max)?,
        rounding: args.rounding,
        mapping: args.mapping,
    })
}

fn resolve_bound(
    flag: Option<i64>,
    key: &str,
    default: i64,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<i64, AppError> {
    if let Some(v) = flag {
        return Ok(v);
    }
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::new(2, format!("Invalid {key}='{raw}' in environment (.env)."))),
        None => Ok(default),
    }
}
