//! `gala-draw` library crate.
//!
//! The binary (`gala`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the calculations can be reused by other front-ends (event pages, kiosks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod draw;
pub mod error;
pub mod io;
pub mod lucky;
pub mod report;
pub mod tally;

pub use domain::{LuckyConfig, Nominee, Participant, Submission, VoteRecord};
pub use draw::{draw_prize, draw_prize_weighted};
pub use error::{DrawError, ValidationError};
pub use lucky::{LuckyOutcome, compute_lucky_number};
pub use tally::{NomineeDirectory, TallyResult, tally_votes};
