//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - submission types (`NumberRange`, `Submission`, `NumberSet`)
//! - calculation policies (`PercentileRounding`, `MappingPolicy`)
//! - input records read from event data files (`Nominee`, `VoteRecord`, `Participant`, `PrizeBand`)

pub mod types;

pub use types::*;
