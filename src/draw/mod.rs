//! Grand-prize draw.
//!
//! The RNG is always passed in, so callers choose between a reproducible
//! `StdRng::seed_from_u64` and an entropy-seeded generator.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, WeightedIndex};

use crate::domain::Participant;
use crate::error::DrawError;

/// RNG for a draw: seeded when `seed` is given, entropy-seeded otherwise.
pub fn draw_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pick one participant uniformly at random.
pub fn draw_prize<'a, R: Rng + ?Sized>(
    participants: &'a [Participant],
    rng: &mut R,
) -> Result<&'a Participant, DrawError> {
    if participants.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    let idx = rng.gen_range(0..participants.len());
    Ok(&participants[idx])
}

/// Pick one participant with probability proportional to their ticket count.
pub fn draw_prize_weighted<'a, R: Rng + ?Sized>(
    participants: &'a [Participant],
    rng: &mut R,
) -> Result<&'a Participant, DrawError> {
    if participants.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    // Summed in u64 so large ticket counts cannot overflow the total.
    let dist = WeightedIndex::new(participants.iter().map(|p| u64::from(p.tickets())))
        .map_err(|e| DrawError::InvalidWeights(e.to_string()))?;
    Ok(&participants[dist.sample(rng)])
}
