//! Prize bands keyed by whole-percent rank.

use crate::domain::PrizeBand;
use crate::error::DrawError;

/// Check a prize table before use: names must be present and every band ordered.
pub fn validate_bands(bands: &[PrizeBand], source_name: &str) -> Result<(), DrawError> {
    for (idx, band) in bands.iter().enumerate() {
        if band.name.trim().is_empty() {
            return Err(DrawError::input(source_name, format!("prize band #{} has no name", idx + 1)));
        }
        if band.min > band.max {
            return Err(DrawError::input(
                source_name,
                format!("prize band '{}' has min {} > max {}", band.name, band.min, band.max),
            ));
        }
    }
    Ok(())
}

/// First band (in table order) containing `percent`.
pub fn find_prize(bands: &[PrizeBand], percent: i64) -> Option<&PrizeBand> {
    bands.iter().find(|b| b.contains(percent))
}
