use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Range the world width multiplier is drawn from at game start.
pub const WORLD_MULTIPLIER_RANGE: RangeInclusive<u32> = 2..=4;

/// Level parameters supplied by the setup collaborator at start/restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelParams {
    /// World width as a multiple of the canvas width.
    pub world_width_multiplier: u32,
    /// How many canyons the generator should try to place.
    pub canyon_target_count: u32,
    /// Baseline ground collectible count, scaled by world width.
    pub collectible_target_count: u32,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            world_width_multiplier: 3,
            canyon_target_count: 8,
            collectible_target_count: 3,
        }
    }
}

impl LevelParams {
    /// Default counts with a world width multiplier drawn from
    /// [`WORLD_MULTIPLIER_RANGE`].
    pub fn random(rng: &mut impl RandomSource) -> Self {
        let lo = *WORLD_MULTIPLIER_RANGE.start();
        let hi = *WORLD_MULTIPLIER_RANGE.end();
        Self {
            world_width_multiplier: lo + rng.index((hi - lo + 1) as usize) as u32,
            ..Self::default()
        }
    }
}
