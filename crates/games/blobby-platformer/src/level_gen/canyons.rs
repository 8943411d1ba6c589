use blobby_core::rng::RandomSource;
use blobby_core::span::Span;

use super::LevelPlan;
use super::sampling::{Placement, sample_until};
use crate::terrain::Canyon;

/// Scatter up to `target` canyons, keeping them apart from each other and
/// clear of the spawn and goal zones.
pub(super) fn place_canyons(
    plan: &LevelPlan<'_>,
    target: u32,
    rng: &mut impl RandomSource,
    canyons: &mut Vec<Canyon>,
) -> Placement {
    let tuning = plan.tuning;
    let budget = (tuning.attempts.canyons_per_scale * plan.scale).ceil().max(1.0) as u32;

    sample_until(target, budget, || {
        let width = rng.uniform(tuning.canyon_min_width, tuning.canyon_max_width);
        let x = rng.uniform(0.0, plan.world.width - width);
        let span = Span::new(x, width);

        if span.touches(&plan.spawn_zone) || span.touches(&plan.goal_zone) {
            return false;
        }
        if canyons
            .iter()
            .any(|c| c.span().gap_to(&span) < tuning.min_canyon_gap)
        {
            return false;
        }
        canyons.push(Canyon { x, width });
        true
    })
}
