use std::f32::consts::TAU;

use blobby_core::rng::RandomSource;
use blobby_core::span::Span;

use super::LevelPlan;
use super::sampling::{Placement, sample_until};
use crate::terrain::{Canyon, Worm};

/// Scatter worms on solid floor away from the spawn, the goal and canyon rims.
pub(super) fn place_worms(
    plan: &LevelPlan<'_>,
    rng: &mut impl RandomSource,
    canyons: &[Canyon],
    worms: &mut Vec<Worm>,
) -> Placement {
    let tuning = plan.tuning;
    let target = plan.scaled_count(tuning.worm_base, tuning.worm_per_scale);
    let budget = target.saturating_mul(tuning.attempts.worms_per_target);
    let spawn_clear = plan.spawn_zone.expanded(tuning.worm_spawn_clearance);
    let canyon_clear: Vec<Span> = canyons
        .iter()
        .map(|c| c.span().expanded(tuning.worm_canyon_clearance))
        .collect();

    sample_until(target, budget, || {
        let x = rng.uniform(0.0, plan.world.width);
        if spawn_clear.contains(x)
            || (x - plan.world.goal_x).abs() < tuning.worm_goal_clearance
            || canyon_clear.iter().any(|s| s.contains(x))
        {
            return false;
        }
        let direction = rng.sign();
        let speed = rng.uniform(tuning.worm_min_speed, tuning.worm_max_speed);
        let phase = rng.uniform(0.0, TAU);
        let segments = 4 + rng.index(2) as u8;
        worms.push(Worm {
            x,
            y: plan.world.floor_y - tuning.worm_ground_offset,
            direction,
            speed,
            phase,
            segments,
        });
        true
    })
}
