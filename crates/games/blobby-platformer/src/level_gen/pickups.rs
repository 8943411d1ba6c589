use blobby_core::rng::RandomSource;

use super::LevelPlan;
use super::sampling::{Placement, sample_until};
use crate::terrain::{Canyon, Collectible, Platform};

fn over_canyon(canyons: &[Canyon], x: f32) -> bool {
    canyons.iter().any(|c| c.span().contains(x))
}

/// Give each platform a chance of carrying one collectible on its top.
pub(super) fn place_on_platforms(
    plan: &LevelPlan<'_>,
    rng: &mut impl RandomSource,
    platforms: &[Platform],
    canyons: &[Canyon],
    collectibles: &mut Vec<Collectible>,
) -> u32 {
    let tuning = plan.tuning;
    let cutoff = plan.world.goal_x - tuning.collectible_goal_clearance;
    let mut placed = 0;

    for p in platforms {
        if !rng.chance(tuning.platform_collectible_chance) {
            continue;
        }
        let inset = tuning.collectible_edge_inset;
        let x = rng.uniform(p.x + inset, p.x + p.width - inset);
        if x >= cutoff || over_canyon(canyons, x) || plan.spawn_zone.contains(x) {
            continue;
        }
        collectibles.push(Collectible {
            x,
            y: p.y,
            found: false,
        });
        placed += 1;
    }
    placed
}

/// Scatter collectibles on solid floor between the world start and the goal.
pub(super) fn place_on_ground(
    plan: &LevelPlan<'_>,
    base_target: u32,
    rng: &mut impl RandomSource,
    canyons: &[Canyon],
    collectibles: &mut Vec<Collectible>,
) -> Placement {
    let tuning = plan.tuning;
    let target = plan.scaled_count(0.0, base_target as f32);
    let limit = plan.world.goal_x - tuning.ground_goal_clearance;

    sample_until(target, tuning.attempts.ground_collectibles, || {
        let x = rng.uniform(0.0, limit);
        if plan.spawn_zone.contains(x) || over_canyon(canyons, x) {
            return false;
        }
        collectibles.push(Collectible {
            x,
            y: plan.world.floor_y,
            found: false,
        });
        true
    })
}
