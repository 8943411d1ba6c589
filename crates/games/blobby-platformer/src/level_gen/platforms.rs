use blobby_core::rng::RandomSource;
use blobby_core::span::Span;

use super::LevelPlan;
use super::sampling::{Placement, sample_until};
use crate::terrain::{Canyon, Platform, PlatformLevel};

fn platform(plan: &LevelPlan<'_>, span: Span, level: PlatformLevel) -> Platform {
    Platform {
        x: span.left,
        y: match level {
            PlatformLevel::Low => plan.low_y,
            PlatformLevel::High => plan.high_y,
        },
        width: span.width(),
        height: plan.tuning.platform_thickness,
        level,
    }
}

/// Cover every canyon too wide to jump with a low platform overhanging both rims.
pub(super) fn bridge_canyons(
    plan: &LevelPlan<'_>,
    canyons: &[Canyon],
    platforms: &mut Vec<Platform>,
) -> u32 {
    let mut bridges = 0;
    for canyon in canyons.iter().filter(|c| c.width >= plan.bridge_threshold) {
        let wide = canyon.span().expanded(plan.tuning.bridge_margin);
        let span = Span {
            left: wide.left.max(0.0),
            right: wide.right.min(plan.world.width),
        };
        platforms.push(platform(plan, span, PlatformLevel::Low));
        bridges += 1;
    }
    bridges
}

/// Scatter extra low platforms away from the spawn, the goal, unbridged
/// canyons and other low platforms.
pub(super) fn place_low_platforms(
    plan: &LevelPlan<'_>,
    rng: &mut impl RandomSource,
    canyons: &[Canyon],
    platforms: &mut Vec<Platform>,
) -> Placement {
    let tuning = plan.tuning;
    let target = plan.scaled_count(tuning.extra_low_base, tuning.extra_low_per_scale);

    sample_until(target, tuning.attempts.low_platforms, || {
        let width = rng.uniform(tuning.low_min_width, tuning.low_max_width);
        let x = rng.uniform(0.0, plan.world.width - width);
        let span = Span::new(x, width);

        if span.touches(&plan.spawn_zone) || span.touches(&plan.goal_zone) {
            return false;
        }
        let over_open_canyon = canyons
            .iter()
            .any(|c| c.width < plan.bridge_threshold && c.span().overlaps(&span));
        if over_open_canyon {
            return false;
        }
        let crowded = platforms
            .iter()
            .filter(|p| p.level == PlatformLevel::Low)
            .any(|p| p.span().gap_to(&span) < tuning.low_min_gap);
        if crowded {
            return false;
        }
        platforms.push(platform(plan, span, PlatformLevel::Low));
        true
    })
}

/// Place high platforms next to a random low platform, within jump reach of
/// at least one low platform.
pub(super) fn place_high_platforms(
    plan: &LevelPlan<'_>,
    rng: &mut impl RandomSource,
    platforms: &mut Vec<Platform>,
) -> Placement {
    let tuning = plan.tuning;
    let lows: Vec<Span> = platforms
        .iter()
        .filter(|p| p.level == PlatformLevel::Low)
        .map(Platform::span)
        .collect();
    let target = (lows.len() as f32 * tuning.high_ratio).floor() as u32;
    if lows.is_empty() {
        return Placement {
            requested: target,
            ..Placement::default()
        };
    }

    let reach = plan.envelope.tier_reach;
    let max_gap = tuning.high_max_gap.min(reach);

    sample_until(target, tuning.attempts.high_platforms, || {
        let base = lows[rng.index(lows.len())];
        let width = (base.width() * rng.uniform(tuning.high_min_fraction, tuning.high_max_fraction))
            .clamp(tuning.high_min_width, tuning.high_max_width);
        let gap = rng.uniform(tuning.high_min_gap, max_gap);
        let x = if rng.chance(0.5) {
            base.right + gap
        } else {
            base.left - gap - width
        };
        let span = Span::new(x, width).clamped_into(0.0, plan.world.width);

        let reachable = lows.iter().any(|l| l.gap_to(&span) <= reach);
        if !reachable || span.touches(&plan.goal_zone) {
            return false;
        }
        if platforms.iter().any(|p| p.span().overlaps(&span)) {
            return false;
        }
        platforms.push(platform(plan, span, PlatformLevel::High));
        true
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::BlobbyConfig;
    use crate::world::WorldConfig;

    fn with_plan(f: impl FnOnce(&LevelPlan<'_>)) {
        let cfg = BlobbyConfig::default();
        let envelope = cfg.validate().unwrap();
        let world = WorldConfig::with_width(3072.0, &cfg).unwrap();
        let plan = LevelPlan::new(&world, &cfg.generator, envelope);
        f(&plan);
    }

    #[test]
    fn wide_canyon_gets_bridge() {
        with_plan(|plan| {
            let canyons = vec![
                Canyon { x: 1000.0, width: 120.0 },
                Canyon { x: 1500.0, width: 70.0 },
            ];
            let mut platforms = Vec::new();
            let bridges = bridge_canyons(plan, &canyons, &mut platforms);
            assert_eq!(bridges, 1);
            let bridge = platforms[0];
            assert_eq!(bridge.x, 980.0);
            assert_eq!(bridge.width, 160.0);
            assert_eq!(bridge.y, 342.0);
            assert_eq!(bridge.level, PlatformLevel::Low);
        });
    }

    #[test]
    fn bridge_clipped_at_world_edge() {
        with_plan(|plan| {
            let canyons = vec![Canyon { x: 5.0, width: 120.0 }];
            let mut platforms = Vec::new();
            bridge_canyons(plan, &canyons, &mut platforms);
            assert_eq!(platforms[0].x, 0.0);
            assert_eq!(platforms[0].x + platforms[0].width, 145.0);
        });
    }

    #[test]
    fn low_platforms_avoid_open_canyons() {
        with_plan(|plan| {
            let canyons = vec![
                Canyon { x: 800.0, width: 70.0 },
                Canyon { x: 1800.0, width: 70.0 },
            ];
            let mut platforms = Vec::new();
            let mut rng = StdRng::seed_from_u64(21);
            place_low_platforms(plan, &mut rng, &canyons, &mut platforms);
            for p in &platforms {
                for c in &canyons {
                    assert!(!p.span().overlaps(&c.span()), "{p:?} over {c:?}");
                }
            }
        });
    }

    #[test]
    fn no_high_platforms_without_low_ones() {
        with_plan(|plan| {
            let mut platforms = Vec::new();
            let mut rng = StdRng::seed_from_u64(3);
            let placement = place_high_platforms(plan, &mut rng, &mut platforms);
            assert_eq!(placement.placed, 0);
            assert_eq!(placement.attempts, 0);
            assert!(platforms.is_empty());
        });
    }

    #[test]
    fn high_platforms_stay_in_reach() {
        with_plan(|plan| {
            let mut platforms: Vec<Platform> = [800.0, 1300.0, 1800.0, 2300.0]
                .into_iter()
                .map(|x| platform(plan, Span::new(x, 150.0), PlatformLevel::Low))
                .collect();
            let mut rng = StdRng::seed_from_u64(8);
            let placement = place_high_platforms(plan, &mut rng, &mut platforms);
            assert_eq!(placement.requested, 1);
            let highs: Vec<_> = platforms
                .iter()
                .filter(|p| p.level == PlatformLevel::High)
                .collect();
            assert_eq!(highs.len() as u32, placement.placed);
            for h in highs {
                assert_eq!(h.y, 272.0);
                assert!((60.0..=140.0).contains(&h.width));
                let nearest = platforms
                    .iter()
                    .filter(|p| p.level == PlatformLevel::Low)
                    .map(|l| l.span().gap_to(&h.span()))
                    .fold(f32::INFINITY, f32::min);
                assert!(nearest <= plan.envelope.tier_reach);
            }
        });
    }
}
