//! Seeded procedural level generation.
//!
//! Stages run in a fixed order, each a rejection-sampling loop with its own
//! attempt budget: canyons, canyon bridges, extra low platforms, high
//! platforms, collectibles, worms. A stage that runs out of attempts keeps
//! what it placed; the shortfall shows up in the [`GenerationReport`].

mod canyons;
mod pickups;
mod platforms;
mod sampling;
mod worms;

use serde::{Deserialize, Serialize};

use blobby_core::level::LevelParams;
use blobby_core::rng::RandomSource;
use blobby_core::span::Span;

use crate::config::{BlobbyConfig, GeneratorConfig};
use crate::error::LevelError;
use crate::physics::JumpEnvelope;
use crate::terrain::{Goal, Terrain};
use crate::world::WorldConfig;

pub use sampling::Placement;

/// Per-stage placement counts for one generated level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub canyons: Placement,
    /// Bridges are placed deterministically, one per wide canyon.
    pub bridges: u32,
    pub low_platforms: Placement,
    pub high_platforms: Placement,
    pub platform_collectibles: u32,
    pub ground_collectibles: Placement,
    pub worms: Placement,
}

impl GenerationReport {
    /// Stages that placed fewer entities than requested.
    pub fn shortfalls(&self) -> impl Iterator<Item = (&'static str, Placement)> + '_ {
        [
            ("canyons", self.canyons),
            ("low_platforms", self.low_platforms),
            ("high_platforms", self.high_platforms),
            ("ground_collectibles", self.ground_collectibles),
            ("worms", self.worms),
        ]
        .into_iter()
        .filter(|(_, p)| p.is_short())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLevel {
    pub terrain: Terrain,
    pub goal: Goal,
    pub report: GenerationReport,
}

/// Zones and limits shared by all stages of one generation run.
pub(crate) struct LevelPlan<'a> {
    pub world: &'a WorldConfig,
    pub tuning: &'a GeneratorConfig,
    pub envelope: JumpEnvelope,
    pub scale: f32,
    pub spawn_zone: Span,
    pub goal_zone: Span,
    pub bridge_threshold: f32,
    pub low_y: f32,
    pub high_y: f32,
}

impl<'a> LevelPlan<'a> {
    fn new(world: &'a WorldConfig, tuning: &'a GeneratorConfig, envelope: JumpEnvelope) -> Self {
        let low_y = world.floor_y - tuning.low_tier_height;
        Self {
            world,
            tuning,
            envelope,
            scale: world.scale(),
            spawn_zone: world.spawn_zone(tuning.spawn_safe_radius),
            goal_zone: world.goal_zone(tuning.goal_safe_margin),
            bridge_threshold: envelope.bridge_threshold(tuning.bridge_safety_factor),
            low_y,
            high_y: low_y - tuning.high_tier_rise,
        }
    }

    /// `base + per_scale * scale`, floored.
    fn scaled_count(&self, base: f32, per_scale: f32) -> u32 {
        (base + per_scale * self.scale).floor().max(0.0) as u32
    }
}

/// Generate a complete level for `world`.
///
/// Fails only on invalid configuration or world geometry. The same `rng`
/// seed always produces the same level.
pub fn generate_level(
    world: &WorldConfig,
    params: &LevelParams,
    config: &BlobbyConfig,
    rng: &mut impl RandomSource,
) -> Result<GeneratedLevel, LevelError> {
    let envelope = config.validate()?;
    world.validate()?;

    let plan = LevelPlan::new(world, &config.generator, envelope);
    let mut terrain = Terrain::default();

    let canyons = canyons::place_canyons(
        &plan,
        params.canyon_target_count,
        rng,
        &mut terrain.canyons,
    );
    let bridges = platforms::bridge_canyons(&plan, &terrain.canyons, &mut terrain.platforms);
    let low_platforms =
        platforms::place_low_platforms(&plan, rng, &terrain.canyons, &mut terrain.platforms);
    let high_platforms = platforms::place_high_platforms(&plan, rng, &mut terrain.platforms);
    let platform_collectibles = pickups::place_on_platforms(
        &plan,
        rng,
        &terrain.platforms,
        &terrain.canyons,
        &mut terrain.collectibles,
    );
    let ground_collectibles = pickups::place_on_ground(
        &plan,
        params.collectible_target_count,
        rng,
        &terrain.canyons,
        &mut terrain.collectibles,
    );
    let worms = worms::place_worms(&plan, rng, &terrain.canyons, &mut terrain.worms);

    let report = GenerationReport {
        canyons,
        bridges,
        low_platforms,
        high_platforms,
        platform_collectibles,
        ground_collectibles,
        worms,
    };

    for (stage, p) in report.shortfalls() {
        tracing::warn!(
            "Level generation placed {}/{} {stage} after {} attempts",
            p.placed,
            p.requested,
            p.attempts
        );
    }
    tracing::debug!(
        canyons = terrain.canyons.len(),
        platforms = terrain.platforms.len(),
        collectibles = terrain.collectibles.len(),
        worms = terrain.worms.len(),
        width = world.width,
        "Level generated"
    );

    Ok(GeneratedLevel {
        terrain,
        goal: Goal {
            x: world.goal_x,
            y: world.floor_y,
            reached: false,
        },
        report,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::terrain::PlatformLevel;

    fn generate(seed: u64, multiplier: u32) -> (WorldConfig, GeneratedLevel) {
        let cfg = BlobbyConfig::default();
        let params = LevelParams {
            world_width_multiplier: multiplier,
            ..LevelParams::default()
        };
        let world = WorldConfig::derive(&params, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let level = generate_level(&world, &params, &cfg, &mut rng).unwrap();
        (world, level)
    }

    #[test]
    fn same_seed_same_level() {
        let (_, a) = generate(42, 3);
        let (_, b) = generate(42, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let (_, a) = generate(1, 3);
        let (_, b) = generate(2, 3);
        assert_ne!(a.terrain, b.terrain);
    }

    #[test]
    fn default_level_respects_canyon_rules() {
        let (world, level) = generate(7, 3);
        let canyons = &level.terrain.canyons;
        assert!(canyons.len() <= 8);
        assert_eq!(level.report.canyons.placed as usize, canyons.len());

        let spawn = Span::new(362.0, 300.0);
        let goal = Span::new(2802.0, 240.0);
        assert_eq!(world.goal_x, 2922.0);
        for (i, a) in canyons.iter().enumerate() {
            assert!(!a.span().touches(&spawn), "canyon {a:?} in spawn zone");
            assert!(!a.span().touches(&goal), "canyon {a:?} in goal zone");
            for b in &canyons[i + 1..] {
                assert!(a.span().gap_to(&b.span()) >= 140.0, "{a:?} too close to {b:?}");
            }
        }
    }

    #[test]
    fn goal_sits_on_floor_near_right_edge() {
        let (world, level) = generate(3, 4);
        assert_eq!(level.goal.x, world.width - 150.0);
        assert_eq!(level.goal.y, world.floor_y);
        assert!(!level.goal.reached);
    }

    #[test]
    fn impossible_canyon_target_underfills_without_error() {
        let cfg = BlobbyConfig::default();
        let params = LevelParams {
            canyon_target_count: 100,
            ..LevelParams::default()
        };
        let world = WorldConfig::derive(&params, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let level = generate_level(&world, &params, &cfg, &mut rng).unwrap();
        assert!(level.terrain.canyons.len() < 100);
        assert!(level.report.canyons.is_short());
        assert!(level.report.shortfalls().any(|(stage, _)| stage == "canyons"));
    }

    #[test]
    fn zero_canyons_means_no_bridges() {
        let cfg = BlobbyConfig::default();
        let params = LevelParams {
            canyon_target_count: 0,
            ..LevelParams::default()
        };
        let world = WorldConfig::derive(&params, &cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let level = generate_level(&world, &params, &cfg, &mut rng).unwrap();
        assert!(level.terrain.canyons.is_empty());
        assert_eq!(level.report.bridges, 0);
    }

    #[test]
    fn invalid_world_is_rejected() {
        let cfg = BlobbyConfig::default();
        let mut world = WorldConfig::with_width(3072.0, &cfg).unwrap();
        world.width = -5.0;
        let mut rng = StdRng::seed_from_u64(5);
        let err = generate_level(&world, &LevelParams::default(), &cfg, &mut rng).unwrap_err();
        assert!(matches!(err, LevelError::InvalidWorld(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = BlobbyConfig::default();
        let world = WorldConfig::with_width(3072.0, &cfg).unwrap();
        cfg.generator.low_tier_height = 150.0;
        let mut rng = StdRng::seed_from_u64(5);
        let err = generate_level(&world, &LevelParams::default(), &cfg, &mut rng).unwrap_err();
        assert!(matches!(err, LevelError::InvalidConfig(_)));
    }

    #[test]
    fn tiers_sit_at_configured_heights() {
        let (world, level) = generate(11, 4);
        for p in &level.terrain.platforms {
            match p.level {
                PlatformLevel::Low => assert_eq!(p.y, world.floor_y - 90.0),
                PlatformLevel::High => assert_eq!(p.y, world.floor_y - 160.0),
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn layout_invariants_hold(seed in 0u64..10_000, multiplier in 2u32..=4) {
                let cfg = BlobbyConfig::default();
                let (world, level) = generate(seed, multiplier);
                let t = &level.terrain;
                let tuning = &cfg.generator;
                let envelope = cfg.validate().unwrap();
                let spawn = world.spawn_zone(tuning.spawn_safe_radius);
                let goal = world.goal_zone(tuning.goal_safe_margin);

                for (i, a) in t.canyons.iter().enumerate() {
                    prop_assert!(!a.span().overlaps(&spawn));
                    prop_assert!(!a.span().overlaps(&goal));
                    prop_assert!(a.x >= 0.0 && a.x + a.width <= world.width);
                    for b in &t.canyons[i + 1..] {
                        prop_assert!(a.span().gap_to(&b.span()) >= tuning.min_canyon_gap);
                    }
                }

                for (i, a) in t.platforms.iter().enumerate() {
                    for b in &t.platforms[i + 1..] {
                        prop_assert!(!a.span().overlaps(&b.span()), "{a:?} overlaps {b:?}");
                    }
                }

                let lows: Vec<_> = t.platforms_at(PlatformLevel::Low).collect();
                for high in t.platforms_at(PlatformLevel::High) {
                    prop_assert!(
                        lows.iter().any(|l| l.span().gap_to(&high.span()) <= envelope.tier_reach),
                        "high platform {high:?} out of reach"
                    );
                }

                let threshold = envelope.bridge_threshold(tuning.bridge_safety_factor);
                for c in t.canyons.iter().filter(|c| c.width >= threshold) {
                    prop_assert!(
                        lows.iter().any(|l| l.x <= c.x && l.x + l.width >= c.x + c.width),
                        "wide canyon {c:?} has no bridge"
                    );
                }

                for item in &t.collectibles {
                    prop_assert!(t.canyon_at(item.x).is_none(), "collectible over canyon: {item:?}");
                    prop_assert!(!spawn.contains_strict(item.x), "collectible in spawn zone: {item:?}");
                    prop_assert!(!item.found);
                }

                for w in &t.worms {
                    prop_assert!(!spawn.expanded(tuning.worm_spawn_clearance).contains_strict(w.x));
                    prop_assert!((w.x - world.goal_x).abs() >= tuning.worm_goal_clearance);
                    prop_assert!(t.canyon_at(w.x).is_none());
                    prop_assert!(w.direction == 1.0 || w.direction == -1.0);
                    prop_assert!((4..=5).contains(&w.segments));
                }

                let r = &level.report;
                for p in [r.canyons, r.low_platforms, r.high_platforms, r.ground_collectibles, r.worms] {
                    prop_assert!(p.placed <= p.requested);
                }
            }
        }
    }
}
