use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::physics::JumpEnvelope;

/// Canvas the host renders into. World geometry is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    /// Floor height as a fraction of canvas height (y grows downward).
    pub floor_ratio: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 576.0,
            floor_ratio: 0.75,
        }
    }
}

/// Character physics. Units are pixels and ticks; y grows downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick.
    pub gravity: f32,
    /// Apex height of a continuous jump; the impulse is derived from it.
    pub jump_height: f32,
    /// Horizontal shift per tick while a direction is held.
    pub move_speed: f32,
    /// Fixed descent per tick while plummeting.
    pub plummet_speed: f32,
    /// Half of the character footprint used for platform overlap.
    pub half_width: f32,
    /// Vertical distance within which the feet snap onto a platform top.
    pub landing_tolerance: f32,
    /// How long platform collisions are ignored after a drop-through.
    pub drop_through_secs: f32,
    /// Downward nudge applied when a drop-through starts.
    pub drop_through_nudge: f32,
    /// Fixed simulation rate the per-tick constants are tuned for.
    pub tick_rate_hz: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_height: 100.0,
            move_speed: 3.0,
            plummet_speed: 6.0,
            half_width: 20.0,
            landing_tolerance: 5.0,
            drop_through_secs: 0.25,
            drop_through_nudge: 5.0,
            tick_rate_hz: 60.0,
        }
    }
}

impl PhysicsConfig {
    /// Upward launch speed that reaches `jump_height` under `gravity`.
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.gravity * self.jump_height).sqrt()
    }

    /// Drop-through window converted to whole ticks at the fixed tick rate.
    pub fn drop_through_ticks(&self) -> u32 {
        (self.drop_through_secs * self.tick_rate_hz).round().max(1.0) as u32
    }
}

/// Rejection-sampling attempt caps. Canyon attempts scale with world size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptBudgets {
    /// Canyon attempts per unit of world density scale.
    pub canyons_per_scale: f32,
    pub low_platforms: u32,
    pub high_platforms: u32,
    pub ground_collectibles: u32,
    /// Worm attempts per requested worm.
    pub worms_per_target: u32,
}

impl Default for AttemptBudgets {
    fn default() -> Self {
        Self {
            canyons_per_scale: 1200.0,
            low_platforms: 500,
            high_platforms: 800,
            ground_collectibles: 400,
            worms_per_target: 40,
        }
    }
}

/// Level generator tuning. Reach-dependent limits come from [`JumpEnvelope`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Radius around the spawn kept clear of hazards and obstacles.
    pub spawn_safe_radius: f32,
    /// Distance from the right world edge to the goal marker.
    pub goal_inset: f32,
    /// Half width of the zone around the goal kept clear of canyons and platforms.
    pub goal_safe_margin: f32,

    pub canyon_min_width: f32,
    pub canyon_max_width: f32,
    /// Minimum edge-to-edge distance between canyons.
    pub min_canyon_gap: f32,

    /// Height of the low platform tier above the floor.
    pub low_tier_height: f32,
    /// Height of the high tier above the low tier.
    pub high_tier_rise: f32,
    pub platform_thickness: f32,
    /// Overhang of a bridging platform past each canyon rim.
    pub bridge_margin: f32,
    /// Canyons wider than this fraction of the floor-to-floor jump distance get a bridge.
    pub bridge_safety_factor: f32,

    pub low_min_width: f32,
    pub low_max_width: f32,
    /// Minimum edge-to-edge distance between low platforms.
    pub low_min_gap: f32,
    /// Extra low platforms: `base + per_scale * scale`.
    pub extra_low_base: f32,
    pub extra_low_per_scale: f32,

    /// High platform width as a fraction of its base platform.
    pub high_min_fraction: f32,
    pub high_max_fraction: f32,
    pub high_min_width: f32,
    pub high_max_width: f32,
    /// Horizontal offset from the base platform. The upper bound is capped by jump reach.
    pub high_min_gap: f32,
    pub high_max_gap: f32,
    /// High platforms requested per low platform.
    pub high_ratio: f32,

    pub platform_collectible_chance: f32,
    /// Platform collectibles stay this far inside the platform edges.
    pub collectible_edge_inset: f32,
    /// Platform collectibles are skipped this close to the goal.
    pub collectible_goal_clearance: f32,
    /// Ground collectibles are placed at least this far before the goal.
    pub ground_goal_clearance: f32,

    pub worm_base: f32,
    pub worm_per_scale: f32,
    /// Extra clearance around the spawn safe zone for worms.
    pub worm_spawn_clearance: f32,
    pub worm_goal_clearance: f32,
    pub worm_canyon_clearance: f32,
    pub worm_min_speed: f32,
    pub worm_max_speed: f32,
    /// Worm body sits this far above the floor line.
    pub worm_ground_offset: f32,

    pub attempts: AttemptBudgets,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spawn_safe_radius: 150.0,
            goal_inset: 150.0,
            goal_safe_margin: 120.0,
            canyon_min_width: 60.0,
            canyon_max_width: 140.0,
            min_canyon_gap: 140.0,
            low_tier_height: 90.0,
            high_tier_rise: 70.0,
            platform_thickness: 12.0,
            bridge_margin: 20.0,
            bridge_safety_factor: 0.75,
            low_min_width: 90.0,
            low_max_width: 170.0,
            low_min_gap: 140.0,
            extra_low_base: 3.0,
            extra_low_per_scale: 2.0,
            high_min_fraction: 0.35,
            high_max_fraction: 0.65,
            high_min_width: 60.0,
            high_max_width: 140.0,
            high_min_gap: 20.0,
            high_max_gap: 80.0,
            high_ratio: 0.3,
            platform_collectible_chance: 0.25,
            collectible_edge_inset: 20.0,
            collectible_goal_clearance: 40.0,
            ground_goal_clearance: 60.0,
            worm_base: 3.0,
            worm_per_scale: 6.0,
            worm_spawn_clearance: 40.0,
            worm_goal_clearance: 140.0,
            worm_canyon_clearance: 5.0,
            worm_min_speed: 0.07,
            worm_max_speed: 0.1,
            worm_ground_offset: 3.0,
            attempts: AttemptBudgets::default(),
        }
    }
}

/// Gameplay rules applied after physics each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_lives: u8,
    /// Pickup distance between the character's feet and a collectible.
    pub collect_radius: f32,
    /// Per-axis distance to the goal marker that counts as reaching it.
    pub goal_tolerance: f32,
    /// Horizontal distance to a worm that counts as a hit.
    pub worm_hit_radius: f32,
    /// The character must be this close to the floor for a worm to hit it.
    pub worm_hit_height: f32,
    /// Damping applied to each worm's speed when crawling.
    pub worm_crawl_factor: f32,
    /// Animation phase advance per tick.
    pub worm_phase_step: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            collect_radius: 20.0,
            goal_tolerance: 10.0,
            worm_hit_radius: 20.0,
            worm_hit_height: 6.0,
            worm_crawl_factor: 0.6,
            worm_phase_step: 0.15,
        }
    }
}

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobbyConfig {
    pub canvas: CanvasConfig,
    pub physics: PhysicsConfig,
    pub generator: GeneratorConfig,
    pub rules: RulesConfig,
}

impl BlobbyConfig {
    /// Load config from the TOML file named by `BLOBBY_CONFIG` (default
    /// `config/blobby.toml`), then apply env var overrides. Falls back to
    /// defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("BLOBBY_CONFIG").unwrap_or_else(|_| "config/blobby.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                BlobbyConfig::default()
            }),
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                BlobbyConfig::default()
            },
        };

        if let Ok(val) = std::env::var("BLOBBY_LIVES")
            && let Ok(n) = val.parse::<u8>()
        {
            config.rules.starting_lives = n;
        }
        if let Ok(val) = std::env::var("BLOBBY_TICK_RATE")
            && let Ok(hz) = val.parse::<f32>()
        {
            config.physics.tick_rate_hz = hz;
        }

        config
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check the physics/generator coupling and return the derived jump envelope.
    pub fn validate(&self) -> Result<JumpEnvelope, LevelError> {
        let c = &self.canvas;
        if !(c.width > 0.0 && c.height > 0.0) {
            return Err(LevelError::InvalidConfig(
                "canvas width and height must be positive".to_string(),
            ));
        }
        if !(c.floor_ratio > 0.0 && c.floor_ratio < 1.0) {
            return Err(LevelError::InvalidConfig(
                "canvas.floor_ratio must be in (0, 1)".to_string(),
            ));
        }

        let p = &self.physics;
        for (name, value) in [
            ("gravity", p.gravity),
            ("jump_height", p.jump_height),
            ("move_speed", p.move_speed),
            ("plummet_speed", p.plummet_speed),
            ("half_width", p.half_width),
            ("landing_tolerance", p.landing_tolerance),
            ("tick_rate_hz", p.tick_rate_hz),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LevelError::InvalidConfig(format!(
                    "physics.{name} must be positive, got {value}"
                )));
            }
        }

        if self.rules.starting_lives == 0 {
            return Err(LevelError::InvalidConfig(
                "rules.starting_lives must be at least 1".to_string(),
            ));
        }

        let g = &self.generator;
        if !(g.canyon_min_width > 0.0 && g.canyon_min_width <= g.canyon_max_width) {
            return Err(LevelError::InvalidConfig(
                "generator canyon width range is empty".to_string(),
            ));
        }
        if !(g.low_min_width > 0.0 && g.low_min_width <= g.low_max_width) {
            return Err(LevelError::InvalidConfig(
                "generator low platform width range is empty".to_string(),
            ));
        }
        if g.high_min_fraction > g.high_max_fraction || g.high_min_width > g.high_max_width {
            return Err(LevelError::InvalidConfig(
                "generator high platform width range is empty".to_string(),
            ));
        }

        let envelope = JumpEnvelope::derive(p, g.high_tier_rise);
        if g.low_tier_height >= envelope.apex {
            return Err(LevelError::InvalidConfig(format!(
                "low tier at {} is above the jump apex {}",
                g.low_tier_height, envelope.apex
            )));
        }
        if g.high_tier_rise >= envelope.apex {
            return Err(LevelError::InvalidConfig(format!(
                "high tier rise {} is above the jump apex {}",
                g.high_tier_rise, envelope.apex
            )));
        }
        if g.high_min_gap > envelope.tier_reach {
            return Err(LevelError::InvalidConfig(format!(
                "high_min_gap {} exceeds jump reach {}",
                g.high_min_gap, envelope.tier_reach
            )));
        }

        Ok(envelope)
    }
}
