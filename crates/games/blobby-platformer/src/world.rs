use serde::{Deserialize, Serialize};

use blobby_core::level::{LevelParams, WORLD_MULTIPLIER_RANGE};
use blobby_core::span::Span;

use crate::config::BlobbyConfig;
use crate::error::LevelError;

/// Canvas widths that count as one unit of density scale. Entity counts and
/// attempt budgets grow linearly with `world width / (canvas width * this)`.
pub const DENSITY_REFERENCE_SCREENS: f32 = 1.5;

/// Geometry of a single level, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    /// Ground line; y grows downward so everything above has a smaller y.
    pub floor_y: f32,
    pub spawn_x: f32,
    pub goal_x: f32,
    /// Falling past this y costs a life.
    pub bottom_y: f32,
    /// Width of the visible viewport, used for camera clamping.
    pub viewport_width: f32,
}

impl WorldConfig {
    /// Derive the world for a level from host parameters and the canvas.
    pub fn derive(params: &LevelParams, config: &BlobbyConfig) -> Result<Self, LevelError> {
        if !WORLD_MULTIPLIER_RANGE.contains(&params.world_width_multiplier) {
            return Err(LevelError::InvalidParams(format!(
                "world width multiplier {} outside {:?}",
                params.world_width_multiplier, WORLD_MULTIPLIER_RANGE
            )));
        }
        let canvas = &config.canvas;
        Self::with_width(
            canvas.width * params.world_width_multiplier as f32,
            config,
        )
    }

    /// World of an explicit width over the configured canvas.
    pub fn with_width(width: f32, config: &BlobbyConfig) -> Result<Self, LevelError> {
        let canvas = &config.canvas;
        let world = Self {
            width,
            floor_y: canvas.height * canvas.floor_ratio,
            spawn_x: canvas.width * 0.5,
            goal_x: width - config.generator.goal_inset,
            bottom_y: canvas.height,
            viewport_width: canvas.width,
        };
        world.validate()?;
        Ok(world)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(LevelError::InvalidWorld(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.floor_y > 0.0 && self.floor_y < self.bottom_y) {
            return Err(LevelError::InvalidWorld(format!(
                "floor {} must lie between 0 and the bottom {}",
                self.floor_y, self.bottom_y
            )));
        }
        if !(self.spawn_x > 0.0 && self.spawn_x < self.goal_x && self.goal_x < self.width) {
            return Err(LevelError::InvalidWorld(format!(
                "need 0 < spawn {} < goal {} < width {}",
                self.spawn_x, self.goal_x, self.width
            )));
        }
        Ok(())
    }

    /// Density multiplier for entity counts and attempt budgets.
    pub fn scale(&self) -> f32 {
        self.width / (self.viewport_width * DENSITY_REFERENCE_SCREENS)
    }

    pub fn spawn_zone(&self, radius: f32) -> Span {
        Span::around(self.spawn_x, radius)
    }

    pub fn goal_zone(&self, margin: f32) -> Span {
        Span::around(self.goal_x, margin)
    }

    /// Camera offset that centers `x`, clamped to the world.
    pub fn camera_for(&self, x: f32) -> f32 {
        let max = (self.width - self.viewport_width).max(0.0);
        (x - self.viewport_width * 0.5).clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_default_world() {
        let world = WorldConfig::derive(&LevelParams::default(), &BlobbyConfig::default()).unwrap();
        assert_eq!(world.width, 3072.0);
        assert_eq!(world.floor_y, 432.0);
        assert_eq!(world.spawn_x, 512.0);
        assert_eq!(world.goal_x, 2922.0);
        assert_eq!(world.bottom_y, 576.0);
        assert_eq!(world.scale(), 2.0);
    }

    #[test]
    fn derive_rejects_multiplier_out_of_range() {
        let params = LevelParams {
            world_width_multiplier: 1,
            ..LevelParams::default()
        };
        let err = WorldConfig::derive(&params, &BlobbyConfig::default()).unwrap_err();
        assert!(matches!(err, LevelError::InvalidParams(_)));
    }

    #[test]
    fn non_positive_width_is_rejected() {
        let cfg = BlobbyConfig::default();
        assert!(matches!(
            WorldConfig::with_width(0.0, &cfg),
            Err(LevelError::InvalidWorld(_))
        ));
        assert!(matches!(
            WorldConfig::with_width(-100.0, &cfg),
            Err(LevelError::InvalidWorld(_))
        ));
    }

    #[test]
    fn goal_before_spawn_is_rejected() {
        // 600 - 150 = 450 < spawn 512
        let cfg = BlobbyConfig::default();
        assert!(WorldConfig::with_width(600.0, &cfg).is_err());
    }

    #[test]
    fn camera_clamps_to_world() {
        let world = WorldConfig::with_width(3072.0, &BlobbyConfig::default()).unwrap();
        assert_eq!(world.camera_for(512.0), 0.0);
        assert_eq!(world.camera_for(100.0), 0.0);
        assert_eq!(world.camera_for(1000.0), 488.0);
        assert_eq!(world.camera_for(3072.0), 2048.0);
    }
}
