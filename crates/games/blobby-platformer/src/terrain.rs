use serde::{Deserialize, Serialize};

use blobby_core::span::Span;

/// A gap in the floor. Standing strictly inside it sends the character down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canyon {
    pub x: f32,
    pub width: f32,
}

impl Canyon {
    pub fn span(&self) -> Span {
        Span::new(self.x, self.width)
    }
}

/// Platform height tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformLevel {
    /// Reachable from the floor. Also used for canyon bridges.
    Low,
    /// Reachable only from a low platform.
    High,
}

/// One-way platform: solid from above, passable from below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    /// Top surface.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub level: PlatformLevel,
}

impl Platform {
    pub fn span(&self) -> Span {
        Span::new(self.x, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub found: bool,
}

/// Ground hazard that crawls back and forth along the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Worm {
    pub x: f32,
    pub y: f32,
    /// +1.0 or -1.0.
    pub direction: f32,
    pub speed: f32,
    /// Animation phase in radians.
    pub phase: f32,
    pub segments: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub x: f32,
    pub y: f32,
    pub reached: bool,
}

/// Everything the generator places in a level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub canyons: Vec<Canyon>,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub worms: Vec<Worm>,
}

impl Terrain {
    /// Canyon strictly containing `x`, if any.
    pub fn canyon_at(&self, x: f32) -> Option<&Canyon> {
        self.canyons.iter().find(|c| c.span().contains_strict(x))
    }

    pub fn platforms_at(&self, level: PlatformLevel) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(move |p| p.level == level)
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.found).count()
    }

    /// All placed entities, canyons first, for renderers and diagnostics.
    pub fn entities(&self) -> impl Iterator<Item = TerrainEntity> + '_ {
        self.canyons
            .iter()
            .copied()
            .map(TerrainEntity::Canyon)
            .chain(self.platforms.iter().copied().map(TerrainEntity::Platform))
            .chain(self.collectibles.iter().copied().map(TerrainEntity::Collectible))
            .chain(self.worms.iter().copied().map(TerrainEntity::Worm))
    }
}

/// Any placed level entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainEntity {
    Canyon(Canyon),
    Platform(Platform),
    Collectible(Collectible),
    Worm(Worm),
}

impl TerrainEntity {
    /// Horizontal extent. Point entities have a zero-width span.
    pub fn span(&self) -> Span {
        match self {
            Self::Canyon(c) => c.span(),
            Self::Platform(p) => p.span(),
            Self::Collectible(c) => Span::new(c.x, 0.0),
            Self::Worm(w) => Span::new(w.x, 0.0),
        }
    }
}
