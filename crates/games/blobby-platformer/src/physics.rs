use serde::{Deserialize, Serialize};

use blobby_core::events::GameEvent;
use blobby_core::input::InputIntent;
use blobby_core::span::Span;

use crate::config::PhysicsConfig;
use crate::terrain::Terrain;
use crate::world::WorldConfig;

/// Upper bound on simulated jump ticks; only hit with degenerate gravity.
const MAX_ARC_TICKS: u32 = 10_000;

/// Reach of the discrete jump arc, measured by replaying the per-tick
/// integration used by [`tick_character`]. The generator takes its distance
/// limits from here so every level it builds is traversable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpEnvelope {
    /// Highest point above takeoff.
    pub apex: f32,
    /// Ticks from takeoff until back at takeoff height.
    pub ground_airtime: u32,
    /// Horizontal distance of a floor-to-floor jump.
    pub ground_span: f32,
    /// Horizontal distance at which a jump can still land on a tier
    /// `rise` above takeoff, including half the character footprint.
    pub tier_reach: f32,
}

impl JumpEnvelope {
    pub fn derive(physics: &PhysicsConfig, rise: f32) -> Self {
        let mut vy = -physics.jump_speed();
        let mut height = 0.0f32;
        let mut apex = 0.0f32;
        let mut tier_ticks = None;
        let mut ground_ticks = MAX_ARC_TICKS;

        for tick in 1..=MAX_ARC_TICKS {
            vy += physics.gravity;
            height -= vy;
            apex = apex.max(height);
            if vy <= 0.0 {
                continue;
            }
            if tier_ticks.is_none() && apex >= rise && height <= rise {
                tier_ticks = Some(tick);
            }
            if height <= 0.0 {
                ground_ticks = tick;
                break;
            }
        }

        let tier_reach = tier_ticks
            .map(|t| t as f32 * physics.move_speed + physics.half_width)
            .unwrap_or(0.0);

        Self {
            apex,
            ground_airtime: ground_ticks,
            ground_span: ground_ticks as f32 * physics.move_speed,
            tier_reach,
        }
    }

    /// Canyons at least this wide get a bridging platform.
    pub fn bridge_threshold(&self, safety_factor: f32) -> f32 {
        self.ground_span * safety_factor
    }
}

/// The player character. Motion state is derived from the flags via
/// [`Character::motion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub x: f32,
    /// Feet position; y grows downward.
    pub y: f32,
    pub vertical_velocity: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Airborne: rising or falling.
    pub falling: bool,
    pub plummeting: bool,
    pub dead: bool,
    pub frozen: bool,
    /// Ticks left during which platform collisions are ignored.
    pub drop_through_ticks: u32,
    /// Set once the current plummet has been reported.
    pub plummet_announced: bool,
}

impl Character {
    pub fn spawn(world: &WorldConfig) -> Self {
        Self {
            x: world.spawn_x,
            y: world.floor_y,
            vertical_velocity: 0.0,
            moving_left: false,
            moving_right: false,
            falling: false,
            plummeting: false,
            dead: false,
            frozen: false,
            drop_through_ticks: 0,
            plummet_announced: false,
        }
    }

    /// Return to spawn after losing a life. `dead` is left untouched.
    pub fn reset_to_spawn(&mut self, world: &WorldConfig) {
        let dead = self.dead;
        *self = Self::spawn(world);
        self.dead = dead;
    }

    pub fn footprint(&self, half_width: f32) -> Span {
        Span::around(self.x, half_width)
    }

    pub fn is_airborne(&self) -> bool {
        self.falling || self.plummeting
    }

    pub fn control_state(&self) -> ControlState {
        if self.dead {
            ControlState::Dead
        } else if self.frozen {
            ControlState::Frozen
        } else if self.plummeting {
            ControlState::Plummeting
        } else if self.falling {
            ControlState::Airborne
        } else {
            ControlState::Grounded
        }
    }

    pub fn motion(&self) -> MotionState {
        if self.dead {
            MotionState::Dead
        } else if self.frozen {
            MotionState::Frozen
        } else if self.plummeting {
            MotionState::Plummeting
        } else if self.falling {
            match (self.moving_left, self.moving_right) {
                (true, false) => MotionState::JumpingLeft,
                (false, true) => MotionState::JumpingRight,
                _ => MotionState::Jumping,
            }
        } else {
            match (self.moving_left, self.moving_right) {
                (true, false) => MotionState::WalkingLeft,
                (false, true) => MotionState::WalkingRight,
                _ => MotionState::Standing,
            }
        }
    }
}

/// Controller state machine derived from the character flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlState {
    Grounded,
    /// Rising or falling.
    Airborne,
    /// Falling through a canyon, no horizontal control.
    Plummeting,
    /// Out of lives until the level restarts.
    Dead,
    /// Goal reached; input ignored.
    Frozen,
}

/// Pose a renderer picks a sprite for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    Standing,
    WalkingLeft,
    WalkingRight,
    Jumping,
    JumpingLeft,
    JumpingRight,
    Plummeting,
    Frozen,
    Dead,
}

/// Advance movement and collisions by one tick: horizontal input, gravity,
/// platform landing, canyon entry and plummet descent.
///
/// Jump and drop-through are edge actions applied afterwards by
/// [`apply_actions`], so the velocity set by a jump survives the tick.
pub fn tick_character(
    ch: &mut Character,
    input: &InputIntent,
    terrain: &Terrain,
    world: &WorldConfig,
    physics: &PhysicsConfig,
    events: &mut Vec<GameEvent>,
) {
    if ch.dead || ch.frozen {
        return;
    }

    // Horizontal; the canyon walls hold a plummeting character in place
    if ch.plummeting {
        ch.moving_left = false;
        ch.moving_right = false;
    } else {
        let dir = input.horizontal();
        ch.moving_left = dir < 0;
        ch.moving_right = dir > 0;
        ch.x = (ch.x + f32::from(dir) * physics.move_speed).clamp(0.0, world.width);
    }

    let prev_y = ch.y;
    if !ch.plummeting {
        ch.vertical_velocity += physics.gravity;
        ch.y += ch.vertical_velocity;
        if ch.y >= world.floor_y {
            ch.y = world.floor_y;
            ch.vertical_velocity = 0.0;
            ch.falling = false;
        }
    }

    let landed = if ch.drop_through_ticks > 0 {
        ch.drop_through_ticks -= 1;
        false
    } else {
        land_on_platform(ch, prev_y, terrain, physics)
    };
    if !landed && !ch.plummeting && ch.y < world.floor_y {
        ch.falling = true;
    }

    if ch.y >= world.floor_y && terrain.canyon_at(ch.x).is_some() {
        ch.plummeting = true;
        ch.falling = false;
        if !ch.plummet_announced {
            ch.plummet_announced = true;
            events.push(GameEvent::FellIntoCanyon);
        }
    }

    if ch.plummeting {
        ch.y += physics.plummet_speed;
        ch.vertical_velocity = 0.0;
    }
}

/// Snap onto the highest platform the feet reached this tick. The swept
/// test catches fast falls that cross a platform top between two ticks.
fn land_on_platform(
    ch: &mut Character,
    prev_y: f32,
    terrain: &Terrain,
    physics: &PhysicsConfig,
) -> bool {
    if ch.plummeting || ch.vertical_velocity < 0.0 {
        return false;
    }
    let footprint = ch.footprint(physics.half_width);
    let top = terrain
        .platforms
        .iter()
        .filter(|p| p.span().overlaps(&footprint))
        .filter(|p| {
            // The tolerance may lift the feet a few pixels onto a top just above them
            (ch.y - p.y).abs() < physics.landing_tolerance || (prev_y <= p.y && ch.y >= p.y)
        })
        .map(|p| p.y)
        .min_by(f32::total_cmp);

    match top {
        Some(y) => {
            ch.y = y;
            ch.vertical_velocity = 0.0;
            ch.falling = false;
            true
        },
        None => false,
    }
}

/// Apply the edge-triggered actions of this tick: jump, then drop-through.
pub fn apply_actions(
    ch: &mut Character,
    input: &InputIntent,
    world: &WorldConfig,
    physics: &PhysicsConfig,
    events: &mut Vec<GameEvent>,
) {
    if ch.dead || ch.frozen || ch.plummeting {
        return;
    }

    if input.jump_pressed && !ch.falling {
        ch.vertical_velocity = -physics.jump_speed();
        ch.falling = true;
        events.push(GameEvent::Jumped);
    } else if input.drop_pressed && ch.y < world.floor_y {
        // Also valid mid-air, to fall past a platform about to be landed on
        ch.drop_through_ticks = physics.drop_through_ticks();
        ch.y = (ch.y + physics.drop_through_nudge).min(world.floor_y);
        ch.falling = true;
    }
}
