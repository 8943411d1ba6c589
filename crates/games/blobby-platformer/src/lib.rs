pub mod config;
pub mod error;
pub mod hazards;
pub mod level_gen;
pub mod physics;
pub mod step;
pub mod terrain;
pub mod world;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use blobby_core::events::GameEvent;
use blobby_core::game_trait::{GameMetadata, LevelOutcome, SideScroller};
use blobby_core::input::InputIntent;
use blobby_core::level::LevelParams;
use blobby_core::side_scroller_boilerplate;

use config::BlobbyConfig;
use error::LevelError;
use level_gen::{GenerationReport, generate_level};
use physics::{Character, MotionState};
use terrain::{Goal, Terrain};
use world::WorldConfig;

/// Everything that changes while a level is played. Serialized as the
/// read-only snapshot handed to renderers and HUDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub world: WorldConfig,
    pub terrain: Terrain,
    pub goal: Goal,
    pub character: Character,
    pub lives: u8,
    pub score: u32,
    /// Left edge of the viewport in world units.
    pub camera_x: f32,
    pub tick: u64,
    pub outcome: LevelOutcome,
}

impl WorldState {
    pub fn new(world: WorldConfig, terrain: Terrain, goal: Goal, lives: u8) -> Self {
        let character = Character::spawn(&world);
        Self {
            camera_x: world.camera_for(character.x),
            world,
            terrain,
            goal,
            character,
            lives,
            score: 0,
            tick: 0,
            outcome: LevelOutcome::Playing,
        }
    }

    pub fn motion(&self) -> MotionState {
        self.character.motion()
    }
}

/// The Blobby side-scroller: one character, a generated level, a goal.
pub struct BlobbyGame {
    config: BlobbyConfig,
    state: WorldState,
    report: GenerationReport,
    params: LevelParams,
    seed: u64,
    pending_input: InputIntent,
    paused: bool,
}

impl BlobbyGame {
    /// Create a game and start a level with default parameters and seed 0.
    pub fn new(config: BlobbyConfig) -> Result<Self, LevelError> {
        let params = LevelParams::default();
        let (state, report) = build_level(&config, &params, 0)?;
        Ok(Self {
            config,
            state,
            report,
            params,
            seed: 0,
            pending_input: InputIntent::IDLE,
            paused: false,
        })
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn config(&self) -> &BlobbyConfig {
        &self.config
    }

    /// Placement counts of the current level.
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Regenerate the current level from its parameters and seed.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        let params = self.params;
        self.start(&params, self.seed)
    }
}

fn build_level(
    config: &BlobbyConfig,
    params: &LevelParams,
    seed: u64,
) -> Result<(WorldState, GenerationReport), LevelError> {
    let world = WorldConfig::derive(params, config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let level = generate_level(&world, params, config, &mut rng)?;
    let state = WorldState::new(
        world,
        level.terrain,
        level.goal,
        config.rules.starting_lives,
    );
    Ok((state, level.report))
}

impl SideScroller for BlobbyGame {
    type Error = LevelError;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Blobby".to_string(),
            description: "Jump the canyons, dodge the worms, reach the flag!".to_string(),
            estimated_level_duration: Duration::from_secs(90),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.physics.tick_rate_hz
    }

    fn start(&mut self, params: &LevelParams, seed: u64) -> Result<(), LevelError> {
        let (state, report) = build_level(&self.config, params, seed)?;
        tracing::info!(
            seed,
            width = state.world.width,
            canyons = state.terrain.canyons.len(),
            platforms = state.terrain.platforms.len(),
            "Level started"
        );
        self.state = state;
        self.report = report;
        self.params = *params;
        self.seed = seed;
        self.pending_input = InputIntent::IDLE;
        self.paused = false;
        Ok(())
    }

    fn step(&mut self, input: &InputIntent) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }
        let events = step::step_world(&mut self.state, input, &self.config);
        for event in events.iter().filter(|e| e.is_terminal()) {
            tracing::info!(
                tick = self.state.tick,
                score = self.state.score,
                "Level over: {}",
                event.cue()
            );
        }
        events
    }

    side_scroller_boilerplate!(state_type: WorldState);
}
