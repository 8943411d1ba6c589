use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use blobby_core::events::GameEvent;
use blobby_core::game_trait::{LevelOutcome, SideScroller};
use blobby_core::level::LevelParams;
use blobby_platformer::BlobbyGame;
use blobby_platformer::config::BlobbyConfig;
use blobby_platformer::error::LevelError;
use blobby_platformer::level_gen::GenerationReport;

use crate::autopilot::autopilot_input;

/// Runner options, read from the environment.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Level seed. A fresh one is drawn when unset.
    pub seed: Option<u64>,
    /// Stop after this many ticks if the level is still running.
    pub max_ticks: u64,
    /// Pace the loop to the game's tick rate instead of running flat out.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: 60 * 180,
            realtime: false,
        }
    }
}

impl RunOptions {
    /// `BLOBBY_SEED`, `BLOBBY_TICKS`, `BLOBBY_REALTIME` override the defaults.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(val) = std::env::var("BLOBBY_SEED")
            && let Ok(seed) = val.parse::<u64>()
        {
            options.seed = Some(seed);
        }
        if let Ok(val) = std::env::var("BLOBBY_TICKS")
            && let Ok(n) = val.parse::<u64>()
        {
            options.max_ticks = n;
        }
        if let Ok(val) = std::env::var("BLOBBY_REALTIME") {
            options.realtime = val == "1" || val.eq_ignore_ascii_case("true");
        }
        options
    }
}

/// One line of the event stream written to stdout.
#[derive(Debug, Serialize)]
struct EventLine<'a> {
    tick: u64,
    cue: &'static str,
    event: &'a GameEvent,
}

/// Final result of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub params: LevelParams,
    pub outcome: LevelOutcome,
    pub ticks: u64,
    pub score: u32,
    pub lives: u8,
    pub collectibles: usize,
    pub report: GenerationReport,
}

/// Play one level with the autopilot. Level parameters are drawn from the
/// seed so a seed fully determines the run.
pub fn run(
    config: BlobbyConfig,
    options: &RunOptions,
    mut on_event: impl FnMut(&str),
) -> Result<RunSummary, LevelError> {
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    let params = LevelParams::random(&mut StdRng::seed_from_u64(seed));

    let mut game = BlobbyGame::new(config)?;
    game.start(&params, seed)?;

    let frame = Duration::from_secs_f32(1.0 / game.tick_rate());
    let mut next_frame = Instant::now();

    while !game.is_level_over() && game.state().tick < options.max_ticks {
        let intent = autopilot_input(game.state(), game.config());
        game.apply_input(&intent.encode());
        let events = game.step_pending();

        let tick = game.state().tick;
        for event in &events {
            let line = EventLine {
                tick,
                cue: event.cue(),
                event,
            };
            match serde_json::to_string(&line) {
                Ok(json) => on_event(&json),
                Err(e) => tracing::warn!("Failed to encode event: {e}"),
            }
        }

        if options.realtime {
            next_frame += frame;
            if let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    if !game.is_level_over() {
        tracing::warn!(
            "Stopped after {} ticks without finishing the level",
            options.max_ticks
        );
    }

    let state = game.state();
    Ok(RunSummary {
        seed: game.seed(),
        params,
        outcome: state.outcome,
        ticks: state.tick,
        score: state.score,
        lives: state.lives,
        collectibles: state.terrain.collectibles.len(),
        report: game.report().clone(),
    })
}
