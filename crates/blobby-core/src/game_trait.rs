use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::input::InputIntent;
use crate::level::LevelParams;

/// Core trait a frame-stepped side-scroller implements.
///
/// The host owns the frame loop, rendering and audio; the game only
/// generates levels and advances its simulation one tick at a time.
pub trait SideScroller {
    /// Error returned when a level cannot be started.
    type Error: std::error::Error;

    /// Game metadata for a host menu.
    fn metadata(&self) -> GameMetadata;

    /// Discard every piece of level state and generate a fresh level.
    fn start(&mut self, params: &LevelParams, seed: u64) -> Result<(), Self::Error>;

    /// Advance one tick with the given input. Returns the events raised during the tick.
    fn step(&mut self, input: &InputIntent) -> Vec<GameEvent>;

    /// Serialize a read-only snapshot of the world for collaborators.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the world with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Latch an encoded input intent to be consumed by the next `step_pending`.
    fn apply_input(&mut self, input: &[u8]);

    /// Step with whatever input has been latched since the previous tick.
    fn step_pending(&mut self) -> Vec<GameEvent>;

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Current outcome of the level.
    fn outcome(&self) -> LevelOutcome;

    /// Whether the level has been won or lost.
    fn is_level_over(&self) -> bool {
        self.outcome() != LevelOutcome::Playing
    }
}

/// Game metadata for a host menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub estimated_level_duration: Duration,
}

/// Terminal state of a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelOutcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Generates the `SideScroller` methods that are identical across games:
/// `serialize_state`, `apply_state`, `apply_input`, `step_pending`, `pause`,
/// `resume`, `outcome`.
///
/// Requires the implementing struct to have `state: $StateType`,
/// `pending_input: InputIntent` and `paused: bool` fields, and `$StateType`
/// to have an `outcome: LevelOutcome` field.
#[macro_export]
macro_rules! side_scroller_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("world state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn apply_input(&mut self, input: &[u8]) {
            if let Some(intent) = $crate::input::InputIntent::decode(input) {
                self.pending_input.latch(&intent);
            }
        }

        fn step_pending(&mut self) -> Vec<$crate::events::GameEvent> {
            let input = std::mem::take(&mut self.pending_input);
            self.pending_input = input.carried_over();
            self.step(&input)
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn outcome(&self) -> $crate::game_trait::LevelOutcome {
            self.state.outcome
        }
    };
}
