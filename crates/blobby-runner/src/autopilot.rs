use blobby_core::game_trait::LevelOutcome;
use blobby_core::input::InputIntent;
use blobby_platformer::WorldState;
use blobby_platformer::config::BlobbyConfig;

/// How far ahead of its footprint the autopilot starts a jump over a canyon.
const CANYON_TAKEOFF_DISTANCE: f32 = 12.0;

/// Worms closer than this ahead of the character trigger a jump.
const WORM_TAKEOFF_DISTANCE: f32 = 45.0;

/// Generate autopilot input for the current world: walk toward the goal,
/// jump canyons and worms from the floor.
pub fn autopilot_input(state: &WorldState, config: &BlobbyConfig) -> InputIntent {
    let ch = &state.character;
    if state.outcome != LevelOutcome::Playing || ch.dead || ch.frozen {
        return InputIntent::IDLE;
    }

    let heading = if state.goal.x >= ch.x { 1.0 } else { -1.0 };
    let mut input = if heading > 0.0 {
        InputIntent::right()
    } else {
        InputIntent::left()
    };

    if ch.is_airborne() || ch.y < state.world.floor_y {
        return input;
    }

    // Distance from the leading edge of the footprint to a point ahead.
    let lead = ch.x + heading * config.physics.half_width;
    let ahead = |x: f32| (x - lead) * heading;

    let canyon_ahead = state.terrain.canyons.iter().any(|c| {
        let rim = if heading > 0.0 { c.x } else { c.x + c.width };
        (0.0..CANYON_TAKEOFF_DISTANCE).contains(&ahead(rim))
    });
    let worm_ahead = state
        .terrain
        .worms
        .iter()
        .any(|w| (0.0..WORM_TAKEOFF_DISTANCE).contains(&ahead(w.x)));

    if canyon_ahead || worm_ahead {
        input.jump_pressed = true;
    }
    input
}
