use blobby_core::events::GameEvent;
use blobby_core::game_trait::LevelOutcome;
use blobby_core::input::InputIntent;

use crate::WorldState;
use crate::config::{BlobbyConfig, RulesConfig};
use crate::hazards;
use crate::physics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifeLoss {
    /// Fell out of the world; the character respawns.
    Fell,
    /// Touched a worm; the character stays where it is.
    Hazard,
}

/// Advance the world by one tick.
///
/// Order: worms crawl, character movement and collisions, falling out of the
/// world, jump/drop actions, pickups, worm contact, goal, camera. Once the
/// level is won or lost nothing changes and no events are raised.
pub fn step_world(
    state: &mut WorldState,
    input: &InputIntent,
    config: &BlobbyConfig,
) -> Vec<GameEvent> {
    if state.outcome != LevelOutcome::Playing {
        return Vec::new();
    }

    let mut events = Vec::new();
    state.tick += 1;

    hazards::crawl_worms(&mut state.terrain.worms, &state.world, &config.rules);

    physics::tick_character(
        &mut state.character,
        input,
        &state.terrain,
        &state.world,
        &config.physics,
        &mut events,
    );

    if state.character.y > state.world.bottom_y {
        events.push(lose_life(state, LifeLoss::Fell));
    } else {
        physics::apply_actions(
            &mut state.character,
            input,
            &state.world,
            &config.physics,
            &mut events,
        );
    }

    if !state.character.dead {
        collect(state, &config.rules, &mut events);

        if let Some(worm) = hazards::take_hit(
            &mut state.terrain.worms,
            &state.character,
            &state.world,
            &config.rules,
        ) {
            events.push(GameEvent::HazardKilled {
                x: worm.x.round() as i32,
            });
            events.push(lose_life(state, LifeLoss::Hazard));
        }
    }

    if !state.character.dead {
        check_goal(state, &config.rules, &mut events);
    }

    state.camera_x = state.world.camera_for(state.character.x);
    events
}

/// Non-mutating form of [`step_world`].
pub fn stepped(
    state: &WorldState,
    input: &InputIntent,
    config: &BlobbyConfig,
) -> (WorldState, Vec<GameEvent>) {
    let mut next = state.clone();
    let events = step_world(&mut next, input, config);
    (next, events)
}

fn lose_life(state: &mut WorldState, cause: LifeLoss) -> GameEvent {
    state.lives = state.lives.saturating_sub(1);
    if cause == LifeLoss::Fell {
        state.character.reset_to_spawn(&state.world);
    }
    if state.lives == 0 {
        state.character.dead = true;
        state.outcome = LevelOutcome::Lost;
        GameEvent::DiedFinal
    } else {
        GameEvent::LostLife {
            remaining: state.lives,
        }
    }
}

fn collect(state: &mut WorldState, rules: &RulesConfig, events: &mut Vec<GameEvent>) {
    let ch = &state.character;
    for (index, item) in state.terrain.collectibles.iter_mut().enumerate() {
        if item.found {
            continue;
        }
        let dx = ch.x - item.x;
        let dy = ch.y - item.y;
        if (dx * dx + dy * dy).sqrt() < rules.collect_radius {
            item.found = true;
            state.score += 1;
            events.push(GameEvent::Collected { index });
        }
    }
}

fn check_goal(state: &mut WorldState, rules: &RulesConfig, events: &mut Vec<GameEvent>) {
    let ch = &mut state.character;
    let goal = &mut state.goal;
    if goal.reached
        || (ch.x - goal.x).abs() >= rules.goal_tolerance
        || (ch.y - goal.y).abs() >= rules.goal_tolerance
    {
        return;
    }
    goal.reached = true;
    ch.frozen = true;
    ch.moving_left = false;
    ch.moving_right = false;
    ch.vertical_velocity = 0.0;
    state.outcome = LevelOutcome::Won;
    events.push(GameEvent::GoalReached);
}
