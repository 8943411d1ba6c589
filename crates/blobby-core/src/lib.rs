pub mod events;
pub mod game_trait;
pub mod input;
pub mod level;
pub mod rng;
pub mod span;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::GameEvent;
    use crate::game_trait::{LevelOutcome, SideScroller};
    use crate::input::InputIntent;
    use crate::level::LevelParams;

    /// Level parameters used by contract tests: a 3x canvas-wide world.
    pub fn default_params() -> LevelParams {
        LevelParams::default()
    }

    /// Run N ticks with the same input, returning all accumulated events.
    pub fn run_ticks<G: SideScroller>(game: &mut G, n: usize, input: &InputIntent) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.step(input));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed<G: SideScroller>(game: &G, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // SideScroller Contract Tests
    // ================================================================
    // Generic checks every SideScroller implementation must pass. Game
    // crates call them from their own #[cfg(test)] modules.

    /// After start(), serialize_state() must return non-empty bytes and the
    /// level must be in progress.
    pub fn contract_start_creates_state<G: SideScroller>(game: &mut G, seed: u64) {
        game.start(&default_params(), seed)
            .unwrap_or_else(|e| panic!("start must succeed with default params: {e}"));
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes after start"
        );
        assert_eq!(game.outcome(), LevelOutcome::Playing);
    }

    /// Stepping with a held direction must change state.
    pub fn contract_step_changes_state<G: SideScroller>(game: &mut G, input: &InputIntent) {
        let before = game.serialize_state();
        game.step(input);
        assert_game_state_changed(game, &before);
    }

    /// apply_input() with valid bytes followed by step_pending() must change state.
    pub fn contract_apply_input_changes_state<G: SideScroller>(game: &mut G, valid_input: &[u8]) {
        let before = game.serialize_state();
        game.apply_input(valid_input);
        game.step_pending();
        assert_game_state_changed(game, &before);
    }

    /// Identical seeds must produce identical levels; restarting must fully
    /// replace the previous level.
    pub fn contract_start_is_reproducible<G: SideScroller>(a: &mut G, b: &mut G) {
        let params = default_params();
        a.start(&params, 99).unwrap_or_else(|e| panic!("start failed: {e}"));
        b.start(&params, 99).unwrap_or_else(|e| panic!("start failed: {e}"));
        assert_eq!(
            a.serialize_state(),
            b.serialize_state(),
            "same seed must produce the same level"
        );

        b.start(&params, 100).unwrap_or_else(|e| panic!("start failed: {e}"));
        assert_ne!(
            a.serialize_state(),
            b.serialize_state(),
            "restart with another seed must regenerate the level"
        );
    }

    /// serialize_state → apply_state must be stable after one roundtrip.
    pub fn contract_state_roundtrip_preserves<G: SideScroller>(game: &mut G) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze the simulation, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<G: SideScroller>(game: &mut G, moving: &InputIntent) {
        game.pause();
        let before = game.serialize_state();
        let events = game.step(moving);
        assert!(events.is_empty(), "No events while paused");
        assert_eq!(
            before,
            game.serialize_state(),
            "State must not change while paused"
        );

        game.resume();
        game.step(moving);
        assert_game_state_changed(game, &before);
    }

    /// Garbage input and truncated state must be ignored without panicking.
    pub fn contract_garbage_is_ignored<G: SideScroller>(game: &mut G) {
        let before = game.serialize_state();
        game.apply_input(&[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        game.apply_state(&before[..before.len() / 2]);
        assert_eq!(
            before,
            game.serialize_state(),
            "Garbage bytes must not change state"
        );
    }
}
