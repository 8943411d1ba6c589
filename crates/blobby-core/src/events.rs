use serde::{Deserialize, Serialize};

/// Discrete events raised by the character controller during a tick.
///
/// The core only emits identifiers; the audio and HUD collaborators decide
/// what to play or display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The character left the ground with a jump impulse.
    Jumped,
    /// A collectible was picked up. `index` is its position in the terrain list.
    Collected { index: usize },
    /// The character started plummeting into a canyon. Raised once per fall.
    FellIntoCanyon,
    /// A life was lost and lives remain.
    LostLife { remaining: u8 },
    /// The last life was lost. Raised exactly once per level.
    DiedFinal,
    /// The goal marker was reached. Raised exactly once per level.
    GoalReached,
    /// A worm was touched and removed from the level.
    HazardKilled { x: i32 },
}

impl GameEvent {
    /// Stable cue name for collaborators that key assets by string.
    pub fn cue(&self) -> &'static str {
        match self {
            GameEvent::Jumped => "jumped",
            GameEvent::Collected { .. } => "collected",
            GameEvent::FellIntoCanyon => "fell_into_canyon",
            GameEvent::LostLife { .. } => "lost_life",
            GameEvent::DiedFinal => "died_final",
            GameEvent::GoalReached => "goal_reached",
            GameEvent::HazardKilled { .. } => "hazard_killed",
        }
    }

    /// Whether this event ends the level.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::DiedFinal | GameEvent::GoalReached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_json_tags() {
        assert_eq!(
            serde_json::to_string(&GameEvent::Jumped).unwrap(),
            r#"{"event":"jumped"}"#
        );
        assert_eq!(
            serde_json::to_string(&GameEvent::LostLife { remaining: 2 }).unwrap(),
            r#"{"event":"lost_life","remaining":2}"#
        );
        assert_eq!(
            serde_json::to_string(&GameEvent::FellIntoCanyon).unwrap(),
            r#"{"event":"fell_into_canyon"}"#
        );
    }

    #[test]
    fn cue_matches_json_tag() {
        let events = [
            GameEvent::Jumped,
            GameEvent::Collected { index: 3 },
            GameEvent::FellIntoCanyon,
            GameEvent::LostLife { remaining: 1 },
            GameEvent::DiedFinal,
            GameEvent::GoalReached,
            GameEvent::HazardKilled { x: 900 },
        ];
        for event in events {
            let json = serde_json::to_value(event).unwrap();
            assert_eq!(json["event"], event.cue());
        }
    }

    #[test]
    fn event_json_roundtrip() {
        let event = GameEvent::Collected { index: 7 };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn only_death_and_goal_are_terminal() {
        assert!(GameEvent::DiedFinal.is_terminal());
        assert!(GameEvent::GoalReached.is_terminal());
        assert!(!GameEvent::LostLife { remaining: 1 }.is_terminal());
        assert!(!GameEvent::HazardKilled { x: 0 }.is_terminal());
    }
}
