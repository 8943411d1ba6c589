use serde::{Deserialize, Serialize};

/// Per-tick input intent produced by the host's input mapper.
///
/// `move_left`/`move_right` are held states. `jump_pressed`/`drop_pressed`
/// are edge-triggered: they are true only on the tick the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
    pub drop_pressed: bool,
}

impl InputIntent {
    pub const IDLE: InputIntent = InputIntent {
        move_left: false,
        move_right: false,
        jump_pressed: false,
        drop_pressed: false,
    };

    pub fn right() -> Self {
        Self {
            move_right: true,
            ..Self::IDLE
        }
    }

    pub fn left() -> Self {
        Self {
            move_left: true,
            ..Self::IDLE
        }
    }

    pub fn jump() -> Self {
        Self {
            jump_pressed: true,
            ..Self::IDLE
        }
    }

    pub fn drop_through() -> Self {
        Self {
            drop_pressed: true,
            ..Self::IDLE
        }
    }

    /// Net horizontal direction: -1, 0 or +1. Opposing keys cancel.
    pub fn horizontal(&self) -> i8 {
        match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Merge a newer intent into this one. Held states take the newest value;
    /// edge flags accumulate so a press between two ticks is never lost.
    pub fn latch(&mut self, newer: &InputIntent) {
        self.move_left = newer.move_left;
        self.move_right = newer.move_right;
        self.jump_pressed |= newer.jump_pressed;
        self.drop_pressed |= newer.drop_pressed;
    }

    /// The intent that remains pending after a tick consumed this one:
    /// held states persist, edges are cleared.
    pub fn carried_over(&self) -> Self {
        Self {
            move_left: self.move_left,
            move_right: self.move_right,
            jump_pressed: false,
            drop_pressed: false,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        rmp_serde::to_vec(self).expect("input intent serialization must succeed")
    }

    /// Decode a MessagePack-encoded intent. Garbage yields `None`.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        rmp_serde::from_slice(bytes).ok()
    }
}
