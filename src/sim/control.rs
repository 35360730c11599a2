//! Per-player control input for a single frame

use serde::{Deserialize, Serialize};

/// Logical controls for one player (already resolved from raw keys)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    /// -1 left, 0 none, 1 right
    pub movement: i8,
    pub jump: bool,
    pub attack: bool,
}

impl ControlState {
    /// Build from held directions; both held cancels out
    pub fn from_buttons(left: bool, right: bool, jump: bool, attack: bool) -> Self {
        let mut movement = 0;
        if left {
            movement -= 1;
        }
        if right {
            movement += 1;
        }
        Self {
            movement,
            jump,
            attack,
        }
    }

    /// Movement direction as a float, clamped to [-1, 1]
    #[inline]
    pub fn direction(&self) -> f32 {
        self.movement.clamp(-1, 1) as f32
    }
}
