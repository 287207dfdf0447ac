//! Per-frame input intents
//!
//! The input collaborator reports which intents are currently held. Movement
//! and the boost modifier act every frame they are held; fire and abilities
//! act once per key-down, detected by comparing against the previous frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Held-state of every input intent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Doubles movement and switches fire to a fan release
    pub boost: bool,
    /// Spend score to become invulnerable
    pub hyper: bool,
    pub fire: bool,
    pub disable: bool,
    pub gravity: bool,
    pub barrier: bool,
}

impl InputState {
    /// Summed direction delta; opposite keys cancel out
    pub fn movement(&self) -> (i8, i8) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }

    pub fn movement_vec(&self) -> Vec2 {
        let (dx, dy) = self.movement();
        Vec2::new(dx as f32, dy as f32)
    }

    /// Intents that went from released to held since `prev`
    pub fn pressed_since(&self, prev: &InputState) -> Pressed {
        Pressed {
            hyper: self.hyper && !prev.hyper,
            fire: self.fire && !prev.fire,
            disable: self.disable && !prev.disable,
            gravity: self.gravity && !prev.gravity,
            barrier: self.barrier && !prev.barrier,
        }
    }
}

/// Rising edges of the edge-triggered intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pressed {
    pub hyper: bool,
    pub fire: bool,
    pub disable: bool,
    pub gravity: bool,
    pub barrier: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_keys_cancel() {
        let input = InputState {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.movement(), (0, -1));
    }

    #[test]
    fn test_diagonal_movement() {
        let input = InputState {
            down: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.movement(), (1, 1));
    }

    #[test]
    fn test_edges_fire_once_per_press() {
        let held = InputState {
            fire: true,
            gravity: true,
            ..Default::default()
        };
        let released = InputState::default();

        let first = held.pressed_since(&released);
        assert!(first.fire && first.gravity);
        assert!(!first.barrier);

        let still_held = held.pressed_since(&held);
        assert_eq!(still_held, Pressed::default());
    }
}
