//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No clock, input device or rendering dependencies

pub mod ability;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod movement;
pub mod render;
pub mod spawn;
pub mod state;
pub mod targeting;
pub mod tick;

pub use geometry::{Rect, fully_in_bounds, in_bounds, orientation_vector};
pub use input::{InputState, Pressed};
pub use render::{RenderItem, Sprite, snapshot};
pub use state::{
    Ability, Avatar, AvatarState, Beam, Bomb, BombState, Bullet, Compass, Enemy, EnemyKind,
    GameEvent, GamePhase, GameState, KillCause, PickupKind,
};
pub use targeting::{Intercept, aim_at, fan_release, n_way, predict};
pub use tick::tick;
