//! Render snapshot
//!
//! Flattens the simulation state into a draw list for the render sink. The
//! list is rebuilt every frame and borrows nothing from the state.

use glam::Vec2;
use serde::Serialize;

use super::state::{BombState, Compass, EnemyKind, GameState, Mood, PickupKind};

/// Visual state of one drawable
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "sprite", rename_all = "snake_case")]
pub enum Sprite {
    Avatar {
        facing: Compass,
        mood: Mood,
        hyper: bool,
    },
    Enemy {
        kind: EnemyKind,
        disabled: bool,
        hp: u32,
    },
    Bomb {
        color: u8,
        inactive: bool,
    },
    Beam {
        charged: bool,
    },
    Bullet,
    Shield,
    Gravity,
    Pickup {
        kind: PickupKind,
    },
    Explosion {
        flipped: bool,
    },
    /// Full-screen damage flash
    Flash,
    /// Score and health readout
    Hud {
        score: u64,
        health: u8,
        charges: u32,
    },
}

/// One entry of the per-frame draw list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderItem {
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation in degrees (0 = east)
    pub heading: f32,
    #[serde(flatten)]
    pub sprite: Sprite,
}

impl RenderItem {
    fn new(pos: Vec2, size: Vec2, sprite: Sprite) -> Self {
        Self {
            pos,
            size,
            heading: 0.0,
            sprite,
        }
    }

    fn rotated(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }
}

/// Build the draw list, back to front
pub fn snapshot(state: &GameState) -> Vec<RenderItem> {
    let mut items = Vec::with_capacity(state.entity_count() + 3);

    for field in &state.gravity_fields {
        items.push(RenderItem::new(field.rect.center, field.rect.size, Sprite::Gravity));
    }
    for enemy in &state.enemies {
        items.push(RenderItem::new(
            enemy.rect.center,
            enemy.rect.size,
            Sprite::Enemy {
                kind: enemy.kind,
                disabled: enemy.is_disabled(),
                hp: enemy.hp,
            },
        ));
    }
    for pickup in &state.pickups {
        items.push(RenderItem::new(
            pickup.rect.center,
            pickup.rect.size,
            Sprite::Pickup { kind: pickup.kind },
        ));
    }
    for bomb in &state.bombs {
        items.push(RenderItem::new(
            bomb.rect.center,
            bomb.rect.size,
            Sprite::Bomb {
                color: bomb.color,
                inactive: bomb.state == BombState::Inactive,
            },
        ));
    }
    for bullet in &state.bullets {
        items.push(RenderItem::new(bullet.rect.center, bullet.rect.size, Sprite::Bullet));
    }
    for beam in &state.beams {
        items.push(
            RenderItem::new(
                beam.rect.center,
                beam.rect.size,
                Sprite::Beam {
                    charged: beam.is_charged(),
                },
            )
            .rotated(beam.heading),
        );
    }
    for shield in &state.shields {
        items.push(
            RenderItem::new(shield.rect.center, shield.rect.size, Sprite::Shield)
                .rotated(shield.heading),
        );
    }

    let avatar = &state.avatar;
    items.push(
        RenderItem::new(
            avatar.rect.center,
            avatar.rect.size,
            Sprite::Avatar {
                facing: avatar.facing,
                mood: avatar.mood,
                hyper: avatar.is_hyper(),
            },
        )
        .rotated(avatar.facing.heading()),
    );

    for explosion in &state.explosions {
        items.push(RenderItem::new(
            explosion.rect.center,
            explosion.rect.size,
            Sprite::Explosion {
                flipped: explosion.flipped(),
            },
        ));
    }

    if state.flash_frames > 0 {
        let arena = super::geometry::Rect::arena();
        items.push(RenderItem::new(arena.center, arena.size, Sprite::Flash));
    }

    items.push(RenderItem::new(
        Vec2::ZERO,
        Vec2::ZERO,
        Sprite::Hud {
            score: state.score,
            health: avatar.health,
            charges: avatar.charges,
        },
    ));
    items
}
