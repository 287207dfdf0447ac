//! Collision resolution pipeline
//!
//! Runs once per frame over category pairs in a fixed order. Each pair
//! decides which side is removed, the score delta and any side effect
//! (explosion, pickup drop, hit-point loss). Enemy and bomb kills by beams
//! resolve before the avatar checks, so a bomb shot down this frame can no
//! longer hurt the avatar.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;
use super::state::{
    Beam, BombState, EnemyKind, GameEvent, GameState, KillCause, Mood, Pickup, PickupKind,
    retain_alive,
};
use super::targeting::fan_release;
use crate::consts::*;

/// Run every category pair in pipeline order
pub fn resolve_collisions(state: &mut GameState) {
    basic_enemies_vs_beams(state);
    bombs_vs_beams(state);
    armored_enemies_vs_beams(state);
    enemies_vs_gravity(state);
    projectiles_vs_gravity(state);
    projectiles_vs_shields(state);
    avatar_vs_pickups(state);
    avatar_vs_projectiles(state);
}

/// Mark every live beam overlapping `rect` as consumed; returns how many were
fn consume_beams(rect: &Rect, beams: &[Beam], dead: &mut [bool]) -> u32 {
    let mut hits = 0;
    for (bi, beam) in beams.iter().enumerate() {
        if !dead[bi] && rect.intersects(&beam.rect) {
            dead[bi] = true;
            hits += 1;
        }
    }
    hits
}

/// Basic enemies die to any beam; every overlapping beam is consumed but the
/// kill is scored once.
pub fn basic_enemies_vs_beams(state: &mut GameState) {
    let mut beam_dead = vec![false; state.beams.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut kills = Vec::new();

    for (ei, enemy) in state.enemies.iter().enumerate() {
        if enemy.kind != EnemyKind::Basic {
            continue;
        }
        if consume_beams(&enemy.rect, &state.beams, &mut beam_dead) > 0 {
            enemy_dead[ei] = true;
            kills.push(enemy.rect.center);
        }
    }

    retain_alive(&mut state.enemies, &enemy_dead);
    retain_alive(&mut state.beams, &beam_dead);

    for center in kills {
        state.award(SCORE_BASIC_KILL);
        state.spawn_explosion(center, EXPLOSION_LIFE_ENEMY);
        state.avatar.set_mood(Mood::Joy);
        state.events.push(GameEvent::EnemyDestroyed {
            kind: EnemyKind::Basic,
            cause: KillCause::Beam,
        });
        maybe_drop_pickup(state, center);
    }
}

/// Chance-based pickup at a destroyed basic enemy's position
fn maybe_drop_pickup(state: &mut GameState, center: Vec2) {
    if !state.rng.random_bool(PICKUP_DROP_CHANCE) {
        return;
    }
    let kind = if state.rng.random_bool(0.5) {
        PickupKind::Spanner
    } else {
        PickupKind::Doublescore
    };
    let id = state.next_entity_id();
    let rect = Rect::new(center, PICKUP_SIZE).clamped_into_arena();
    log::debug!("{:?} dropped at ({:.0}, {:.0})", kind, center.x, center.y);
    state.pickups.push(Pickup { id, kind, rect });
}

/// Bombs and beams annihilate each other
pub fn bombs_vs_beams(state: &mut GameState) {
    let mut beam_dead = vec![false; state.beams.len()];
    let mut bomb_dead = vec![false; state.bombs.len()];
    let mut destroyed = Vec::new();

    for (bi, bomb) in state.bombs.iter().enumerate() {
        if consume_beams(&bomb.rect, &state.beams, &mut beam_dead) > 0 {
            bomb_dead[bi] = true;
            destroyed.push(bomb.rect.center);
        }
    }

    retain_alive(&mut state.bombs, &bomb_dead);
    retain_alive(&mut state.beams, &beam_dead);

    for center in destroyed {
        state.award(SCORE_BOMB);
        state.spawn_explosion(center, EXPLOSION_LIFE_SMALL);
        state.events.push(GameEvent::BombDestroyed);
    }
}

/// Pattern enemies and the boss lose one hit-point per beam
pub fn armored_enemies_vs_beams(state: &mut GameState) {
    let mut beam_dead = vec![false; state.beams.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut points = 0;
    let mut kills = Vec::new();

    let GameState { enemies, beams, .. } = &mut *state;
    for (ei, enemy) in enemies.iter_mut().enumerate() {
        if !enemy.kind.is_armored() {
            continue;
        }
        for (bi, beam) in beams.iter().enumerate() {
            if beam_dead[bi] || !enemy.rect.intersects(&beam.rect) {
                continue;
            }
            beam_dead[bi] = true;
            enemy.hp = enemy.hp.saturating_sub(1);
            points += SCORE_ARMORED_HIT;
            if enemy.hp == 0 {
                enemy_dead[ei] = true;
                points += SCORE_ARMORED_KILL;
                kills.push((enemy.kind, enemy.rect.center));
                break;
            }
        }
    }

    retain_alive(&mut state.enemies, &enemy_dead);
    retain_alive(&mut state.beams, &beam_dead);
    state.award(points);

    for (kind, center) in kills {
        log::info!("{:?} destroyed at tick {}", kind, state.tick);
        state.spawn_explosion(center, EXPLOSION_LIFE_LARGE);
        state.avatar.set_mood(Mood::Joy);
        state.events.push(GameEvent::EnemyDestroyed {
            kind,
            cause: KillCause::Beam,
        });
    }
}

fn overlaps_any(rect: &Rect, zones: impl IntoIterator<Item = Rect>) -> bool {
    zones.into_iter().any(|zone| rect.intersects(&zone))
}

/// Any enemy inside a gravity field is destroyed; the field persists
pub fn enemies_vs_gravity(state: &mut GameState) {
    if state.gravity_fields.is_empty() {
        return;
    }
    let zones: Vec<Rect> = state.gravity_fields.iter().map(|g| g.rect).collect();
    let mut kills = Vec::new();
    state.enemies.retain(|enemy| {
        let hit = overlaps_any(&enemy.rect, zones.iter().copied());
        if hit {
            kills.push((enemy.kind, enemy.rect.center));
        }
        !hit
    });

    for (kind, center) in kills {
        state.award(SCORE_BASIC_KILL);
        state.spawn_explosion(center, EXPLOSION_LIFE_SMALL);
        state.events.push(GameEvent::EnemyDestroyed {
            kind,
            cause: KillCause::Gravity,
        });
    }
}

/// Remove bombs and bullets overlapping any of `zones`; bombs score and explode
fn absorb_projectiles(state: &mut GameState, zones: &[Rect]) {
    let mut bombs_hit = Vec::new();
    state.bombs.retain(|bomb| {
        let hit = overlaps_any(&bomb.rect, zones.iter().copied());
        if hit {
            bombs_hit.push(bomb.rect.center);
        }
        !hit
    });
    state
        .bullets
        .retain(|bullet| !overlaps_any(&bullet.rect, zones.iter().copied()));

    for center in bombs_hit {
        state.award(SCORE_BOMB);
        state.spawn_explosion(center, EXPLOSION_LIFE_SMALL);
        state.events.push(GameEvent::BombDestroyed);
    }
}

pub fn projectiles_vs_gravity(state: &mut GameState) {
    if state.gravity_fields.is_empty() {
        return;
    }
    let zones: Vec<Rect> = state.gravity_fields.iter().map(|g| g.rect).collect();
    absorb_projectiles(state, &zones);
}

pub fn projectiles_vs_shields(state: &mut GameState) {
    if state.shields.is_empty() {
        return;
    }
    let zones: Vec<Rect> = state.shields.iter().map(|s| s.rect).collect();
    absorb_projectiles(state, &zones);
}

/// Collect pickups touching the avatar
pub fn avatar_vs_pickups(state: &mut GameState) {
    let avatar_rect = state.avatar.rect;
    let mut collected = Vec::new();
    state.pickups.retain(|pickup| {
        let hit = pickup.rect.intersects(&avatar_rect);
        if hit {
            collected.push(pickup.kind);
        }
        !hit
    });

    for kind in collected {
        match kind {
            PickupKind::Spanner => {
                state.avatar.charges = SPANNER_CHARGES;
                state.avatar.set_mood(Mood::Awakened);
                fan_release(state, FAN_COUNT, false);
            }
            PickupKind::Doublescore => {
                state.double_score();
                state.avatar.set_mood(Mood::Joy);
            }
        }
        log::debug!("Picked up {:?}, score {}", kind, state.score);
        state.events.push(GameEvent::PickupCollected { kind });
    }
}

/// Bombs and bullets reaching the avatar. Inactive bombs pass through.
pub fn avatar_vs_projectiles(state: &mut GameState) {
    let avatar_rect = state.avatar.rect;
    let hyper = state.avatar.is_hyper();

    let mut bombs_hit = Vec::new();
    state.bombs.retain(|bomb| {
        let hit = bomb.state == BombState::Active && bomb.rect.intersects(&avatar_rect);
        if hit {
            bombs_hit.push(bomb.rect.center);
        }
        !hit
    });
    let before = state.bullets.len();
    state
        .bullets
        .retain(|bullet| !bullet.rect.intersects(&avatar_rect));
    let bullets_hit = before - state.bullets.len();

    for center in bombs_hit {
        state.spawn_explosion(center, EXPLOSION_LIFE_SMALL);
        if hyper {
            state.award(SCORE_BOMB);
            state.events.push(GameEvent::BombDestroyed);
        } else {
            hit_avatar(state);
        }
    }
    for _ in 0..bullets_hit {
        if hyper {
            state.award(SCORE_BOMB);
        } else {
            hit_avatar(state);
        }
    }
}

fn hit_avatar(state: &mut GameState) {
    state.avatar.damage();
    state.flash_frames = FLASH_FRAMES;
    log::info!(
        "Avatar hit at tick {}, health {}",
        state.tick,
        state.avatar.health
    );
    state.events.push(GameEvent::AvatarHit {
        health: state.avatar.health,
    });
}
