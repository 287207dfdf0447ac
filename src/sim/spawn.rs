//! Timer-gated spawning of enemies and enemy attacks
//!
//! All timers are derived from the frame counter, so a run is fully
//! determined by its seed and input stream.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, orientation_vector};
use super::state::{Bomb, BombState, Bullet, Enemy, EnemyKind, GameEvent, GameState, bomb_speed};
use super::targeting::{aim_at, n_way};
use crate::consts::*;

/// Spawn the enemies whose window opens on the current tick
pub fn run_spawns(state: &mut GameState) {
    let tick = state.tick;

    if tick % BASIC_SPAWN_PERIOD == 0 {
        let id = state.next_entity_id();
        let enemy = Enemy::basic(id, &mut state.rng);
        state.enemies.push(enemy);
        state.events.push(GameEvent::EnemySpawned {
            kind: EnemyKind::Basic,
        });
    }

    if tick % PATTERN_SPAWN_PERIOD == PATTERN_SPAWN_OFFSET {
        let id = state.next_entity_id();
        let enemy = Enemy::pattern(id, &mut state.rng);
        log::info!("Pattern enemy {} spawned at tick {}", id, tick);
        state.enemies.push(enemy);
        state.events.push(GameEvent::EnemySpawned {
            kind: EnemyKind::Pattern,
        });
    }

    if tick % BOSS_SPAWN_PERIOD == BOSS_SPAWN_OFFSET {
        // Single-instance: a window that opens while a boss is alive is skipped
        if state.boss_alive() {
            log::debug!("Boss window at tick {} skipped, boss still alive", tick);
        } else {
            let id = state.next_entity_id();
            let enemy = Enemy::boss(id, &mut state.rng);
            log::info!("Boss {} spawned at tick {}", id, tick);
            state.enemies.push(enemy);
            state.events.push(GameEvent::EnemySpawned {
                kind: EnemyKind::Boss,
            });
        }
    }
}

/// Attacks queued by halted enemies during one frame
#[derive(Debug, Default)]
struct AttackPlan {
    bombs: Vec<Rect>,
    aimed: Vec<Vec2>,
    bursts: Vec<Vec2>,
}

/// Halted bombers drop on their interval; halted pattern enemies fire aimed
/// shots and radial bursts on their own attack timer. Disabled enemies never
/// attack.
pub fn run_enemy_attacks(state: &mut GameState) {
    let tick = state.tick;
    let mut plan = AttackPlan::default();

    for enemy in &mut state.enemies {
        if !enemy.is_halted() || enemy.is_disabled() {
            continue;
        }
        match enemy.kind {
            EnemyKind::Basic | EnemyKind::Boss => {
                if enemy.schedule.fires_at(tick) {
                    plan.bombs.push(enemy.rect);
                }
            }
            EnemyKind::Pattern => {
                enemy.attack_timer += 1;
                if enemy.attack_timer % PATTERN_BURST_INTERVAL == 0 {
                    plan.bursts.push(enemy.rect.center);
                } else if enemy.attack_timer % PATTERN_AIMED_INTERVAL == 0 {
                    plan.aimed.push(enemy.rect.center);
                }
            }
        }
    }

    for from in plan.bombs {
        drop_bomb(state, &from);
    }

    let target = state.avatar.rect.center;
    let target_vel = state.avatar.velocity;
    for origin in plan.aimed {
        let heading = aim_at(origin, target, target_vel, AIMED_BULLET_SPEED);
        let id = state.next_entity_id();
        state
            .bullets
            .push(Bullet::new(id, origin, AIMED_BULLET_SPEED, heading));
    }
    for origin in plan.bursts {
        n_way(state, origin, target, PATTERN_BURST_COUNT, BURST_BULLET_SPEED);
    }
}

/// Drop a bomb from the bottom of `from`, aimed at the avatar's current position
pub fn drop_bomb(state: &mut GameState, from: &Rect) {
    let radius = state.rng.random_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX);
    let color = state.rng.random_range(0..BOMB_COLORS);
    let center = Vec2::new(from.center.x, from.bottom());
    let rect = Rect::new(center, Vec2::splat(radius * 2.0)).clamped_into_arena();

    let dir = orientation_vector(from, &state.avatar.rect).unwrap_or_else(|| {
        log::warn!("Bomb dropped on top of the avatar, falling straight down");
        Vec2::Y
    });

    let id = state.next_entity_id();
    state.bombs.push(Bomb {
        id,
        rect,
        dir,
        speed: bomb_speed(state.score),
        state: BombState::Active,
        color,
    });
}
