//! Per-frame movement integration
//!
//! Every mover is checked against the simulation bounds after it moves.
//! Leaving the area destroys the entity, except bombs (which reflect) and
//! fields (which only count down).

use glam::Vec2;

use super::geometry::{Rect, fully_in_bounds, in_bounds};
use super::input::InputState;
use super::state::{Avatar, AvatarState, Compass, EnemyPhase, GameState, Mood};
use crate::consts::{BEAM_SIZE, PICKUP_FALL_SPEED};

/// Advance every non-avatar entity by one frame
pub fn advance_entities(state: &mut GameState) {
    advance_enemies(state);
    advance_bombs(state);
    advance_beams(state);
    advance_bullets(state);
    advance_pickups(state);
    advance_countdowns(state);
    state.flash_frames = state.flash_frames.saturating_sub(1);
}

/// Descend to the halt depth, then patrol (pattern enemies) or hold position
pub fn advance_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        match enemy.phase {
            EnemyPhase::Descending => {
                if enemy.rect.center.y > enemy.halt_depth {
                    enemy.phase = EnemyPhase::Halted;
                } else {
                    enemy.rect.center.y += enemy.descent_speed;
                }
            }
            EnemyPhase::Halted => {
                if let Some(patrol) = enemy.patrol.as_mut() {
                    let x = enemy.rect.center.x + patrol.vx;
                    if x < patrol.min_x || x > patrol.max_x {
                        patrol.vx = -patrol.vx;
                        enemy.rect.center.x = x.clamp(patrol.min_x, patrol.max_x);
                    } else {
                        enemy.rect.center.x = x;
                    }
                }
            }
        }
    }
    let before = state.enemies.len();
    state.enemies.retain(|e| fully_in_bounds(&e.rect));
    if state.enemies.len() != before {
        log::debug!("{} enemies left the area", before - state.enemies.len());
    }
}

/// Move bombs, reflecting off the bounds on whichever axis they would leave
pub fn advance_bombs(state: &mut GameState) {
    for bomb in &mut state.bombs {
        let v = bomb.velocity();
        bomb.rect.translate(v);
        let (horizontal, vertical) = in_bounds(&bomb.rect);
        if !horizontal {
            bomb.rect.center.x -= v.x;
            bomb.dir.x = -bomb.dir.x;
        }
        if !vertical {
            bomb.rect.center.y -= v.y;
            bomb.dir.y = -bomb.dir.y;
        }
        if !fully_in_bounds(&bomb.rect) {
            bomb.rect = bomb.rect.clamped_into_arena();
        }
    }
}

pub fn advance_beams(state: &mut GameState) {
    for beam in &mut state.beams {
        if beam.charge_frames > 0 {
            beam.charge_frames -= 1;
            if beam.charge_frames == 0 {
                beam.rect.size = BEAM_SIZE;
            }
        }
        let v = beam.velocity();
        beam.rect.translate(v);
    }
    state.beams.retain(|b| fully_in_bounds(&b.rect));
}

pub fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.rect.translate(bullet.vel);
    }
    state.bullets.retain(|b| fully_in_bounds(&b.rect));
}

pub fn advance_pickups(state: &mut GameState) {
    for pickup in &mut state.pickups {
        pickup.rect.translate(Vec2::new(0.0, PICKUP_FALL_SPEED));
    }
    state.pickups.retain(|p| fully_in_bounds(&p.rect));
}

/// Explosions, shields and gravity fields live until their counter drops below zero
pub fn advance_countdowns(state: &mut GameState) {
    for explosion in &mut state.explosions {
        explosion.life -= 1;
    }
    state.explosions.retain(|e| e.life >= 0);

    for shield in &mut state.shields {
        shield.life -= 1;
    }
    state.shields.retain(|s| s.life >= 0);

    let fields = state.gravity_fields.len();
    for field in &mut state.gravity_fields {
        field.life -= 1;
    }
    state.gravity_fields.retain(|g| g.life >= 0);
    if state.gravity_fields.len() < fields {
        log::info!("Gravity field expired at tick {}", state.tick);
    }
}

/// Apply one displacement, reverting it on each axis that would leave the area
fn step_with_revert(rect: &mut Rect, step: Vec2) {
    rect.translate(step);
    let (horizontal, vertical) = in_bounds(rect);
    if !horizontal {
        rect.center.x -= step.x;
    }
    if !vertical {
        rect.center.y -= step.y;
    }
}

/// Move the avatar from held direction intents and update its facing
pub fn move_avatar(avatar: &mut Avatar, input: &InputState) {
    let (dx, dy) = input.movement();
    let step = input.movement_vec() * avatar.speed;
    let start = avatar.rect.center;

    step_with_revert(&mut avatar.rect, step);
    if input.boost {
        step_with_revert(&mut avatar.rect, step);
    }
    avatar.velocity = avatar.rect.center - start;

    if let Some(dir) = Compass::from_offset(dx, dy) {
        avatar.facing = dir;
    }
}

/// Count down Hyper and the mood reaction
pub fn update_avatar_status(avatar: &mut Avatar) {
    avatar.state = match avatar.state {
        AvatarState::Hyper { remaining: 0 } => {
            log::info!("Hyper expired");
            AvatarState::Normal
        }
        AvatarState::Hyper { remaining } => AvatarState::Hyper {
            remaining: remaining - 1,
        },
        AvatarState::Normal => AvatarState::Normal,
    };

    if avatar.mood_frames > 0 {
        avatar.mood_frames -= 1;
        if avatar.mood_frames == 0 {
            avatar.mood = Mood::Neutral;
        }
    }
    avatar.fire_cooldown = avatar.fire_cooldown.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Bomb, BombState, Enemy, Pickup, PickupKind, Shield};

    fn input(f: impl FnOnce(&mut InputState)) -> InputState {
        let mut i = InputState::default();
        f(&mut i);
        i
    }

    #[test]
    fn test_move_diagonal_and_facing() {
        let mut avatar = Avatar::default();
        avatar.rect.center = Vec2::new(500.0, 300.0);
        move_avatar(&mut avatar, &input(|i| {
            i.up = true;
            i.left = true;
        }));
        assert_eq!(avatar.rect.center, Vec2::new(490.0, 290.0));
        assert_eq!(avatar.facing, Compass::NorthWest);
    }

    #[test]
    fn test_zero_movement_keeps_facing() {
        let mut avatar = Avatar::default();
        avatar.facing = Compass::South;
        move_avatar(&mut avatar, &input(|i| {
            i.left = true;
            i.right = true;
        }));
        assert_eq!(avatar.facing, Compass::South);
        assert_eq!(avatar.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_boost_doubles_displacement() {
        let mut avatar = Avatar::default();
        avatar.rect.center = Vec2::new(500.0, 300.0);
        move_avatar(&mut avatar, &input(|i| {
            i.down = true;
            i.boost = true;
        }));
        assert_eq!(avatar.rect.center, Vec2::new(500.0, 320.0));
        assert_eq!(avatar.velocity, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_revert_is_per_axis() {
        let mut avatar = Avatar::default();
        // Flush against the right wall
        avatar.rect.center = Vec2::new(WIDTH - AVATAR_SIZE.x / 2.0, 300.0);
        move_avatar(&mut avatar, &input(|i| {
            i.right = true;
            i.up = true;
        }));
        assert_eq!(avatar.rect.center.x, WIDTH - AVATAR_SIZE.x / 2.0);
        assert_eq!(avatar.rect.center.y, 290.0);
        assert_eq!(avatar.facing, Compass::NorthEast);
    }

    #[test]
    fn test_hyper_countdown() {
        let mut avatar = Avatar::default();
        avatar.state = AvatarState::Hyper { remaining: 1 };
        update_avatar_status(&mut avatar);
        assert_eq!(avatar.state, AvatarState::Hyper { remaining: 0 });
        update_avatar_status(&mut avatar);
        assert_eq!(avatar.state, AvatarState::Normal);
    }

    #[test]
    fn test_enemy_descends_then_halts() {
        let mut state = GameState::new(11);
        let id = state.next_entity_id();
        let mut enemy = Enemy::basic(id, &mut state.rng);
        enemy.halt_depth = 60.0;
        state.enemies.push(enemy);

        for _ in 0..10 {
            advance_enemies(&mut state);
        }
        let enemy = &state.enemies[0];
        assert_eq!(enemy.phase, EnemyPhase::Halted);
        let y = enemy.rect.center.y;
        advance_enemies(&mut state);
        assert_eq!(state.enemies[0].rect.center.y, y);
    }

    #[test]
    fn test_pattern_enemy_patrols_within_lane() {
        let mut state = GameState::new(5);
        let id = state.next_entity_id();
        let mut enemy = Enemy::pattern(id, &mut state.rng);
        enemy.phase = EnemyPhase::Halted;
        let patrol = enemy.patrol.unwrap();
        state.enemies.push(enemy);
        for _ in 0..500 {
            advance_enemies(&mut state);
            let x = state.enemies[0].rect.center.x;
            assert!(x >= patrol.min_x && x <= patrol.max_x);
        }
    }

    #[test]
    fn test_bomb_reflects_instead_of_leaving() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.bombs.push(Bomb {
            id,
            rect: Rect::new(Vec2::new(WIDTH - 12.0, 300.0), Vec2::new(20.0, 20.0)),
            dir: Vec2::new(1.0, 0.0),
            speed: 6.0,
            state: BombState::Active,
            color: 0,
        });
        advance_bombs(&mut state);
        let bomb = &state.bombs[0];
        assert!(bomb.dir.x < 0.0);
        assert!(fully_in_bounds(&bomb.rect));
        assert_eq!(bomb.rect.center.x, WIDTH - 12.0);
    }

    #[test]
    fn test_beams_leaving_area_are_removed() {
        let mut state = GameState::new(1);
        state.avatar.rect.center = Vec2::new(WIDTH - 100.0, 300.0);
        state.spawn_beam(0.0, false);
        assert_eq!(state.beams.len(), 1);
        for _ in 0..20 {
            advance_beams(&mut state);
        }
        assert!(state.beams.is_empty());
    }

    #[test]
    fn test_charged_beam_shrinks_after_countdown() {
        let mut state = GameState::new(1);
        state.avatar.rect.center = Vec2::new(100.0, HEIGHT - 60.0);
        state.spawn_beam(Compass::East.heading(), true);
        for _ in 0..CHARGED_FRAMES {
            advance_beams(&mut state);
        }
        let beam = &state.beams[0];
        assert!(!beam.is_charged());
        assert_eq!(beam.rect.size, BEAM_SIZE);
    }

    #[test]
    fn test_pickup_falls_and_expires_at_floor() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            kind: PickupKind::Doublescore,
            rect: Rect::new(Vec2::new(300.0, HEIGHT - 16.0), PICKUP_SIZE),
        });
        advance_pickups(&mut state);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_countdown_removes_below_zero() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.shields.push(Shield {
            id,
            rect: Rect::new(Vec2::new(300.0, 300.0), Vec2::new(20.0, 100.0)),
            heading: 0.0,
            life: 1,
        });
        advance_countdowns(&mut state);
        assert_eq!(state.shields[0].life, 0);
        advance_countdowns(&mut state);
        assert!(state.shields.is_empty());
    }
}
