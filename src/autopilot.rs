//! Demo autopilot
//!
//! Plays the game from the simulation state alone so headless runs exercise
//! every system. Decisions read nothing but the state, so a seeded run stays
//! reproducible.

use glam::Vec2;

use crate::consts::*;
use crate::sim::input::InputState;
use crate::sim::state::{BombState, Compass, GameState};

/// Threats closer than this trigger evasion
const DANGER_RADIUS: f32 = 150.0;
/// Horizontal slack when lining up under a target
const ALIGN_TOLERANCE: f32 = 12.0;
/// Preferred cruising height
const HOME_Y: f32 = HEIGHT - 100.0;

/// Input generator for idle/demo runs
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    last: InputState,
}

impl Autopilot {
    /// Produce the intents for the next frame
    pub fn next_input(&mut self, state: &GameState) -> InputState {
        let mut input = InputState::default();
        if state.is_over() {
            self.last = input;
            return input;
        }

        let avatar = &state.avatar;
        let pos = avatar.rect.center;

        // Closest live threat: active bombs and every bullet
        let threat = state
            .bombs
            .iter()
            .filter(|b| b.state == BombState::Active)
            .map(|b| (b.rect.center, b.velocity(), b.radius()))
            .chain(
                state
                    .bullets
                    .iter()
                    .map(|b| (b.rect.center, b.vel, BULLET_SIZE.x / 2.0)),
            )
            .filter(|(p, _, r)| p.distance(pos) - r < DANGER_RADIUS)
            .min_by(|a, b| {
                a.0.distance_squared(pos)
                    .total_cmp(&b.0.distance_squared(pos))
            });

        if let Some((threat_pos, threat_vel, _)) = threat {
            // Sidestep across the threat's path, away from it
            let away = pos - threat_pos;
            let side = threat_vel.perp();
            let dir = if side.length_squared() < f32::EPSILON {
                away
            } else if side.dot(away) >= 0.0 {
                side
            } else {
                -side
            };
            steer(&mut input, dir);
            input.boost = threat_pos.distance(pos) < DANGER_RADIUS / 2.0;

            if avatar.health == 1 && !avatar.is_hyper() && state.score >= HYPER_COST {
                input.hyper = true;
            } else if state.shields.is_empty() && state.score >= BARRIER_COST + DISABLE_COST {
                input.barrier = true;
            }
        } else if let Some(target) = state.enemies.iter().min_by(|a, b| {
            (a.rect.center.x - pos.x)
                .abs()
                .total_cmp(&(b.rect.center.x - pos.x).abs())
        }) {
            let dx = target.rect.center.x - pos.x;
            if dx.abs() > ALIGN_TOLERANCE {
                let dy = if pos.y < HOME_Y - 100.0 { 1.0 } else { 0.0 };
                steer(&mut input, Vec2::new(dx, dy * dx.abs()));
            } else if avatar.facing != Compass::North {
                // Tap up to face the target
                input.up = true;
            } else {
                input.fire = true;
            }
        } else if pos.y < HOME_Y {
            input.down = true;
        }

        if state.gravity_fields.is_empty()
            && state.enemies.len() >= 3
            && state.score >= GRAVITY_COST + BARRIER_COST
        {
            input.gravity = true;
        }
        if state.bombs.len() >= 6 && state.score >= DISABLE_COST {
            input.disable = true;
        }

        self.release_repeats(&mut input);
        self.last = input;
        input
    }

    /// Triggers act on key-down; never hold one across two frames
    fn release_repeats(&self, input: &mut InputState) {
        input.fire &= !self.last.fire;
        input.hyper &= !self.last.hyper;
        input.disable &= !self.last.disable;
        input.gravity &= !self.last.gravity;
        input.barrier &= !self.last.barrier;
    }
}

fn steer(input: &mut InputState, dir: Vec2) {
    let dir = dir.normalize_or_zero();
    input.left = dir.x < -0.3;
    input.right = dir.x > 0.3;
    input.up = dir.y < -0.3;
    input.down = dir.y > 0.3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Bomb, Enemy, EnemyPhase};
    use crate::sim::tick;

    #[test]
    fn test_idle_state_returns_home() {
        let mut pilot = Autopilot::default();
        let mut state = GameState::new(1);
        let input = pilot.next_input(&state);
        assert_eq!(input.movement(), (0, 1));
        assert!(!input.fire);

        state.avatar.rect.center.y = HOME_Y;
        let input = pilot.next_input(&state);
        assert_eq!(input.movement(), (0, 0));
    }

    #[test]
    fn test_evades_nearby_bomb() {
        let mut pilot = Autopilot::default();
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.bombs.push(Bomb {
            id,
            rect: Rect::new(state.avatar.rect.center - Vec2::new(0.0, 80.0), Vec2::splat(20.0)),
            dir: Vec2::Y,
            speed: 6.0,
            state: BombState::Active,
            color: 1,
        });
        let input = pilot.next_input(&state);
        let (dx, _) = input.movement();
        assert_ne!(dx, 0);
    }

    #[test]
    fn test_triggers_are_released_between_frames() {
        let mut pilot = Autopilot::default();
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        let mut enemy = Enemy::basic(id, &mut state.rng);
        enemy.phase = EnemyPhase::Halted;
        enemy.rect.center.x = state.avatar.rect.center.x;
        state.enemies.push(enemy);
        state.avatar.facing = Compass::North;

        let first = pilot.next_input(&state);
        let second = pilot.next_input(&state);
        assert!(first.fire);
        assert!(!second.fire);
    }

    #[test]
    fn test_long_run_reaches_limit_or_game_over() {
        let mut pilot = Autopilot::default();
        let mut state = GameState::new(42);
        for _ in 0..3000 {
            let input = pilot.next_input(&state);
            tick(&mut state, &input);
        }
        assert!(state.tick == 3000 || state.is_over());
        assert!(state.avatar.health <= AVATAR_HEALTH);
    }
}
