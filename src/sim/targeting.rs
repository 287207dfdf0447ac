//! Projectile pattern generation and predictive aiming
//!
//! - Fan release: beams spread evenly across a fixed arc around a heading
//! - Radial burst (`n_way`): bullets spread evenly around the full circle
//! - Predictive intercept: closed-form lead for a constant-velocity target

use glam::Vec2;

use super::state::{Bullet, GameState};
use crate::consts::FAN_HALF_ARC;
use crate::{heading_of, normalize_degrees};

/// Heading used when an aim direction cannot be derived (straight down)
pub const FALLBACK_HEADING: f32 = -90.0;

/// Headings of an `n`-beam fan centred on `base`.
///
/// Offsets are spaced evenly from `-FAN_HALF_ARC` to `+FAN_HALF_ARC`
/// inclusive. Fewer than two beams collapse to the base heading.
pub fn fan_headings(base: f32, n: usize) -> Vec<f32> {
    if n < 2 {
        return vec![base];
    }
    let step = 2.0 * FAN_HALF_ARC / (n - 1) as f32;
    (0..n)
        .map(|i| normalize_degrees(base - FAN_HALF_ARC + step * i as f32))
        .collect()
}

/// Release a fan of `n` beams from the avatar along its facing
pub fn fan_release(state: &mut GameState, n: usize, charged: bool) {
    let base = state.avatar.facing.heading();
    for heading in fan_headings(base, n) {
        state.spawn_beam(heading, charged);
    }
}

/// Heading from `from` to `to`, or `None` when they coincide
pub fn direct_heading(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        None
    } else {
        Some(heading_of(delta))
    }
}

/// Headings of an `n`-way radial burst starting at the attacker→target angle
pub fn n_way_headings(origin: Vec2, target: Vec2, n: usize) -> Vec<f32> {
    let base = direct_heading(origin, target).unwrap_or_else(|| {
        log::warn!("n_way: target coincides with attacker, aiming down");
        FALLBACK_HEADING
    });
    let step = 360.0 / n.max(1) as f32;
    (0..n).map(|i| base + step * i as f32).collect()
}

/// Fire an `n`-way radial burst of bullets from `origin` toward `target`
pub fn n_way(state: &mut GameState, origin: Vec2, target: Vec2, n: usize, speed: f32) {
    for heading in n_way_headings(origin, target, n) {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::new(id, origin, speed, heading));
    }
}

/// Solution of the intercept problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intercept {
    /// Frames until the projectile meets the target
    pub time: f32,
    /// Where the target will be at that time
    pub point: Vec2,
}

/// Predict where a projectile of `speed` launched from `attacker` meets a
/// target at `target` moving with constant per-frame `target_vel`.
///
/// Solves `|D + V t| = s t` for the smallest nonnegative `t`, i.e.
/// `(V·V - s²) t² + 2 (D·V) t + D·D = 0`. Returns `None` when no
/// nonnegative real root exists (negative radicand, both roots negative, or
/// a target the projectile can never catch).
pub fn predict(attacker: Vec2, target: Vec2, target_vel: Vec2, speed: f32) -> Option<Intercept> {
    if speed <= 0.0 || !speed.is_finite() {
        return None;
    }
    let d = target - attacker;
    let c = d.length_squared();
    if c <= f32::EPSILON {
        return Some(Intercept {
            time: 0.0,
            point: target,
        });
    }

    let a = target_vel.length_squared() - speed * speed;
    let b = 2.0 * d.dot(target_vel);

    let time = if a.abs() < 1e-6 {
        // Target as fast as the projectile: the equation is linear
        if b.abs() < 1e-6 {
            return None;
        }
        let t = -c / b;
        (t >= 0.0).then_some(t)?
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let t1 = (-b - sq) / (2.0 * a);
        let t2 = (-b + sq) / (2.0 * a);
        [t1, t2]
            .into_iter()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .min_by(|x, y| x.total_cmp(y))?
    };

    Some(Intercept {
        time,
        point: target + target_vel * time,
    })
}

/// Heading that leads a moving target, falling back to direct aim when the
/// intercept is unreachable and to `FALLBACK_HEADING` when degenerate.
pub fn aim_at(attacker: Vec2, target: Vec2, target_vel: Vec2, speed: f32) -> f32 {
    let aim_point = match predict(attacker, target, target_vel, speed) {
        Some(intercept) => intercept.point,
        None => {
            log::debug!("predict: no intercept for speed {speed}, using direct aim");
            target
        }
    };
    direct_heading(attacker, aim_point)
        .or_else(|| direct_heading(attacker, target))
        .unwrap_or(FALLBACK_HEADING)
}
