//! Musou - a frame-stepped arcade combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, targeting, collisions, abilities)
//! - `platform`: Clock, input and render-sink collaborators driven by the frame loop
//! - `settings`: Runner configuration loaded from JSON
//! - `autopilot`: Demo input generator for headless runs
//! - `runner`: Frame loop tying the simulation to its collaborators

pub mod autopilot;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation rate (frames per second)
    pub const SIM_HZ: u32 = 50;

    /// Simulation area (screen coordinates, +y points down)
    pub const WIDTH: f32 = 1000.0;
    pub const HEIGHT: f32 = 600.0;

    /// Avatar defaults
    pub const AVATAR_START: Vec2 = Vec2::new(900.0, 400.0);
    pub const AVATAR_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const AVATAR_SPEED: f32 = 10.0;
    pub const AVATAR_HEALTH: u8 = 3;
    /// Frames a mood reaction stays on the avatar sprite
    pub const MOOD_FRAMES: u32 = 25;
    /// Frames the screen flashes after the avatar takes damage
    pub const FLASH_FRAMES: u32 = 25;

    /// Basic enemy
    pub const BASIC_SIZE: Vec2 = Vec2::new(64.0, 64.0);
    pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
    pub const HALT_DEPTH_MIN: f32 = 50.0;
    pub const HALT_DEPTH_MAX: f32 = HEIGHT / 2.0;
    pub const BASIC_DROP_MIN: u32 = 50;
    pub const BASIC_DROP_MAX: u32 = 300;
    pub const BASIC_SPAWN_PERIOD: u64 = 200;

    /// Pattern enemy
    pub const PATTERN_SIZE: Vec2 = Vec2::new(80.0, 80.0);
    pub const PATTERN_HP: u32 = 30;
    pub const PATTERN_PATROL_SPEED: f32 = 3.0;
    pub const PATTERN_SPAWN_PERIOD: u64 = 1300;
    pub const PATTERN_SPAWN_OFFSET: u64 = 9;
    pub const PATTERN_AIMED_INTERVAL: u32 = 50;
    pub const PATTERN_BURST_INTERVAL: u32 = 150;
    pub const PATTERN_BURST_COUNT: usize = 12;
    pub const AIMED_BULLET_SPEED: f32 = 6.0;
    pub const BURST_BULLET_SPEED: f32 = 4.0;

    /// Boss
    pub const BOSS_SIZE: Vec2 = Vec2::new(160.0, 120.0);
    pub const BOSS_HP: u32 = 20;
    pub const BOSS_DROP_MIN: u32 = 20;
    pub const BOSS_DROP_MAX: u32 = 60;
    pub const BOSS_SPAWN_PERIOD: u64 = 1000;
    pub const BOSS_SPAWN_OFFSET: u64 = 500;

    /// Bombs
    pub const BOMB_RADIUS_MIN: f32 = 10.0;
    pub const BOMB_RADIUS_MAX: f32 = 50.0;
    pub const BOMB_BASE_SPEED: f32 = 6.0;
    pub const BOMB_MAX_SPEED: f32 = 14.0;
    /// Extra bomb speed per 100 points of score
    pub const BOMB_SPEED_PER_100: f32 = 0.5;
    pub const BOMB_COLORS: u8 = 6;

    /// Beams
    pub const BEAM_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const BEAM_SPEED: f32 = 10.0;
    pub const CHARGED_SCALE: f32 = 3.0;
    pub const CHARGED_FRAMES: u32 = 40;
    pub const BEAM_COOLDOWN: u32 = 5;
    pub const CHARGED_COOLDOWN: u32 = 2;
    pub const FAN_COUNT: usize = 7;
    /// Half of the fan release arc (degrees)
    pub const FAN_HALF_ARC: f32 = 50.0;

    /// Bullets
    pub const BULLET_SIZE: Vec2 = Vec2::new(20.0, 20.0);

    /// Pickups
    pub const PICKUP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
    pub const PICKUP_FALL_SPEED: f32 = 3.0;
    pub const PICKUP_DROP_CHANCE: f64 = 0.25;
    pub const SPANNER_CHARGES: u32 = 10;

    /// Explosions
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(64.0, 64.0);
    pub const EXPLOSION_LIFE_SMALL: i32 = 50;
    pub const EXPLOSION_LIFE_ENEMY: i32 = 100;
    pub const EXPLOSION_LIFE_LARGE: i32 = 200;

    /// Fields
    pub const SHIELD_THICKNESS: f32 = 20.0;
    pub const SHIELD_LIFE: i32 = 400;
    pub const GRAVITY_LIFE: i32 = 400;

    /// Ability costs
    pub const DISABLE_COST: u64 = 20;
    pub const BARRIER_COST: u64 = 50;
    pub const HYPER_COST: u64 = 100;
    pub const GRAVITY_COST: u64 = 200;
    pub const HYPER_FRAMES: u32 = 500;

    /// Score awards
    pub const SCORE_BASIC_KILL: u64 = 10;
    pub const SCORE_BOMB: u64 = 1;
    pub const SCORE_ARMORED_HIT: u64 = 5;
    pub const SCORE_ARMORED_KILL: u64 = 200;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Unit vector for a heading in degrees (0° = east, +90° = north on screen)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Heading in degrees of a screen-space vector (inverse of `heading_vector`)
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    (-v.y).atan2(v.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_round_trip_cardinals() {
        let east = heading_vector(0.0);
        assert!((east - Vec2::X).length() < 1e-6);
        let north = heading_vector(90.0);
        assert!((north - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert!((heading_of(Vec2::new(0.0, 1.0)) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(190.0) + 170.0).abs() < 1e-4);
        assert!((normalize_degrees(-540.0) + 180.0).abs() < 1e-4);
        assert!((normalize_degrees(45.0) - 45.0).abs() < 1e-4);
    }
}
