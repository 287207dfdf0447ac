//! Game state and core simulation types
//!
//! Every entity collection lives in `GameState`, which the frame loop owns and
//! hands to each system by `&mut`. Entities never hold references to each
//! other; cross-entity reads happen inside a single system call.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::input::InputState;
use crate::consts::*;
use crate::heading_vector;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Avatar health reached zero; terminal
    GameOver,
}

/// Eight discretized facing directions of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compass {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Compass {
    /// Direction for a summed key delta (screen convention, +y down).
    /// A zero delta has no direction.
    pub fn from_offset(dx: i8, dy: i8) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Compass::East),
            (1, -1) => Some(Compass::NorthEast),
            (0, -1) => Some(Compass::North),
            (-1, -1) => Some(Compass::NorthWest),
            (-1, 0) => Some(Compass::West),
            (-1, 1) => Some(Compass::SouthWest),
            (0, 1) => Some(Compass::South),
            (1, 1) => Some(Compass::SouthEast),
            _ => None,
        }
    }

    /// Raw grid offset (each component in -1..=1)
    pub fn offset(self) -> (i8, i8) {
        match self {
            Compass::East => (1, 0),
            Compass::NorthEast => (1, -1),
            Compass::North => (0, -1),
            Compass::NorthWest => (-1, -1),
            Compass::West => (-1, 0),
            Compass::SouthWest => (-1, 1),
            Compass::South => (0, 1),
            Compass::SouthEast => (1, 1),
        }
    }

    /// Heading in degrees (0° = east, counter-clockwise on screen)
    pub fn heading(self) -> f32 {
        match self {
            Compass::East => 0.0,
            Compass::NorthEast => 45.0,
            Compass::North => 90.0,
            Compass::NorthWest => 135.0,
            Compass::West => 180.0,
            Compass::SouthWest => -135.0,
            Compass::South => -90.0,
            Compass::SouthEast => -45.0,
        }
    }

    /// Facing as a unit vector
    pub fn unit(self) -> Vec2 {
        heading_vector(self.heading())
    }
}

/// Avatar vulnerability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarState {
    Normal,
    /// Invulnerable to bombs and bullets; counts down once per frame
    Hyper { remaining: u32 },
}

/// Short-lived sprite reaction of the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Neutral,
    /// An enemy went down or the score was doubled
    Joy,
    /// Picked up a spanner
    Awakened,
    /// Took a hit
    Hurt,
}

/// The player-controlled avatar
#[derive(Debug, Clone)]
pub struct Avatar {
    pub rect: Rect,
    pub facing: Compass,
    pub speed: f32,
    pub health: u8,
    pub state: AvatarState,
    /// Charged shots left from spanner pickups
    pub charges: u32,
    /// Frames until the next shot is allowed
    pub fire_cooldown: u32,
    /// Displacement applied during the latest avatar update
    pub velocity: Vec2,
    pub mood: Mood,
    pub mood_frames: u32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            rect: Rect::new(AVATAR_START, AVATAR_SIZE),
            facing: Compass::East,
            speed: AVATAR_SPEED,
            health: AVATAR_HEALTH,
            state: AvatarState::Normal,
            charges: 0,
            fire_cooldown: 0,
            velocity: Vec2::ZERO,
            mood: Mood::Neutral,
            mood_frames: 0,
        }
    }
}

impl Avatar {
    pub fn is_hyper(&self) -> bool {
        matches!(self.state, AvatarState::Hyper { .. })
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose one point of health. Health never increases.
    pub fn damage(&mut self) {
        self.health = self.health.saturating_sub(1);
        self.set_mood(Mood::Hurt);
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
        self.mood_frames = MOOD_FRAMES;
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Descends, halts and drops bombs; dies to a single beam
    Basic,
    /// Armored patroller firing aimed shots and radial bursts
    Pattern,
    /// Single-instance armored bomber
    Boss,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Basic => BASIC_SIZE,
            EnemyKind::Pattern => PATTERN_SIZE,
            EnemyKind::Boss => BOSS_SIZE,
        }
    }

    pub fn max_hp(self) -> u32 {
        match self {
            EnemyKind::Basic => 1,
            EnemyKind::Pattern => PATTERN_HP,
            EnemyKind::Boss => BOSS_HP,
        }
    }

    /// Armored enemies lose hit-points per beam instead of dying outright
    pub fn is_armored(self) -> bool {
        !matches!(self, EnemyKind::Basic)
    }
}

/// Movement phase of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    Descending,
    Halted,
}

/// When an enemy is allowed to attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropSchedule {
    /// Attack on every tick that is a multiple of the interval
    Every(u32),
    /// Permanently suppressed by the disable ability
    Disabled,
}

impl DropSchedule {
    pub fn fires_at(self, tick: u64) -> bool {
        match self {
            DropSchedule::Every(interval) => interval > 0 && tick % interval as u64 == 0,
            DropSchedule::Disabled => false,
        }
    }

    pub fn is_enabled(self) -> bool {
        matches!(self, DropSchedule::Every(_))
    }
}

/// Horizontal patrol of a pattern enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub min_x: f32,
    pub max_x: f32,
    pub vx: f32,
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub descent_speed: f32,
    /// Depth (centre y) past which the enemy stops descending
    pub halt_depth: f32,
    pub phase: EnemyPhase,
    pub schedule: DropSchedule,
    pub hp: u32,
    /// Frames spent attacking (pattern enemies only)
    pub attack_timer: u32,
    pub patrol: Option<Patrol>,
}

impl Enemy {
    fn spawn_at(id: u32, kind: EnemyKind, x: f32, rng: &mut Pcg32) -> Self {
        let size = kind.size();
        let rect = Rect::new(Vec2::new(x, size.y / 2.0), size).clamped_into_arena();
        Self {
            id,
            kind,
            rect,
            descent_speed: ENEMY_DESCENT_SPEED,
            halt_depth: rng.random_range(HALT_DEPTH_MIN..=HALT_DEPTH_MAX),
            phase: EnemyPhase::Descending,
            schedule: DropSchedule::Disabled,
            hp: kind.max_hp(),
            attack_timer: 0,
            patrol: None,
        }
    }

    /// A basic enemy at a random column with a random drop interval
    pub fn basic(id: u32, rng: &mut Pcg32) -> Self {
        let half = BASIC_SIZE.x / 2.0;
        let x = rng.random_range(half..=WIDTH - half);
        let mut enemy = Self::spawn_at(id, EnemyKind::Basic, x, rng);
        enemy.schedule = DropSchedule::Every(rng.random_range(BASIC_DROP_MIN..=BASIC_DROP_MAX));
        enemy
    }

    /// A pattern enemy with a random patrol lane
    pub fn pattern(id: u32, rng: &mut Pcg32) -> Self {
        let half = PATTERN_SIZE.x / 2.0;
        let min_x = rng.random_range(half..=WIDTH / 2.0);
        let max_x = rng.random_range(WIDTH / 2.0..=WIDTH - half);
        let x = rng.random_range(min_x..=max_x);
        let vx = if rng.random_bool(0.5) {
            PATTERN_PATROL_SPEED
        } else {
            -PATTERN_PATROL_SPEED
        };
        let mut enemy = Self::spawn_at(id, EnemyKind::Pattern, x, rng);
        // Pattern enemies attack on their own timer; the schedule only gates it
        enemy.schedule = DropSchedule::Every(1);
        enemy.patrol = Some(Patrol { min_x, max_x, vx });
        enemy
    }

    /// The boss, entering at the top centre
    pub fn boss(id: u32, rng: &mut Pcg32) -> Self {
        let mut enemy = Self::spawn_at(id, EnemyKind::Boss, WIDTH / 2.0, rng);
        enemy.schedule = DropSchedule::Every(rng.random_range(BOSS_DROP_MIN..=BOSS_DROP_MAX));
        enemy
    }

    pub fn is_halted(&self) -> bool {
        self.phase == EnemyPhase::Halted
    }

    pub fn is_disabled(&self) -> bool {
        !self.schedule.is_enabled()
    }
}

/// Bomb harm state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    Active,
    /// Passes through the avatar harmlessly; still destroyable
    Inactive,
}

/// A bomb dropped by a basic enemy or the boss
#[derive(Debug, Clone)]
pub struct Bomb {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction of travel
    pub dir: Vec2,
    pub speed: f32,
    pub state: BombState,
    /// Index into the renderer's bomb palette
    pub color: u8,
}

impl Bomb {
    pub fn radius(&self) -> f32 {
        self.rect.size.x / 2.0
    }

    pub fn velocity(&self) -> Vec2 {
        self.dir * self.speed
    }
}

/// Bomb speed for the current score
pub fn bomb_speed(score: u64) -> f32 {
    (BOMB_BASE_SPEED + (score / 100) as f32 * BOMB_SPEED_PER_100).min(BOMB_MAX_SPEED)
}

/// A beam fired by the avatar
#[derive(Debug, Clone)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    /// Heading in degrees
    pub heading: f32,
    pub speed: f32,
    /// Frames left in charged (enlarged) mode
    pub charge_frames: u32,
}

impl Beam {
    /// A beam leaving the avatar along `heading`
    pub fn launch(id: u32, avatar: &Avatar, heading: f32, charged: bool) -> Self {
        let dir = heading_vector(heading);
        let center = avatar.rect.center + avatar.rect.size * dir;
        let (size, charge_frames) = if charged {
            (BEAM_SIZE * CHARGED_SCALE, CHARGED_FRAMES)
        } else {
            (BEAM_SIZE, 0)
        };
        Self {
            id,
            rect: Rect::new(center, size),
            heading,
            speed: BEAM_SPEED,
            charge_frames,
        }
    }

    pub fn is_charged(&self) -> bool {
        self.charge_frames > 0
    }

    pub fn velocity(&self) -> Vec2 {
        heading_vector(self.heading) * self.speed
    }
}

/// A bullet fired by a pattern enemy
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub rect: Rect,
    pub vel: Vec2,
}

impl Bullet {
    /// Bullet from a (speed, heading) pair
    pub fn new(id: u32, origin: Vec2, speed: f32, heading: f32) -> Self {
        Self {
            id,
            rect: Rect::new(origin, BULLET_SIZE),
            vel: heading_vector(heading) * speed,
        }
    }
}

/// Temporary barrier in front of the avatar
#[derive(Debug, Clone)]
pub struct Shield {
    pub id: u32,
    pub rect: Rect,
    /// Heading the barrier faces (degrees)
    pub heading: f32,
    pub life: i32,
}

/// Full-screen hazard destroying every enemy and projectile it overlaps
#[derive(Debug, Clone)]
pub struct GravityField {
    pub id: u32,
    pub rect: Rect,
    pub life: i32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Grants charged shots and a bonus fan release
    Spanner,
    /// Doubles the score
    Doublescore,
}

/// A falling pickup
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub rect: Rect,
}

/// Visual explosion, no collision participation
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    pub life: i32,
}

impl Explosion {
    /// Alternates sprite orientation every ten frames
    pub fn flipped(&self) -> bool {
        (self.life / 10) % 2 == 1
    }
}

/// Spendable abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Disable,
    Gravity,
    Barrier,
    Hyper,
}

impl Ability {
    pub fn cost(self) -> u64 {
        match self {
            Ability::Disable => DISABLE_COST,
            Ability::Gravity => GRAVITY_COST,
            Ability::Barrier => BARRIER_COST,
            Ability::Hyper => HYPER_COST,
        }
    }
}

/// What removed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Beam,
    Gravity,
}

/// Notable things that happened during the latest frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { kind: EnemyKind },
    EnemyDestroyed { kind: EnemyKind, cause: KillCause },
    BombDestroyed,
    AvatarHit { health: u8 },
    PickupCollected { kind: PickupKind },
    AbilityUsed { ability: Ability },
    GameOver { score: u64, tick: u64 },
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Frame counter, advanced once per tick
    pub tick: u64,
    pub phase: GamePhase,
    /// Score, doubling as ability currency
    pub score: u64,
    pub avatar: Avatar,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub bullets: Vec<Bullet>,
    pub shields: Vec<Shield>,
    pub gravity_fields: Vec<GravityField>,
    pub pickups: Vec<Pickup>,
    pub explosions: Vec<Explosion>,
    /// Frames of screen flash left after the avatar was hit
    pub flash_frames: u32,
    /// Events produced during the latest tick
    pub events: Vec<GameEvent>,
    /// Input held during the previous tick (for edge detection)
    pub prev_input: InputState,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            phase: GamePhase::Playing,
            score: 0,
            avatar: Avatar::default(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            bullets: Vec::new(),
            shields: Vec::new(),
            gravity_fields: Vec::new(),
            pickups: Vec::new(),
            explosions: Vec::new(),
            flash_frames: 0,
            events: Vec::new(),
            prev_input: InputState::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Deduct `cost` if affordable. Returns false (and changes nothing) otherwise.
    pub fn spend(&mut self, cost: u64) -> bool {
        if self.score < cost {
            return false;
        }
        self.score -= cost;
        true
    }

    pub fn double_score(&mut self) {
        self.score = self.score.saturating_mul(2);
    }

    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.kind == EnemyKind::Boss)
    }

    pub fn spawn_explosion(&mut self, center: Vec2, life: i32) {
        let id = self.next_entity_id();
        let rect = Rect::new(center, EXPLOSION_SIZE).clamped_into_arena();
        self.explosions.push(Explosion { id, rect, life });
    }

    pub fn spawn_beam(&mut self, heading: f32, charged: bool) {
        let id = self.next_entity_id();
        let beam = Beam::launch(id, &self.avatar, heading, charged);
        // A beam born outside the area would be culled before it could hit anything
        if super::geometry::fully_in_bounds(&beam.rect) {
            self.beams.push(beam);
        }
    }

    /// Total number of live entities (avatar excluded)
    pub fn entity_count(&self) -> usize {
        self.enemies.len()
            + self.bombs.len()
            + self.beams.len()
            + self.bullets.len()
            + self.shields.len()
            + self.gravity_fields.len()
            + self.pickups.len()
            + self.explosions.len()
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.bombs.sort_by_key(|b| b.id);
        self.beams.sort_by_key(|b| b.id);
        self.bullets.sort_by_key(|b| b.id);
        self.pickups.sort_by_key(|p| p.id);
        self.explosions.sort_by_key(|e| e.id);
    }
}

/// Drop every element whose slot in `dead` is set.
///
/// `dead` must have been built from the same collection, in order.
pub(crate) fn retain_alive<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.avatar.health, 3);
        assert_eq!(state.avatar.state, AvatarState::Normal);
        assert_eq!(state.avatar.facing, Compass::East);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_spend_never_goes_negative() {
        let mut state = GameState::new(1);
        state.score = 30;
        assert!(!state.spend(50));
        assert_eq!(state.score, 30);
        assert!(state.spend(30));
        assert_eq!(state.score, 0);
        assert!(!state.spend(1));
    }

    #[test]
    fn test_compass_offsets_round_trip() {
        let all = [
            Compass::East,
            Compass::NorthEast,
            Compass::North,
            Compass::NorthWest,
            Compass::West,
            Compass::SouthWest,
            Compass::South,
            Compass::SouthEast,
        ];
        for dir in all {
            let (dx, dy) = dir.offset();
            assert_eq!(Compass::from_offset(dx, dy), Some(dir));
            assert!((dir.unit().length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(Compass::from_offset(0, 0), None);
    }

    #[test]
    fn test_compass_unit_matches_offset_sign() {
        let v = Compass::SouthWest.unit();
        assert!(v.x < 0.0 && v.y > 0.0);
    }

    #[test]
    fn test_enemy_constructors_in_bounds() {
        let mut state = GameState::new(7);
        for _ in 0..50 {
            let id = state.next_entity_id();
            let basic = Enemy::basic(id, &mut state.rng);
            assert!(crate::sim::geometry::fully_in_bounds(&basic.rect));
            assert!(matches!(basic.schedule, DropSchedule::Every(50..=300)));

            let id = state.next_entity_id();
            let pattern = Enemy::pattern(id, &mut state.rng);
            let patrol = pattern.patrol.unwrap();
            assert!(patrol.min_x <= pattern.rect.center.x && pattern.rect.center.x <= patrol.max_x);
            assert_eq!(pattern.hp, PATTERN_HP);
        }
        let id = state.next_entity_id();
        let boss = Enemy::boss(id, &mut state.rng);
        assert_eq!(boss.hp, BOSS_HP);
        assert!(matches!(boss.schedule, DropSchedule::Every(20..=60)));
    }

    #[test]
    fn test_drop_schedule() {
        assert!(DropSchedule::Every(50).fires_at(100));
        assert!(!DropSchedule::Every(50).fires_at(101));
        assert!(!DropSchedule::Disabled.fires_at(0));
    }

    #[test]
    fn test_bomb_speed_scales_and_caps() {
        assert_eq!(bomb_speed(0), BOMB_BASE_SPEED);
        assert!(bomb_speed(400) > bomb_speed(0));
        assert_eq!(bomb_speed(1_000_000), BOMB_MAX_SPEED);
    }

    #[test]
    fn test_beam_launch_offsets_from_avatar() {
        let avatar = Avatar::default();
        let beam = Beam::launch(1, &avatar, 180.0, false);
        assert!((beam.rect.center.x - (AVATAR_START.x - AVATAR_SIZE.x)).abs() < 1e-3);
        assert!((beam.rect.center.y - AVATAR_START.y).abs() < 1e-3);
        let charged = Beam::launch(2, &avatar, 180.0, true);
        assert!(charged.is_charged());
        assert!(charged.rect.size.x > beam.rect.size.x);
    }

    #[test]
    fn test_retain_alive() {
        let mut v = vec![1, 2, 3, 4];
        retain_alive(&mut v, &[false, true, false, true]);
        assert_eq!(v, vec![1, 3]);
    }
}
