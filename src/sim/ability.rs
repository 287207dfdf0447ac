//! Score-gated abilities and the avatar's weapons
//!
//! Every ability checks the score before touching anything; an unaffordable
//! activation is a silent no-op.

use glam::Vec2;

use super::geometry::{Rect, rotated_extent};
use super::input::{InputState, Pressed};
use super::state::{
    Ability, AvatarState, BombState, DropSchedule, EnemyKind, GameEvent, GameState, GravityField,
    Shield,
};
use super::targeting::fan_release;
use crate::consts::*;

/// Apply the fire and ability triggers pressed this frame
pub fn apply_triggers(state: &mut GameState, pressed: &Pressed, input: &InputState) {
    if pressed.fire {
        fire(state, input.boost);
    }
    if pressed.disable {
        activate_disable(state);
    }
    if pressed.gravity {
        activate_gravity(state);
    }
    if pressed.barrier {
        activate_barrier(state);
    }
}

/// Fire the avatar's weapon. Returns false while the weapon is cooling down.
///
/// Boost turns the shot into a fan release; otherwise a charged shot is used
/// while spanner charges remain.
pub fn fire(state: &mut GameState, boost: bool) -> bool {
    if state.avatar.fire_cooldown > 0 {
        return false;
    }
    let heading = state.avatar.facing.heading();
    if boost {
        fan_release(state, FAN_COUNT, false);
        state.avatar.fire_cooldown = BEAM_COOLDOWN;
    } else if state.avatar.charges > 0 {
        state.avatar.charges -= 1;
        state.spawn_beam(heading, true);
        state.avatar.fire_cooldown = CHARGED_COOLDOWN;
    } else {
        state.spawn_beam(heading, false);
        state.avatar.fire_cooldown = BEAM_COOLDOWN;
    }
    true
}

fn record(state: &mut GameState, ability: Ability) {
    log::info!(
        "{:?} activated at tick {}, score now {}",
        ability,
        state.tick,
        state.score
    );
    state.events.push(GameEvent::AbilityUsed { ability });
}

/// Stop basic and pattern enemies from attacking for good; slow every bomb
/// and make it harmless.
pub fn activate_disable(state: &mut GameState) -> bool {
    if !state.spend(Ability::Disable.cost()) {
        return false;
    }
    for enemy in &mut state.enemies {
        if matches!(enemy.kind, EnemyKind::Basic | EnemyKind::Pattern) {
            enemy.schedule = DropSchedule::Disabled;
        }
    }
    for bomb in &mut state.bombs {
        bomb.speed /= 2.0;
        bomb.state = BombState::Inactive;
    }
    record(state, Ability::Disable);
    true
}

/// Spawn a full-screen gravity field
pub fn activate_gravity(state: &mut GameState) -> bool {
    if !state.spend(Ability::Gravity.cost()) {
        return false;
    }
    let id = state.next_entity_id();
    state.gravity_fields.push(GravityField {
        id,
        rect: Rect::arena(),
        life: GRAVITY_LIFE,
    });
    record(state, Ability::Gravity);
    true
}

/// Raise a barrier in front of the avatar. Only one may exist at a time.
pub fn activate_barrier(state: &mut GameState) -> bool {
    if !state.shields.is_empty() {
        return false;
    }
    if !state.spend(Ability::Barrier.cost()) {
        return false;
    }
    let avatar = &state.avatar;
    let heading = avatar.facing.heading();
    let (dx, dy) = avatar.facing.offset();
    let center = avatar.rect.center + avatar.rect.size * Vec2::new(dx as f32, dy as f32);
    let extent = rotated_extent(
        Vec2::new(SHIELD_THICKNESS, avatar.rect.size.y * 2.0),
        heading,
    );

    let id = state.next_entity_id();
    state.shields.push(Shield {
        id,
        rect: Rect::new(center, extent),
        heading,
        life: SHIELD_LIFE,
    });
    record(state, Ability::Barrier);
    true
}

/// Become invulnerable to bombs and bullets for `HYPER_FRAMES` frames
pub fn activate_hyper(state: &mut GameState) -> bool {
    if !state.spend(Ability::Hyper.cost()) {
        return false;
    }
    state.avatar.state = AvatarState::Hyper {
        remaining: HYPER_FRAMES,
    };
    record(state, Ability::Hyper);
    true
}
