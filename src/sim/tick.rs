//! Fixed timestep simulation tick
//!
//! Core frame loop that advances the simulation deterministically.

use super::ability::{activate_hyper, apply_triggers};
use super::collision::resolve_collisions;
use super::input::InputState;
use super::movement::{advance_entities, move_avatar, update_avatar_status};
use super::spawn::{run_enemy_attacks, run_spawns};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one frame
///
/// Order within a frame: spawns and enemy attacks, entity movement, the
/// collision pipeline, ability triggers (fire included), then the avatar's
/// own movement and status countdowns. Once the avatar is destroyed the
/// phase becomes `GameOver` and further calls do nothing.
pub fn tick(state: &mut GameState, input: &InputState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.events.clear();
    let pressed = input.pressed_since(&state.prev_input);

    run_spawns(state);
    run_enemy_attacks(state);
    advance_entities(state);
    resolve_collisions(state);

    if !state.avatar.is_alive() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} with score {}",
            state.tick,
            state.score
        );
        state.events.push(GameEvent::GameOver {
            score: state.score,
            tick: state.tick,
        });
        finish_frame(state, input);
        return;
    }

    apply_triggers(state, &pressed, input);

    move_avatar(&mut state.avatar, input);
    if pressed.hyper {
        activate_hyper(state);
    }
    update_avatar_status(&mut state.avatar);

    finish_frame(state, input);
}

fn finish_frame(state: &mut GameState, input: &InputState) {
    state.normalize_order();
    state.prev_input = *input;
    state.tick += 1;
}
