//! Frame loop driver
//!
//! Wires the simulation to its collaborators: sample input, step, hand the
//! draw list to the sink, wait for the clock. Stops after the frame in which
//! the avatar is destroyed, or at the configured frame limit.

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Serialize;

use crate::platform::{Clock, InputSource, RenderSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, snapshot, tick};

/// Outcome of one run
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub final_score: u64,
    pub final_health: u8,
    pub final_position: Vec2,
    pub game_over: bool,
    pub enemies_destroyed: u32,
    pub bombs_destroyed: u32,
    pub hits_taken: u32,
    pub pickups: u32,
    pub abilities_used: u32,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
                GameEvent::BombDestroyed => self.bombs_destroyed += 1,
                GameEvent::AvatarHit { .. } => self.hits_taken += 1,
                GameEvent::PickupCollected { .. } => self.pickups += 1,
                GameEvent::AbilityUsed { .. } => self.abilities_used += 1,
                GameEvent::EnemySpawned { .. } | GameEvent::GameOver { .. } => {}
            }
        }
    }
}

/// Run frames until game over or the frame limit
pub fn run(
    settings: &Settings,
    input: &mut dyn InputSource,
    sink: &mut dyn RenderSink,
    clock: &mut dyn Clock,
) -> Result<RunSummary> {
    settings.validate()?;

    let mut state = GameState::new(settings.seed);
    let mut summary = RunSummary {
        seed: settings.seed,
        ..Default::default()
    };

    while !state.is_over() && !settings.frame_limit_reached(state.tick) {
        let intents = input.poll(&state);
        tick(&mut state, &intents);
        summary.record(&state.events);

        let frame = state.tick.saturating_sub(1);
        sink.submit(frame, &snapshot(&state))
            .with_context(|| format!("render sink failed at frame {frame}"))?;

        if settings.summary_interval > 0 && state.tick % settings.summary_interval == 0 {
            log::info!(
                "frame {}: score {}, health {}, {} entities",
                state.tick,
                state.score,
                state.avatar.health,
                state.entity_count()
            );
        }
        clock.tick();
    }
    sink.flush().context("flushing render sink")?;

    summary.frames = state.tick;
    summary.final_score = state.score;
    summary.final_health = state.avatar.health;
    summary.final_position = state.avatar.rect.center;
    summary.game_over = state.is_over();
    log::info!(
        "Run finished after {} frames with score {}{}",
        summary.frames,
        summary.final_score,
        if summary.game_over { " (game over)" } else { "" }
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{AVATAR_SPEED, AVATAR_START};
    use crate::platform::{
        AutopilotInput, IdleInput, JsonLinesSink, NullSink, ScriptedInput, Unpaced,
    };
    use crate::settings::Pacing;
    use crate::sim::InputState;

    fn headless(max_frames: u64) -> Settings {
        Settings {
            seed: 7,
            max_frames: Some(max_frames),
            pacing: Pacing::Unpaced,
            summary_interval: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let settings = headless(100);
        let summary = run(&settings, &mut IdleInput, &mut NullSink, &mut Unpaced).unwrap();
        assert_eq!(summary.frames, 100);
        assert!(!summary.game_over);
        assert_eq!(summary.final_health, 3);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let settings = headless(2000);
        let a = run(
            &settings,
            &mut AutopilotInput::default(),
            &mut NullSink,
            &mut Unpaced,
        )
        .unwrap();
        let b = run(
            &settings,
            &mut AutopilotInput::default(),
            &mut NullSink,
            &mut Unpaced,
        )
        .unwrap();
        assert_eq!(a.frames, b.frames);
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.enemies_destroyed, b.enemies_destroyed);
        assert_eq!(a.hits_taken, b.hits_taken);
    }

    #[test]
    fn test_trace_has_one_line_per_frame() {
        let settings = headless(25);
        let mut sink = JsonLinesSink::new(Vec::new());
        run(&settings, &mut IdleInput, &mut sink, &mut Unpaced).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 25);
    }

    #[test]
    fn test_scripted_moves_replay_through_run() {
        let left = InputState {
            left: true,
            ..Default::default()
        };
        let mut script = ScriptedInput::new(vec![left; 20]);
        let settings = headless(25);

        let summary = run(&settings, &mut script, &mut NullSink, &mut Unpaced).unwrap();

        assert!(script.is_exhausted());
        assert_eq!(summary.frames, 25);
        assert_eq!(summary.final_health, 3);
        // 20 held frames, then 5 idle ones
        assert_eq!(
            summary.final_position,
            AVATAR_START - Vec2::new(20.0 * AVATAR_SPEED, 0.0)
        );
    }

    #[test]
    fn test_zero_frame_limit_is_rejected() {
        let settings = headless(0);
        assert!(run(&settings, &mut IdleInput, &mut NullSink, &mut Unpaced).is_err());
    }
}
