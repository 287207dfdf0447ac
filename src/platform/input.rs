//! Input intent sources

use crate::autopilot::Autopilot;
use crate::sim::{GameState, InputState};

/// Samples the held intents once per frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> InputState;
}

/// Nothing is ever held
#[derive(Debug, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _state: &GameState) -> InputState {
        InputState::default()
    }
}

/// Replays a fixed sequence of frames, then holds nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputState>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputState>) -> Self {
        Self { frames, cursor: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> InputState {
        let input = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor = self.cursor.saturating_add(1);
        input
    }
}

/// Lets the demo autopilot drive
#[derive(Debug, Default)]
pub struct AutopilotInput(Autopilot);

impl InputSource for AutopilotInput {
    fn poll(&mut self, state: &GameState) -> InputState {
        self.0.next_input(state)
    }
}
