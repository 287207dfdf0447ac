//! Platform abstraction layer
//!
//! The collaborators the frame loop talks to outside the simulation:
//! - Time (frame pacing)
//! - Input intents
//! - Render output

pub mod input;
pub mod sink;
pub mod time;

pub use input::{AutopilotInput, IdleInput, InputSource, ScriptedInput};
pub use sink::{JsonLinesSink, LogSink, NullSink, RenderSink};
pub use time::{Clock, FixedRateClock, Unpaced, clock_for};
