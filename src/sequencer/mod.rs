//! Pattern storage, transport state, and the step engine.

pub mod engine;
pub mod pattern;
pub mod transport;

pub use engine::{EngineState, Sequencer};
pub use pattern::{Pattern, Preset, STEPS, TRACKS};
pub use transport::{Transport, MAX_BPM, MIN_BPM};
