pub mod audio; // Output bus, mixer, cpal backend
pub mod dsp; // Shared envelope/filter/noise primitives
pub mod sequencer; // Pattern, transport, and the step engine
pub mod voices; // Per-instrument percussion generators

mod error;

pub use error::EngineError;
