//! Audio output: the mix bus the sequencer triggers voices through.
//!
//! The engine owns exactly one mixed output path. Control-side code (the
//! sequencer, UI audition buttons) talks to an [`OutputBus`]; the real
//! implementation forwards commands over a lock-free ring buffer to a
//! [`Mixer`] living inside the cpal audio callback. Master volume applies to
//! the single mixed signal, never per voice.

/// Audio-thread voice mixing.
pub mod mixer;
/// cpal-backed bus implementation.
#[cfg(feature = "rtrb")]
pub mod output;

pub use mixer::Mixer;
#[cfg(feature = "rtrb")]
pub use output::CpalBus;

use std::sync::Arc;

use crate::voices::RenderedVoice;

/// Commands crossing from the control thread into the audio callback.
#[derive(Debug, Clone)]
pub enum BusCommand {
    /// Install the pre-rendered voice bank, one voice per track.
    Load(Vec<Arc<RenderedVoice>>),
    /// Start playback of the voice for a track index.
    Trigger(usize),
    /// Set the master gain applied to the mixed output.
    SetGain(f32),
}

/// The sequencer's single mixed output path.
///
/// Implementations must accept calls from the control thread and the tick
/// thread concurrently. Triggers issued together are consumed by the same
/// audio callback, so simultaneously armed tracks start in the same block.
pub trait OutputBus: Send + Sync {
    /// Install the voice bank. Called once, after rendering.
    fn load(&self, voices: Vec<Arc<RenderedVoice>>);

    /// Start playback of the pre-rendered voice for `track`.
    fn trigger(&self, track: usize);

    /// Set the master gain (0.0 to 1.0) on the mixed output.
    fn set_gain(&self, gain: f32);
}
