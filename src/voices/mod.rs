//! Pre-rendered percussion voices.
//!
//! Each voice module synthesizes one finished stereo drum hit from scratch -
//! no sample playback anywhere. Rendering is offline and comparatively
//! expensive, so the sequencer renders every instrument once at startup and
//! only replays the buffers afterwards.
//!
//! # Example
//!
//! ```ignore
//! use groovebox::voices::{self, Instrument};
//!
//! let kick = voices::kick(48_000.0);
//! assert_eq!(kick.frames(), (0.4 * 48_000.0) as usize);
//!
//! // Or dispatch by instrument identity:
//! let snare = voices::render(Instrument::Snare, 48_000.0);
//! ```

mod clap;
mod cowbell;
mod crash;
mod hihat;
mod kick;
mod openhat;
mod shaker;
mod snare;
mod subbass;
mod tom;
mod vocal_bass;
mod vocal_perc;

pub use clap::clap;
pub use cowbell::cowbell;
pub use crash::crash;
pub use hihat::hihat;
pub use kick::kick;
pub use openhat::openhat;
pub use shaker::shaker;
pub use snare::snare;
pub use subbass::subbass;
pub use tom::tom;
pub use vocal_bass::vocal_bass;
pub use vocal_perc::vocal_perc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fixed set of drum machine instruments, in track order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Kick,
    Snare,
    ClosedHiHat,
    OpenHiHat,
    Crash,
    SubBass,
    Clap,
    Tom,
    Shaker,
    Cowbell,
    VocalBass,
    VocalPerc,
}

impl Instrument {
    /// All instruments in track order. Row `i` of a pattern belongs to `ALL[i]`.
    pub const ALL: [Instrument; 12] = [
        Instrument::Kick,
        Instrument::Snare,
        Instrument::ClosedHiHat,
        Instrument::OpenHiHat,
        Instrument::Crash,
        Instrument::SubBass,
        Instrument::Clap,
        Instrument::Tom,
        Instrument::Shaker,
        Instrument::Cowbell,
        Instrument::VocalBass,
        Instrument::VocalPerc,
    ];

    /// Number of instruments (= pattern rows).
    pub const COUNT: usize = Self::ALL.len();

    /// Track index of this instrument.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&i| i == self).unwrap_or(0)
    }

    /// Instrument for a track index, if in range.
    pub fn from_index(index: usize) -> Option<Instrument> {
        Self::ALL.get(index).copied()
    }

    /// Display name for UI labeling.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::Kick => "Kick",
            Instrument::Snare => "Snare",
            Instrument::ClosedHiHat => "Hi-Hat",
            Instrument::OpenHiHat => "Open HH",
            Instrument::Crash => "Crash",
            Instrument::SubBass => "Bass",
            Instrument::Clap => "Clap",
            Instrument::Tom => "Tom",
            Instrument::Shaker => "Shaker",
            Instrument::Cowbell => "Cowbell",
            Instrument::VocalBass => "V-Bass",
            Instrument::VocalPerc => "V-Perc",
        }
    }

    /// Display color tag for UI labeling.
    pub fn color(self) -> &'static str {
        match self {
            Instrument::Kick => "red",
            Instrument::Snare => "orange",
            Instrument::ClosedHiHat => "yellow",
            Instrument::OpenHiHat => "green",
            Instrument::Crash => "blue",
            Instrument::SubBass => "purple",
            Instrument::Clap => "pink",
            Instrument::Tom => "indigo",
            Instrument::Shaker => "cyan",
            Instrument::Cowbell => "teal",
            Instrument::VocalBass => "lime",
            Instrument::VocalPerc => "amber",
        }
    }

    /// Length of the rendered hit in seconds.
    pub fn duration(self) -> f32 {
        match self {
            Instrument::Kick => 0.4,
            Instrument::Snare => 0.18,
            Instrument::ClosedHiHat => 0.08,
            Instrument::OpenHiHat => 0.3,
            Instrument::Crash => 0.5,
            Instrument::SubBass => 0.5,
            Instrument::Clap => 0.15,
            Instrument::Tom => 0.4,
            Instrument::Shaker => 0.1,
            Instrument::Cowbell => 0.2,
            Instrument::VocalBass => 0.3,
            Instrument::VocalPerc => 0.12,
        }
    }
}

/// Name and color tag for one track, in the shape UI layers consume.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentInfo {
    pub name: &'static str,
    pub color: &'static str,
}

impl Instrument {
    pub fn info(self) -> InstrumentInfo {
        InstrumentInfo {
            name: self.name(),
            color: self.color(),
        }
    }
}

/// A finished stereo drum hit: two equal-length channels of f32 samples.
///
/// Immutable once rendered. The sequencer shares these behind `Arc` and the
/// mixer only ever reads them, so concurrent triggers are safe by construction.
#[derive(Debug, Clone)]
pub struct RenderedVoice {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl RenderedVoice {
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len());
        Self { left, right }
    }

    /// Per-channel length in frames.
    pub fn frames(&self) -> usize {
        self.left.len()
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }
}

/// Buffer length for a duration at a sample rate. Never zero.
pub(crate) fn frames_for(duration: f32, sample_rate: f32) -> usize {
    ((duration * sample_rate).round() as usize).max(1)
}

/// Render one instrument into a finished stereo buffer.
pub fn render(instrument: Instrument, sample_rate: f32) -> RenderedVoice {
    match instrument {
        Instrument::Kick => kick(sample_rate),
        Instrument::Snare => snare(sample_rate),
        Instrument::ClosedHiHat => hihat(sample_rate),
        Instrument::OpenHiHat => openhat(sample_rate),
        Instrument::Crash => crash(sample_rate),
        Instrument::SubBass => subbass(sample_rate),
        Instrument::Clap => clap(sample_rate),
        Instrument::Tom => tom(sample_rate),
        Instrument::Shaker => shaker(sample_rate),
        Instrument::Cowbell => cowbell(sample_rate),
        Instrument::VocalBass => vocal_bass(sample_rate),
        Instrument::VocalPerc => vocal_perc(sample_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_matches_duration_at_common_rates() {
        for &rate in &[8_000.0f32, 44_100.0, 48_000.0, 96_000.0] {
            for instrument in Instrument::ALL {
                let voice = render(instrument, rate);
                let expected = (instrument.duration() * rate).round() as usize;
                assert_eq!(
                    voice.frames(),
                    expected,
                    "{:?} at {} Hz",
                    instrument,
                    rate
                );
                assert_eq!(voice.left().len(), voice.right().len());
            }
        }
    }

    #[test]
    fn all_output_is_finite() {
        for instrument in Instrument::ALL {
            let voice = render(instrument, 44_100.0);
            assert!(
                voice.left().iter().chain(voice.right()).all(|s| s.is_finite()),
                "{:?} produced non-finite samples",
                instrument
            );
        }
    }

    #[test]
    fn cowbell_is_deterministic() {
        // The only voice with no noise component: repeated renders must be
        // bit-identical.
        let a = cowbell(44_100.0);
        let b = cowbell(44_100.0);
        assert_eq!(a.left(), b.left());
        assert_eq!(a.right(), b.right());
    }

    #[test]
    fn noise_voices_have_decorrelated_channels() {
        for instrument in [Instrument::Snare, Instrument::ClosedHiHat, Instrument::Clap] {
            let voice = render(instrument, 44_100.0);
            assert_ne!(
                voice.left(),
                voice.right(),
                "{:?} should not be mono-identical",
                instrument
            );
        }
    }

    #[test]
    fn tonal_voices_are_not_mono_identical() {
        // Fixed right-channel attenuation, so stereo without randomness
        for instrument in [Instrument::Kick, Instrument::SubBass, Instrument::Cowbell] {
            let voice = render(instrument, 44_100.0);
            assert_ne!(
                voice.left(),
                voice.right(),
                "{:?} should not be mono-identical",
                instrument
            );
        }
    }

    #[test]
    fn voices_are_audible() {
        // Every hit should have at least some energy in it
        for instrument in Instrument::ALL {
            let voice = render(instrument, 44_100.0);
            let peak = voice.left().iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
            assert!(peak > 0.01, "{:?} rendered near-silence (peak {})", instrument, peak);
        }
    }

    #[test]
    fn tiny_sample_rate_still_allocates_a_frame() {
        let voice = render(Instrument::ClosedHiHat, 1.0);
        assert!(voice.frames() >= 1);
    }

    #[test]
    fn instrument_indexes_round_trip() {
        for (i, instrument) in Instrument::ALL.into_iter().enumerate() {
            assert_eq!(instrument.index(), i);
            assert_eq!(Instrument::from_index(i), Some(instrument));
        }
        assert_eq!(Instrument::from_index(12), None);
    }

    #[test]
    fn info_exposes_name_and_color() {
        let info = Instrument::Kick.info();
        assert_eq!(info.name, "Kick");
        assert_eq!(info.color, "red");
    }
}
