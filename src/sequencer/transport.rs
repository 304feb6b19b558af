use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pattern::STEPS;

/// Lowest supported tempo.
pub const MIN_BPM: f32 = 60.0;
/// Highest supported tempo.
pub const MAX_BPM: f32 = 200.0;

/// Transport state: playing flag, playhead, tempo, and master volume.
///
/// `bpm` and `volume` are clamped on every mutation - they can never hold a
/// value outside their range. `current_step` is meaningful only while
/// playing; stopping resets it to zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transport {
    playing: bool,
    current_step: usize,
    bpm: f32,
    volume: f32,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            playing: false,
            current_step: 0,
            bpm: 120.0,
            volume: 0.7,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Set tempo, clamped to [60, 200].
    pub fn set_bpm(&mut self, bpm: f32) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    /// Set master volume, clamped to [0, 1].
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Time between steps at the current tempo: 16th notes, four per beat.
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f32(60.0 / self.bpm / 4.0)
    }

    /// Move the playhead one step forward, wrapping at the bar.
    pub(crate) fn advance_step(&mut self) {
        self.current_step = (self.current_step + 1) % STEPS;
    }

    /// Rewind the playhead to step zero.
    pub(crate) fn reset_step(&mut self) {
        self.current_step = 0;
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bpm_clamps_to_supported_range() {
        let mut transport = Transport::new();

        transport.set_bpm(30.0);
        assert_eq!(transport.bpm(), 60.0);

        transport.set_bpm(500.0);
        assert_eq!(transport.bpm(), 200.0);

        transport.set_bpm(140.0);
        assert_eq!(transport.bpm(), 140.0);
    }

    #[test]
    fn volume_clamps_to_unit_range() {
        let mut transport = Transport::new();

        transport.set_volume(-1.0);
        assert_eq!(transport.volume(), 0.0);

        transport.set_volume(2.0);
        assert_eq!(transport.volume(), 1.0);

        transport.set_volume(0.4);
        assert_eq!(transport.volume(), 0.4);
    }

    #[test]
    fn step_interval_follows_tempo() {
        let mut transport = Transport::new();

        transport.set_bpm(120.0);
        assert_eq!(transport.step_interval().as_millis(), 125);

        transport.set_bpm(60.0);
        assert_eq!(transport.step_interval().as_millis(), 250);
    }

    #[test]
    fn playhead_wraps_at_bar_end() {
        let mut transport = Transport::new();
        for _ in 0..STEPS {
            transport.advance_step();
        }
        assert_eq!(transport.current_step(), 0);

        transport.advance_step();
        assert_eq!(transport.current_step(), 1);

        transport.reset_step();
        assert_eq!(transport.current_step(), 0);
    }
}
