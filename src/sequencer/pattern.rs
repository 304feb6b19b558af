/*
Pattern grid
============

A fixed 12x16 boolean grid: rows are instruments in track order, columns are
16th-note steps. Time is cyclic - step 0 follows step 15. The grid is the only
thing the sequencer reads on a tick, so every pattern operation is a plain
in-memory mutation with no timing consequences.

Rows come from `Instrument::ALL`; the grid itself is `Copy`, which is what
makes engine state snapshots cheap and observer-safe (a snapshot can never
alias engine internals).
*/

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::voices::Instrument;

/// Pattern rows - one per instrument.
pub const TRACKS: usize = Instrument::COUNT;
/// Pattern columns - 16th-note steps in one bar.
pub const STEPS: usize = 16;

const T: bool = true;
const F: bool = false;

/// The rhythmic grid: which instrument fires on which step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    cells: [[bool; STEPS]; TRACKS],
}

impl Pattern {
    /// An all-silent pattern.
    pub fn empty() -> Self {
        Self {
            cells: [[F; STEPS]; TRACKS],
        }
    }

    /// Cell value; out-of-range reads are simply silent.
    pub fn get(&self, track: usize, step: usize) -> bool {
        self.cells
            .get(track)
            .and_then(|row| row.get(step))
            .copied()
            .unwrap_or(false)
    }

    /// Flip one cell. Out-of-range coordinates are ignored; returns whether
    /// the pattern changed.
    pub fn toggle(&mut self, track: usize, step: usize) -> bool {
        match self.cells.get_mut(track).and_then(|row| row.get_mut(step)) {
            Some(cell) => {
                *cell = !*cell;
                true
            }
            None => false,
        }
    }

    /// One instrument's row, if the track is in range.
    pub fn row(&self, track: usize) -> Option<&[bool; STEPS]> {
        self.cells.get(track)
    }

    /// Track indexes armed at a step.
    pub fn armed_tracks(&self, step: usize) -> impl Iterator<Item = usize> + '_ {
        (0..TRACKS).filter(move |&track| self.get(track, step))
    }

    /// Silence everything.
    pub fn clear(&mut self) {
        self.cells = [[F; STEPS]; TRACKS];
    }

    /// Fill the grid with a musically weighted random pattern.
    ///
    /// Each cell samples independently, but the probability is shaped by
    /// musical role and position: backbone instruments land on strong beats,
    /// hats and shakers favor off-beats, accents stay rare, and the sub bass
    /// steps aside where the kick wants to be. The multipliers are a tunable
    /// heuristic - only the direction of each bias is contractual.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for (track, row) in self.cells.iter_mut().enumerate() {
            let instrument = Instrument::ALL[track];
            for (step, cell) in row.iter_mut().enumerate() {
                let p = step_probability(instrument, step);
                *cell = rng.random_bool(p.min(0.9) as f64);
            }
        }
    }

    /// Replace the grid with a named template.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.clear();
        match preset {
            Preset::Basic => {
                // Four-on-the-floor kick, backbeat snare, off-beat hats
                self.cells[Instrument::Kick.index()] =
                    [T, F, F, F, T, F, F, F, T, F, F, F, T, F, F, F];
                self.cells[Instrument::Snare.index()] =
                    [F, F, F, F, T, F, F, F, F, F, F, F, T, F, F, F];
                self.cells[Instrument::ClosedHiHat.index()] =
                    [F, F, T, F, F, F, T, F, F, F, T, F, F, F, T, F];
            }
            Preset::Funk => {
                // Syncopated kick, busy hats, claps answering the snare
                self.cells[Instrument::Kick.index()] =
                    [T, F, F, T, F, F, T, F, F, T, F, F, T, F, F, F];
                self.cells[Instrument::Snare.index()] =
                    [F, F, F, F, T, F, F, F, F, F, F, F, T, F, F, F];
                self.cells[Instrument::ClosedHiHat.index()] =
                    [T, T, F, T, F, T, F, T, T, F, T, F, F, T, F, T];
                self.cells[Instrument::Clap.index()] =
                    [F, F, F, F, F, F, F, T, F, F, F, F, F, F, F, T];
            }
            Preset::Techno => {
                // Kick on every beat, open hats between, closed hats on the 8ths
                self.cells[Instrument::Kick.index()] =
                    [T, F, F, F, T, F, F, F, T, F, F, F, T, F, F, F];
                self.cells[Instrument::OpenHiHat.index()] =
                    [F, F, T, F, F, F, T, F, F, F, T, F, F, F, T, F];
                self.cells[Instrument::ClosedHiHat.index()] =
                    [F, T, F, T, F, T, F, T, F, T, F, T, F, T, F, T];
            }
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::empty()
    }
}

/// Probability that a cell fires, given instrument role and step position.
fn step_probability(instrument: Instrument, step: usize) -> f32 {
    let strong_beat = step % 4 == 0;
    let off_beat = step % 2 == 1;

    let base = match instrument {
        Instrument::Kick => 0.25,
        Instrument::Snare => 0.20,
        Instrument::ClosedHiHat => 0.35,
        Instrument::OpenHiHat => 0.15,
        Instrument::Crash => 0.05,
        Instrument::SubBass => 0.15,
        Instrument::Clap => 0.15,
        Instrument::Tom => 0.12,
        Instrument::Shaker => 0.30,
        Instrument::Cowbell => 0.05,
        Instrument::VocalBass => 0.10,
        Instrument::VocalPerc => 0.15,
    };

    let weight = match instrument {
        // Backbone lands on the beat
        Instrument::Kick | Instrument::Snare if strong_beat => 2.0,
        // Hats and shaker fill the off-beats
        Instrument::ClosedHiHat | Instrument::OpenHiHat | Instrument::Shaker if off_beat => 1.5,
        // Accents only make sense on strong beats
        Instrument::Crash | Instrument::Cowbell if !strong_beat => 0.3,
        // Keep the sub bass out of the kick's way
        Instrument::SubBass if strong_beat => 0.4,
        _ => 1.0,
    };

    base * weight
}

/// Named pattern templates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Basic,
    Funk,
    Techno,
}

impl Preset {
    pub fn from_name(name: &str) -> Option<Preset> {
        match name {
            "basic" => Some(Preset::Basic),
            "funk" => Some(Preset::Funk),
            "techno" => Some(Preset::Techno),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Basic => "basic",
            Preset::Funk => "funk",
            Preset::Techno => "techno",
        }
    }
}
