//! Sub bass drum voice.
//!
//! Deeper and longer than the kick: three sine partials with gentler pitch
//! decays, an 80 Hz body-resonance term, and a resonant low-pass at 100 Hz
//! that leaves almost nothing but fundamental.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{adsr, low_pass};

const DURATION: f32 = 0.5;

/// Render a sub bass drum hit.
pub fn subbass(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    // Slight mono focus keeps the low end centered
    let left = channel(sample_rate, frames, 0.90);
    let right = channel(sample_rate, frames, 0.88);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, gain: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let fundamental = 35.0 * (-t * 12.0).exp();
        let sub = 25.0 * (-t * 8.0).exp();
        let harmonic = 70.0 * (-t * 20.0).exp();

        let body = (TAU * 80.0 * t).sin() * (-t * 6.0).exp();

        let envelope = adsr(t, DURATION, 0.003, 0.08, 0.4, 0.3);

        let wave = (TAU * fundamental * t).sin() * 0.8
            + (TAU * sub * t).sin() * 0.5
            + (TAU * harmonic * t).sin() * 0.3
            + body * 0.2;

        *sample = wave * envelope * gain;
    }

    low_pass(&mut samples, sample_rate, 100.0, 1.2);
    samples
}
