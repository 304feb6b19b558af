//! Vocal percussion voice - a beatbox "tss".
//!
//! Fricative noise shaped by two high formant sines (2 kHz and 3.5 kHz, the
//! "s" region), plus a short noisy burst for the tongue release.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{adsr, channel_rng, high_pass, low_pass, white};

const DURATION: f32 = 0.12;

/// Render a vocal percussion hit.
pub fn vocal_perc(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames, 0.60);
    let right = channel(sample_rate, frames, 0.58);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, gain: f32) -> Vec<f32> {
    let mut rng = channel_rng();
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let formant1 = (TAU * 2_000.0 * t).sin();
        let formant2 = (TAU * 3_500.0 * t).sin() * 0.6;
        let fricative = white(&mut rng) * (formant1 + formant2) * 0.4;

        let release = (-t * 100.0).exp() * white(&mut rng) * 0.3;

        let envelope = adsr(t, DURATION, 0.001, 0.01, 0.1, 0.05);

        *sample = (fricative + release) * envelope * gain;
    }

    high_pass(&mut samples, sample_rate, 1_200.0);
    low_pass(&mut samples, sample_rate, 8_000.0, 1.0);
    samples
}
