//! Tom-tom voice.
//!
//! A pitched drum: decaying fundamental at 120 Hz with two inharmonic
//! partials (x1.6, x2.2), a 90 Hz shell-resonance sine, and a burst of
//! attack noise for the stick strike.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{adsr, channel_rng, low_pass, white};

const DURATION: f32 = 0.4;

/// Render a tom hit.
pub fn tom(sample_rate: f32) -> RenderedVoice {
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

        let fundamental = 120.0 * (-t * 6.0).exp();
        let second = fundamental * 1.6;
        let third = fundamental * 2.2;

        let shell = (TAU * 90.0 * t).sin() * (-t * 4.0).exp();
        let strike = white(&mut rng) * (-t * 80.0).exp() * 0.3;

        let envelope = adsr(t, DURATION, 0.002, 0.05, 0.4, 0.25);

        let wave = (TAU * fundamental * t).sin() * 0.7
            + (TAU * second * t).sin() * 0.3
            + (TAU * third * t).sin() * 0.15
            + shell * 0.4
            + strike;

        *sample = wave * envelope * gain;
    }

    low_pass(&mut samples, sample_rate, 2_000.0, 1.5);
    samples
}
