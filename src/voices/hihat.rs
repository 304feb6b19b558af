//! Closed hi-hat voice.
//!
//! Noise plus two products-of-sines for the metallic ring. Multiplying two
//! inharmonically related sines produces sum and difference frequencies -
//! the clangorous, non-pitched shimmer of struck metal.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{channel_rng, high_pass, white};

const DURATION: f32 = 0.08;

/// Render a closed hi-hat hit.
pub fn hihat(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames, 0.40);
    let right = channel(sample_rate, frames, 0.42);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, gain: f32) -> Vec<f32> {
    let mut rng = channel_rng();
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let noise = white(&mut rng);
        let metallic1 = (TAU * 8_000.0 * t).sin() * (TAU * 12_000.0 * t).sin();
        let metallic2 = (TAU * 6_000.0 * t).sin() * (TAU * 15_000.0 * t).sin();

        // Two stacked decays: the body plus a much faster initial click
        let envelope = (-t * 60.0).exp();
        let click_env = (-t * 200.0).exp();

        let hat = (noise * 0.7 + metallic1 * 0.3 + metallic2 * 0.2) * envelope
            + noise * click_env * 0.3;

        *sample = hat * gain;
    }

    high_pass(&mut samples, sample_rate, 6_000.0);
    samples
}
