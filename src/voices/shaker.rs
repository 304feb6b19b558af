//! Shaker voice: two noise layers plus a sine-gated granular term that
//! mimics beads tumbling, under a very fast decay.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{channel_rng, high_pass, low_pass, white};

const DURATION: f32 = 0.1;

/// Render a shaker hit.
pub fn shaker(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames, 0.25);
    let right = channel(sample_rate, frames, 0.23);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, gain: f32) -> Vec<f32> {
    let mut rng = channel_rng();
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let bright = white(&mut rng) * 0.6;
        let mid = white(&mut rng) * 0.4;
        // 150 Hz sine amplitude-modulates a noise stream: grain-like texture
        let granular = (TAU * 150.0 * t).sin() * white(&mut rng) * 0.3;

        let envelope = (-t * 35.0).exp();

        *sample = (bright + mid * 0.7 + granular) * envelope * gain;
    }

    high_pass(&mut samples, sample_rate, 3_000.0);
    low_pass(&mut samples, sample_rate, 15_000.0, 1.0);
    samples
}
