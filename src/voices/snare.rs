//! Snare drum voice.
//!
//! Fast-decaying white noise for the wire buzz, two sine tones for the drum
//! body, and a noise-modulated "rattle" tone in between. Real snares get
//! their character from metal wires buzzing against the bottom head; the
//! noise-times-sine rattle term approximates that interaction.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{adsr, channel_rng, high_pass, low_pass, white};

const DURATION: f32 = 0.18;

/// Render a snare drum hit.
pub fn snare(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames, 0.70);
    let right = channel(sample_rate, frames, 0.72);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, gain: f32) -> Vec<f32> {
    let mut rng = channel_rng();
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let noise = white(&mut rng) * 0.6;
        let body = (TAU * 200.0 * t).sin() * 0.4;
        let harmonics = (TAU * 350.0 * t).sin() * 0.2;
        let rattle = white(&mut rng) * 0.3 * (TAU * 150.0 * t).sin();

        // Sharp attack, short tail; the noise decays faster than the tones
        let envelope = adsr(t, DURATION, 0.001, 0.02, 0.1, 0.1);
        let noise_env = (-t * 25.0).exp();

        *sample = (noise * noise_env + body + harmonics + rattle) * envelope * gain;
    }

    high_pass(&mut samples, sample_rate, 100.0);
    low_pass(&mut samples, sample_rate, 8_000.0, 1.0);
    samples
}
