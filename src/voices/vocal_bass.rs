//! Vocal bass voice - a beatbox-style "boom".
//!
//! Formant synthesis in miniature: a pitch-swept fundamental and its second
//! harmonic give the voiced buzz, two fixed sines at 280 and 450 Hz sit where
//! the "oo/uh" vowel formants live, and a whisper of fast-decaying noise adds
//! breathiness. A resonant low-pass rounds it into something mouth-shaped.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{adsr, channel_rng, low_pass, white};

const DURATION: f32 = 0.3;

/// Render a vocal bass hit.
pub fn vocal_bass(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames, 0.70);
    let right = channel(sample_rate, frames, 0.68);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, gain: f32) -> Vec<f32> {
    let mut rng = channel_rng();
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let fundamental = 85.0 * (-t * 8.0).exp();

        let voiced = (TAU * fundamental * t).sin();
        let harmonic = (TAU * fundamental * 2.0 * t).sin() * 0.6;
        let formant1 = (TAU * 280.0 * t).sin() * 0.4;
        let formant2 = (TAU * 450.0 * t).sin() * 0.2;

        let breath = white(&mut rng) * 0.1 * (-t * 20.0).exp();

        let envelope = adsr(t, DURATION, 0.005, 0.04, 0.4, 0.2);

        *sample = (voiced + harmonic + formant1 + formant2 + breath) * envelope * gain;
    }

    low_pass(&mut samples, sample_rate, 800.0, 1.2);
    samples
}
