//! Kick drum voice.
//!
//! A layered electronic kick built from three sine partials, each with its
//! own exponentially decaying pitch envelope. The fundamental sweeps down
//! from 55 Hz, a sub layer reinforces the low end, and a fast-decaying
//! 200 Hz partial supplies the attack click.
//!
//! # How It Works
//!
//! 1. Three sine partials with independently decaying pitch envelopes
//! 2. ADSR amplitude envelope plus an extra "punch" exponential
//! 3. Low-pass at 120 Hz keeps it warm and round
//!
//! # Variations
//!
//! - Slower pitch decay = boomy 808-style kick
//! - Stronger click partial = harder attack

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{adsr, low_pass};

const DURATION: f32 = 0.4;

/// Render a kick drum hit.
pub fn kick(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames, 1.0);
    let right = channel(sample_rate, frames, 0.98);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize, width: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        // Per-partial pitch sweeps
        let fundamental = 55.0 * (-t * 20.0).exp();
        let sub = 35.0 * (-t * 15.0).exp();
        let click = 200.0 * (-t * 80.0).exp();

        let envelope = adsr(t, DURATION, 0.002, 0.05, 0.3, 0.2);
        let punch = (-t * 25.0).exp();

        let wave = (TAU * fundamental * t).sin() * 0.7
            + (TAU * sub * t).sin() * 0.4
            + (TAU * click * t).sin() * 0.2 * (-t * 50.0).exp();

        *sample = wave * envelope * punch * 0.9 * width;
    }

    low_pass(&mut samples, sample_rate, 120.0, 1.0);
    samples
}
