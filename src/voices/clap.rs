//! Hand clap voice.
//!
//! A clap is not one impact but several: a handful of slightly staggered
//! micro-bursts as palms meet, then a short reverberant tail.
//!
//! # How It Works
//!
//! 1. Five exponential micro-bursts at fixed offsets, each 8 ms wide and a
//!    little quieter than the last, summed into a gating envelope
//! 2. The bursts gate a mix of noise, a 1 kHz body tone, and noise-modulated
//!    3 kHz highs
//! 3. Independent per-channel random scaling adds natural stereo spread
//! 4. Band-pass (HP 200 Hz, LP 8 kHz) for the clap register

use std::f32::consts::TAU;

use rand::Rng;

use super::{frames_for, RenderedVoice};
use crate::dsp::{channel_rng, high_pass, low_pass, white};

const DURATION: f32 = 0.15;

/// Burst start times in seconds.
const BURSTS: [f32; 5] = [0.003, 0.015, 0.025, 0.035, 0.045];
/// Width of each micro-burst window.
const BURST_WIDTH: f32 = 0.008;

/// Render a hand clap hit.
pub fn clap(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = channel(sample_rate, frames);
    let right = channel(sample_rate, frames);
    RenderedVoice::new(left, right)
}

fn channel(sample_rate: f32, frames: usize) -> Vec<f32> {
    let mut rng = channel_rng();
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;

        let mut burst_env = 0.0f32;
        for (k, &start) in BURSTS.iter().enumerate() {
            if t >= start && t < start + BURST_WIDTH {
                let local = t - start;
                let intensity = 1.0 - k as f32 * 0.15;
                burst_env += (-local * 400.0).exp() * intensity;
            }
        }

        let noise = white(&mut rng);
        let body = (TAU * 1_000.0 * t).sin() * 0.2;
        let highs = white(&mut rng) * (TAU * 3_000.0 * t).sin() * 0.3;

        let hit = (noise * 0.7 + body + highs) * burst_env;

        // Per-sample jitter, drawn independently per channel
        *sample = hit * 0.5 * (1.0 + rng.random_range(0.0..0.1));
    }

    high_pass(&mut samples, sample_rate, 200.0);
    low_pass(&mut samples, sample_rate, 8_000.0, 1.0);
    samples
}
