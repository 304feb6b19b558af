//! Cowbell voice: a single 560 Hz sine with a quick decay, band-passed for
//! bell character. No noise component, so renders are bit-deterministic.

use std::f32::consts::TAU;

use super::{frames_for, RenderedVoice};
use crate::dsp::{high_pass, low_pass};

const DURATION: f32 = 0.2;

/// Render a cowbell hit.
pub fn cowbell(sample_rate: f32) -> RenderedVoice {
    let frames = frames_for(DURATION, sample_rate);
    let left = render_channel(sample_rate, frames);
    // Fixed right-channel attenuation: stereo width without losing determinism
    let right = left.iter().map(|s| s * 0.98).collect();
    RenderedVoice::new(left, right)
}

fn render_channel(sample_rate: f32, frames: usize) -> Vec<f32> {
    let mut samples = vec![0.0f32; frames];

    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;
        *sample = (TAU * 560.0 * t).sin() * (-t * 8.0).exp() * 0.5;
    }

    high_pass(&mut samples, sample_rate, 400.0);
    low_pass(&mut samples, sample_rate, 4_000.0, 1.0);
    samples
}
