//! Open hi-hat voice: attenuated noise with a slow exponential decay,
//! band-limited to the hi-hat register.

use super::{frames_for, RenderedVoice};
use crate::dsp::{channel_rng, high_pass, low_pass, white};

const DURATION: f32 = 0.3;

/// Render an open hi-hat hit.
pub fn openhat(sample_rate: f32) -> RenderedVoice {
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
        let noise = white(&mut rng) * 0.3;
        *sample = noise * (-t * 4.0).exp() * 0.15;
    }

    high_pass(&mut samples, sample_rate, 5_000.0);
    low_pass(&mut samples, sample_rate, 12_000.0, 1.0);
    samples
}
