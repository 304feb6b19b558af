use std::f32::consts::PI;

/*
Offline voice filters
=====================

| function  | topology             | use                                  |
| --------- | -------------------- | ------------------------------------ |
| low_pass  | biquad, Butterworth  | warmth, body, taming noise highs     |
| high_pass | one-pole RC model    | removing rumble, crisping cymbals    |

Both process a whole channel in place. History registers live on the stack of
the call: a fresh invocation always starts from silence. That is the audible
contract for pre-rendered drum hits - each hit is filtered in isolation, with
no continuity carried over from a previous render.
*/

/// In-place biquad low-pass with optional resonance.
///
/// Coefficients derive from `c = 1/tan(π·cutoff/sample_rate)`; the cutoff is
/// clamped to Nyquist first so coefficients stay finite at any requested
/// frequency. Resonance of 1.0 is the flat Butterworth response.
pub fn low_pass(samples: &mut [f32], sample_rate: f32, cutoff: f32, resonance: f32) {
    let nyquist = sample_rate * 0.5;
    let frequency = cutoff.min(nyquist);
    let c = 1.0 / (PI * frequency / sample_rate).tan();

    let a1 = 1.0 / (1.0 + resonance * c + c * c);
    let a2 = 2.0 * a1;
    let a3 = a1;
    let b1 = 2.0 * (1.0 - c * c) * a1;
    let b2 = (1.0 - resonance * c + c * c) * a1;

    let (mut x1, mut x2) = (0.0f32, 0.0f32);
    let (mut y1, mut y2) = (0.0f32, 0.0f32);

    for sample in samples.iter_mut() {
        let x0 = *sample;
        let y0 = a1 * x0 + a2 * x1 + a3 * x2 - b1 * y1 - b2 * y2;
        *sample = y0;
        x2 = x1;
        x1 = x0;
        y2 = y1;
        y1 = y0;
    }
}

/// In-place one-pole high-pass.
///
/// Classic RC difference equation: `alpha = rc/(rc + dt)` with
/// `rc = 1/(2π·cutoff)` and `dt = 1/sample_rate`.
pub fn high_pass(samples: &mut [f32], sample_rate: f32, cutoff: f32) {
    let rc = 1.0 / (cutoff * 2.0 * PI);
    let dt = 1.0 / sample_rate;
    let alpha = rc / (rc + dt);

    let mut x1 = 0.0f32;
    let mut y1 = 0.0f32;

    for sample in samples.iter_mut() {
        let x0 = *sample;
        let y0 = alpha * (y1 + x0 - x1);
        *sample = y0;
        x1 = x0;
        y1 = y0;
    }
}
