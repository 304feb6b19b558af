use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// One white-noise sample, uniform in [-1, 1).
#[inline]
pub fn white<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(-1.0f32..1.0)
}

/// A noise stream for one audio channel.
///
/// Each call seeds a fresh PCG from the thread RNG, so the left and right
/// channels of a voice draw from independent streams. Decorrelated channel
/// noise is what gives the rendered hits their stereo width.
pub fn channel_rng() -> Pcg32 {
    Pcg32::from_rng(&mut rand::rng())
}
