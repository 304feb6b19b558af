//! Low-level DSP primitives shared by the percussion generators.
//!
//! These are plain functions over sample slices rather than stateful
//! processor objects: every voice is rendered once, offline, so the filters
//! deliberately rebuild their history registers on each call. There is no
//! inter-buffer continuity and none is intended.

/// ADSR amplitude envelope evaluated at a point in time.
pub mod envelope;
/// In-place low-pass (biquad) and high-pass (one-pole) filters.
pub mod filter;
/// White-noise sources for the noise-based voices.
pub mod noise;

pub use envelope::adsr;
pub use filter::{high_pass, low_pass};
pub use noise::{channel_rng, white};
