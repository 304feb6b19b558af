/*
ADSR Envelope
=============

A point-evaluated linear ADSR. Unlike a streaming envelope generator with a
gate and a state machine, the percussion voices here know their full duration
up front, so the envelope is just a function of time:

  Level
    1.0 ┐   ╱╲
        │  ╱  ╲__________
    S   │ ╱              ╲
    0.0 └╱────────────────╲──→ Time
        Attack Decay  Sus  Release

Segments (times in seconds):
  [0, attack)                    linear ramp 0 → 1
  [attack, attack + decay)       linear ramp 1 → sustain
  [attack + decay, dur - rel)    hold at sustain
  [dur - rel, dur]               linear ramp sustain → 0

Linear ramps are cheap and punchy, which suits drums; the exponential decays
that give percussion its character are layered on top by the voices themselves.
*/

/// Evaluate a linear ADSR envelope at time `t`.
///
/// `t` and `duration` are in seconds. Expects `t` within `[0, duration]`
/// and segment times that fit inside the duration
/// (`attack + decay <= duration - release`).
#[inline]
pub fn adsr(t: f32, duration: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> f32 {
    if t < attack {
        t / attack
    } else if t < attack + decay {
        1.0 - (1.0 - sustain) * (t - attack) / decay
    } else if t < duration - release {
        sustain
    } else {
        sustain * (duration - t) / release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(adsr(0.0, 0.4, 0.01, 0.05, 0.3, 0.1), 0.0);
    }

    #[test]
    fn attack_peaks_at_one() {
        let attack = 0.01;
        assert_eq!(adsr(attack, 0.4, attack, 0.05, 0.3, 0.1), 1.0);
    }

    #[test]
    fn release_ends_at_zero() {
        let duration = 0.4;
        assert_eq!(adsr(duration, duration, 0.01, 0.05, 0.3, 0.1), 0.0);
    }

    #[test]
    fn sustain_segment_holds_level() {
        let sustain = 0.3;
        // Midway between attack+decay and duration-release
        let level = adsr(0.15, 0.4, 0.01, 0.05, sustain, 0.1);
        assert_eq!(level, sustain);
    }

    #[test]
    fn decay_interpolates_toward_sustain() {
        let sustain = 0.4;
        // Halfway through a 0.1s decay starting at t=0.01
        let level = adsr(0.06, 0.4, 0.01, 0.1, sustain, 0.1);
        let expected = 1.0 - (1.0 - sustain) * 0.5;
        assert!((level - expected).abs() < 1e-6);
    }

    #[test]
    fn stays_within_unit_range_over_full_duration() {
        let duration = 0.18;
        for i in 0..=1000 {
            let t = duration * i as f32 / 1000.0;
            let level = adsr(t, duration, 0.001, 0.02, 0.1, 0.1);
            assert!((0.0..=1.0).contains(&level), "level {} at t {}", level, t);
        }
    }
}
