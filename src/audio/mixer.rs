//! Audio-thread side of the mix bus.
//!
//! The mixer owns the voice bank and a list of in-flight playback cursors.
//! Each trigger clones an `Arc` onto the list; rendering sums every active
//! cursor into the interleaved output and retires cursors that reach the end
//! of their buffer. Voice buffers themselves are immutable and shared - any
//! number of overlapping cursors can read the same hit.

use std::sync::Arc;

use crate::audio::BusCommand;
use crate::voices::RenderedVoice;

/// One in-flight playback of a pre-rendered voice.
struct Cursor {
    voice: Arc<RenderedVoice>,
    position: usize,
}

pub struct Mixer {
    voices: Vec<Arc<RenderedVoice>>,
    active: Vec<Cursor>,
    gain: f32,
}

impl Mixer {
    pub fn new(gain: f32) -> Self {
        Self {
            voices: Vec::new(),
            active: Vec::with_capacity(32),
            gain,
        }
    }

    /// Apply one control command.
    pub fn apply(&mut self, command: BusCommand) {
        match command {
            BusCommand::Load(voices) => self.voices = voices,
            BusCommand::Trigger(track) => {
                if let Some(voice) = self.voices.get(track) {
                    self.active.push(Cursor {
                        voice: Arc::clone(voice),
                        position: 0,
                    });
                }
            }
            BusCommand::SetGain(gain) => self.gain = gain,
        }
    }

    /// Mix all active cursors into an interleaved output buffer.
    ///
    /// Stereo content goes to the first two channels; additional channels
    /// are left silent. A mono output gets the two channels averaged.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        out.fill(0.0);
        if channels == 0 {
            return;
        }

        let frames = out.len() / channels;

        for cursor in &mut self.active {
            let remaining = cursor.voice.frames() - cursor.position;
            let to_mix = remaining.min(frames);
            let left = &cursor.voice.left()[cursor.position..cursor.position + to_mix];
            let right = &cursor.voice.right()[cursor.position..cursor.position + to_mix];

            for i in 0..to_mix {
                let base = i * channels;
                if channels >= 2 {
                    out[base] += left[i] * self.gain;
                    out[base + 1] += right[i] * self.gain;
                } else {
                    out[base] += (left[i] + right[i]) * 0.5 * self.gain;
                }
            }

            cursor.position += to_mix;
        }

        self.active.retain(|c| c.position < c.voice.frames());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(samples: Vec<f32>) -> Arc<RenderedVoice> {
        Arc::new(RenderedVoice::new(samples.clone(), samples))
    }

    fn mixer_with_bank() -> Mixer {
        let mut mixer = Mixer::new(1.0);
        mixer.apply(BusCommand::Load(vec![
            voice(vec![1.0, 1.0, 1.0, 1.0]),
            voice(vec![0.5, 0.5]),
        ]));
        mixer
    }

    #[test]
    fn trigger_plays_voice_through_output() {
        let mut mixer = mixer_with_bank();
        mixer.apply(BusCommand::Trigger(0));

        let mut out = vec![0.0f32; 8]; // 4 stereo frames
        mixer.render(&mut out, 2);

        assert_eq!(out, vec![1.0; 8]);
    }

    #[test]
    fn simultaneous_triggers_start_in_same_block() {
        let mut mixer = mixer_with_bank();
        mixer.apply(BusCommand::Trigger(0));
        mixer.apply(BusCommand::Trigger(1));

        let mut out = vec![0.0f32; 4]; // 2 stereo frames
        mixer.render(&mut out, 2);

        // Both voices sound from frame 0
        assert_eq!(out, vec![1.5, 1.5, 1.5, 1.5]);
    }

    #[test]
    fn gain_scales_mixed_output_not_voices() {
        let mut mixer = mixer_with_bank();
        mixer.apply(BusCommand::SetGain(0.5));
        mixer.apply(BusCommand::Trigger(0));

        let mut out = vec![0.0f32; 4];
        mixer.render(&mut out, 2);

        assert_eq!(out, vec![0.5; 4]);
    }

    #[test]
    fn cursor_retires_after_buffer_ends() {
        let mut mixer = mixer_with_bank();
        mixer.apply(BusCommand::Trigger(1)); // 2-frame voice

        let mut out = vec![0.0f32; 8]; // 4 frames: voice ends mid-block
        mixer.render(&mut out, 2);
        assert_eq!(&out[..4], &[0.5, 0.5, 0.5, 0.5]);
        assert_eq!(&out[4..], &[0.0, 0.0, 0.0, 0.0]);

        // Next block is silent; the cursor is gone
        mixer.render(&mut out, 2);
        assert_eq!(out, vec![0.0; 8]);
    }

    #[test]
    fn trigger_out_of_bank_range_is_ignored()  {
        let mut mixer = mixer_with_bank();
        mixer.apply(BusCommand::Trigger(99));

        let mut out = vec![0.0f32; 4];
        mixer.render(&mut out, 2);
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn mono_output_averages_channels() {
        let mut mixer = Mixer::new(1.0);
        mixer.apply(BusCommand::Load(vec![Arc::new(RenderedVoice::new(
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ))]));
        mixer.apply(BusCommand::Trigger(0));

        let mut out = vec![0.0f32; 2];
        mixer.render(&mut out, 1);
        assert_eq!(out, vec![0.5, 0.5]);
    }

    #[test]
    fn overlapping_triggers_of_same_voice_sum() {
        let mut mixer = mixer_with_bank();
        mixer.apply(BusCommand::Trigger(0));

        let mut out = vec![0.0f32; 4]; // advance 2 frames
        mixer.render(&mut out, 2);

        mixer.apply(BusCommand::Trigger(0)); // retrigger while first still playing
        mixer.render(&mut out, 2);

        // First cursor tail (1.0) + second cursor head (1.0)
        assert_eq!(out, vec![2.0, 2.0, 2.0, 2.0]);
    }
}
