//! cpal-backed output bus.
//!
//! Control-side half of the mix bus: commands are pushed into an rtrb ring
//! buffer and drained by the audio callback at the top of every block. The
//! `cpal::Stream` is handed back to the caller - it is not `Send`, so the
//! engine keeps it alive on the control thread for its own lifetime.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, info, warn};
use rtrb::{Producer, RingBuffer};

use crate::audio::{BusCommand, Mixer, OutputBus};
use crate::voices::RenderedVoice;
use crate::EngineError;

/// Command queue depth. A full 12-track step plus gain changes fits with
/// plenty of headroom.
const COMMAND_CAPACITY: usize = 256;

pub struct CpalBus {
    commands: Mutex<Producer<BusCommand>>,
}

impl CpalBus {
    /// Acquire the default output device and start an f32 stream.
    ///
    /// Returns the bus handle, the stream (keep it alive or playback stops),
    /// and the device sample rate voices should be rendered at.
    pub fn open() -> Result<(CpalBus, cpal::Stream, f32), EngineError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(EngineError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(
            "audio output: {} Hz, {} channel(s)",
            sample_rate, channels
        );

        let (producer, mut consumer) = RingBuffer::<BusCommand>::new(COMMAND_CAPACITY);
        let mut mixer = Mixer::new(1.0);

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                // Drain control commands, then mix the block
                while let Ok(command) = consumer.pop() {
                    mixer.apply(command);
                }
                mixer.render(data, channels);
            },
            |err| warn!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        let bus = CpalBus {
            commands: Mutex::new(producer),
        };
        Ok((bus, stream, sample_rate))
    }

    fn push(&self, command: BusCommand) {
        let mut producer = self.commands.lock().unwrap();
        if producer.push(command).is_err() {
            // Queue full means the audio callback stalled; dropping the
            // command is the realtime-safe option
            debug!("bus command queue full, command dropped");
        }
    }
}

impl OutputBus for CpalBus {
    fn load(&self, voices: Vec<Arc<RenderedVoice>>) {
        self.push(BusCommand::Load(voices));
    }

    fn trigger(&self, track: usize) {
        self.push(BusCommand::Trigger(track));
    }

    fn set_gain(&self, gain: f32) {
        self.push(BusCommand::SetGain(gain));
    }
}
