/*
Step engine
===========

Owns the pattern and transport, drives playback in real time, and notifies
observers. The moving parts:

  control thread      Sequencer's public operations. All mutation funnels
                      through here; the shared state behind the mutex is the
                      single source of truth.

  tick thread         Spawned by play(), joined by stop(). Runs a
                      deadline-based wait so tick cost does not accumulate as
                      drift, and holds the state lock for the whole tick so a
                      tick can never overlap itself.

  output bus          Shared `Arc<dyn OutputBus>`. Triggers issued during one
                      tick land in the same audio block - no serialization
                      delay between simultaneously armed tracks.

Stopping is synchronous: stop() joins the tick thread before touching state,
so no tick can fire after stop() returns, and the closing step-changed(0)
notification is always the last one out.

Tempo changes while playing restart playback from step zero (stop + play).
That is the deliberate behavior, not a phase-preserving retune: the stale
timer is discarded so the new period takes effect immediately.
*/

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::audio::OutputBus;
use crate::sequencer::{Pattern, Preset, Transport};
use crate::voices::{self, Instrument, InstrumentInfo};

#[cfg(feature = "rtrb")]
use crate::{audio::CpalBus, EngineError};

/// Step-changed observer. Runs on the tick thread; keep it quick.
pub type StepHandler = Box<dyn FnMut(usize) + Send>;
/// State-changed observer. Receives an owned snapshot after every mutation.
pub type StateHandler = Box<dyn FnMut(EngineState) + Send>;

/// Owned snapshot of transport and pattern.
///
/// Handed to observers and returned from [`Sequencer::state`]; mutating it
/// has no effect on the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    pub playing: bool,
    pub current_step: usize,
    pub bpm: f32,
    pub volume: f32,
    pub pattern: Pattern,
}

struct Shared {
    pattern: Pattern,
    transport: Transport,
    on_step: Option<StepHandler>,
    on_state: Option<StateHandler>,
}

impl Shared {
    fn snapshot(&self) -> EngineState {
        EngineState {
            playing: self.transport.is_playing(),
            current_step: self.transport.current_step(),
            bpm: self.transport.bpm(),
            volume: self.transport.volume(),
            pattern: self.pattern,
        }
    }

    fn notify_state(&mut self) {
        let snapshot = self.snapshot();
        if let Some(handler) = self.on_state.as_mut() {
            handler(snapshot);
        }
    }

    fn notify_step(&mut self) {
        let step = self.transport.current_step();
        if let Some(handler) = self.on_step.as_mut() {
            handler(step);
        }
    }
}

/// The drum machine's timing and state engine.
///
/// Construct with [`Sequencer::initialize`] for real audio output, or
/// [`Sequencer::with_bus`] to inject any [`OutputBus`] (tests, recording
/// taps, alternative backends). There is no global instance - collaborators
/// receive a reference to this one.
pub struct Sequencer {
    shared: Arc<Mutex<Shared>>,
    bus: Arc<dyn OutputBus>,
    ticker: Option<Ticker>,
    // Keeps the device stream alive for the engine's lifetime
    #[cfg(feature = "rtrb")]
    _stream: Option<cpal::Stream>,
}

impl Sequencer {
    /// Acquire the default output device, pre-render all twelve voices at
    /// the device rate, and stand up the mix bus.
    ///
    /// Must complete before any playback operation is meaningful. Fails fast
    /// with a distinguishable [`EngineError`] if the device cannot be
    /// acquired.
    #[cfg(feature = "rtrb")]
    pub fn initialize() -> Result<Self, EngineError> {
        let (bus, stream, sample_rate) = CpalBus::open()?;
        let mut sequencer = Self::with_bus(Arc::new(bus), sample_rate);
        sequencer._stream = Some(stream);
        Ok(sequencer)
    }

    /// Build an engine over an injected output bus.
    ///
    /// Renders the voice bank at `sample_rate` and loads it into the bus.
    pub fn with_bus(bus: Arc<dyn OutputBus>, sample_rate: f32) -> Self {
        info!(
            "pre-rendering {} voices at {} Hz",
            Instrument::COUNT,
            sample_rate
        );
        let bank = Instrument::ALL
            .iter()
            .map(|&instrument| Arc::new(voices::render(instrument, sample_rate)))
            .collect();
        bus.load(bank);

        let transport = Transport::new();
        bus.set_gain(transport.volume());

        Self {
            shared: Arc::new(Mutex::new(Shared {
                pattern: Pattern::empty(),
                transport,
                on_step: None,
                on_state: None,
            })),
            bus,
            ticker: None,
            #[cfg(feature = "rtrb")]
            _stream: None,
        }
    }

    // --- queries ---------------------------------------------------------

    /// Immutable snapshot of transport and pattern.
    pub fn state(&self) -> EngineState {
        self.shared.lock().unwrap().snapshot()
    }

    /// Name and color tag per track, in track order.
    pub fn instruments(&self) -> [InstrumentInfo; Instrument::COUNT] {
        Instrument::ALL.map(Instrument::info)
    }

    // --- subscriptions ---------------------------------------------------

    /// Subscribe to step changes. Single slot: the last subscriber wins.
    pub fn on_step_change(&mut self, handler: impl FnMut(usize) + Send + 'static) {
        self.shared.lock().unwrap().on_step = Some(Box::new(handler));
    }

    /// Subscribe to state changes. Single slot: the last subscriber wins.
    pub fn on_state_change(&mut self, handler: impl FnMut(EngineState) + Send + 'static) {
        self.shared.lock().unwrap().on_state = Some(Box::new(handler));
    }

    // --- transport -------------------------------------------------------

    /// Start playback. No-op if already playing.
    pub fn play(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        let interval = {
            let mut shared = self.shared.lock().unwrap();
            shared.transport.set_playing(true);
            shared.notify_state();
            shared.transport.step_interval()
        };

        debug!("transport: play ({}ms per step)", interval.as_millis());
        self.ticker = Some(Ticker::spawn(
            Arc::clone(&self.shared),
            Arc::clone(&self.bus),
            interval,
        ));
    }

    /// Stop playback, rewind to step zero, and emit a final
    /// step-changed(0). No-op if already stopped.
    ///
    /// Cancellation is synchronous: the tick thread is joined before this
    /// returns, so no tick fires afterwards.
    pub fn stop(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        ticker.cancel();
        debug!("transport: stop");

        let mut shared = self.shared.lock().unwrap();
        shared.transport.set_playing(false);
        shared.transport.reset_step();
        shared.notify_state();
        shared.notify_step();
    }

    /// Play or stop depending on current state.
    pub fn toggle_playback(&mut self) {
        if self.ticker.is_some() {
            self.stop();
        } else {
            self.play();
        }
    }

    /// Set tempo, clamped to [60, 200] BPM.
    ///
    /// While playing this restarts the scheduler so the new period takes
    /// effect immediately; the playhead resets to step zero by design.
    pub fn set_bpm(&mut self, bpm: f32) {
        let was_playing = self.ticker.is_some();
        if was_playing {
            self.stop();
        }

        {
            let mut shared = self.shared.lock().unwrap();
            shared.transport.set_bpm(bpm);
            shared.notify_state();
        }

        if was_playing {
            self.play();
        }
    }

    /// Set master volume, clamped to [0, 1]. Applies to the mixed output
    /// immediately; playing voices are not re-rendered.
    pub fn set_volume(&mut self, volume: f32) {
        let mut shared = self.shared.lock().unwrap();
        shared.transport.set_volume(volume);
        self.bus.set_gain(shared.transport.volume());
        shared.notify_state();
    }

    // --- pattern ---------------------------------------------------------

    /// Flip one cell. Out-of-range coordinates are ignored.
    pub fn toggle_step(&mut self, track: usize, step: usize) {
        let mut shared = self.shared.lock().unwrap();
        if shared.pattern.toggle(track, step) {
            shared.notify_state();
        }
    }

    /// Silence the whole pattern.
    pub fn clear_pattern(&mut self) {
        let mut shared = self.shared.lock().unwrap();
        shared.pattern.clear();
        shared.notify_state();
    }

    /// Replace the pattern with a musically weighted random one.
    pub fn randomize_pattern(&mut self) {
        let mut shared = self.shared.lock().unwrap();
        shared.pattern.randomize(&mut rand::rng());
        shared.notify_state();
    }

    /// Replace the pattern with a named template.
    pub fn apply_preset(&mut self, preset: Preset) {
        let mut shared = self.shared.lock().unwrap();
        shared.pattern.apply_preset(preset);
        shared.notify_state();
    }

    // --- audition --------------------------------------------------------

    /// Trigger one track's voice right now, independent of the transport.
    pub fn play_sound(&self, track: usize) {
        if track < Instrument::COUNT {
            self.bus.trigger(track);
        }
    }
}

impl Drop for Sequencer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

/// One tick: trigger everything armed at the current step, advance the
/// playhead, then notify with the new step.
fn tick(shared: &Mutex<Shared>, bus: &Arc<dyn OutputBus>) {
    let mut shared = shared.lock().unwrap();

    let step = shared.transport.current_step();
    for track in shared.pattern.armed_tracks(step).collect::<Vec<_>>() {
        bus.trigger(track);
    }

    shared.transport.advance_step();
    shared.notify_step();
}

/// Cancellable repeating tick task.
struct Ticker {
    cancel: Arc<(Mutex<bool>, Condvar)>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(shared: Arc<Mutex<Shared>>, bus: Arc<dyn OutputBus>, interval: Duration) -> Self {
        let cancel = Arc::new((Mutex::new(false), Condvar::new()));
        let flag = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            let (lock, cvar) = &*flag;
            let mut cancelled = lock.lock().unwrap();
            let mut deadline = Instant::now() + interval;

            loop {
                // Wait until the deadline or cancellation, whichever first
                while !*cancelled {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    let (guard, _) = cvar.wait_timeout(cancelled, deadline - now).unwrap();
                    cancelled = guard;
                }
                if *cancelled {
                    return;
                }

                tick(&shared, &bus);

                // Advance from the previous deadline, not from now: the time
                // a tick takes must not stretch the period
                deadline += interval;
            }
        });

        Self { cancel, handle }
    }

    /// Cancel and join. After this returns no further tick can fire; a tick
    /// already in flight has completed.
    fn cancel(self) {
        let (lock, cvar) = &*self.cancel;
        *lock.lock().unwrap() = true;
        cvar.notify_one();
        let _ = self.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices::RenderedVoice;
    use std::sync::Mutex as StdMutex;

    /// Records every bus interaction instead of making sound.
    #[derive(Default)]
    struct MockBus {
        triggers: StdMutex<Vec<usize>>,
        gain: StdMutex<f32>,
        loaded: StdMutex<usize>,
    }

    impl MockBus {
        fn triggers(&self) -> Vec<usize> {
            self.triggers.lock().unwrap().clone()
        }
    }

    impl OutputBus for MockBus {
        fn load(&self, voices: Vec<Arc<RenderedVoice>>) {
            *self.loaded.lock().unwrap() = voices.len();
        }

        fn trigger(&self, track: usize) {
            self.triggers.lock().unwrap().push(track);
        }

        fn set_gain(&self, gain: f32) {
            *self.gain.lock().unwrap() = gain;
        }
    }

    // Low rate keeps voice pre-rendering cheap in tests
    const TEST_RATE: f32 = 8_000.0;

    fn engine() -> (Sequencer, Arc<MockBus>) {
        let bus = Arc::new(MockBus::default());
        let sequencer = Sequencer::with_bus(bus.clone(), TEST_RATE);
        (sequencer, bus)
    }

    #[test]
    fn initialization_loads_all_twelve_voices() {
        let (_sequencer, bus) = engine();
        assert_eq!(*bus.loaded.lock().unwrap(), 12);
    }

    #[test]
    fn initial_state_matches_defaults() {
        let (sequencer, bus) = engine();
        let state = sequencer.state();

        assert!(!state.playing);
        assert_eq!(state.current_step, 0);
        assert_eq!(state.bpm, 120.0);
        assert_eq!(state.volume, 0.7);
        assert_eq!(state.pattern, Pattern::empty());
        // Default volume reaches the bus at construction
        assert_eq!(*bus.gain.lock().unwrap(), 0.7);
    }

    #[test]
    fn instruments_lists_names_in_track_order() {
        let (sequencer, _) = engine();
        let infos = sequencer.instruments();

        assert_eq!(infos.len(), 12);
        assert_eq!(infos[0].name, "Kick");
        assert_eq!(infos[1].name, "Snare");
        assert_eq!(infos[11].name, "V-Perc");
    }

    #[test]
    fn set_bpm_clamps() {
        let (mut sequencer, _) = engine();

        sequencer.set_bpm(30.0);
        assert_eq!(sequencer.state().bpm, 60.0);

        sequencer.set_bpm(500.0);
        assert_eq!(sequencer.state().bpm, 200.0);
    }

    #[test]
    fn set_volume_clamps_and_reaches_bus() {
        let (mut sequencer, bus) = engine();

        sequencer.set_volume(2.0);
        assert_eq!(sequencer.state().volume, 1.0);
        assert_eq!(*bus.gain.lock().unwrap(), 1.0);

        sequencer.set_volume(-1.0);
        assert_eq!(sequencer.state().volume, 0.0);
        assert_eq!(*bus.gain.lock().unwrap(), 0.0);
    }

    #[test]
    fn toggle_step_round_trips_and_ignores_out_of_range() {
        let (mut sequencer, _) = engine();

        sequencer.toggle_step(3, 7);
        assert!(sequencer.state().pattern.get(3, 7));

        sequencer.toggle_step(3, 7);
        assert!(!sequencer.state().pattern.get(3, 7));

        let before = sequencer.state().pattern;
        sequencer.toggle_step(12, 0);
        sequencer.toggle_step(0, 16);
        assert_eq!(sequencer.state().pattern, before);
    }

    #[test]
    fn snapshots_are_isolated_from_engine_state() {
        let (mut sequencer, _) = engine();
        let mut state = sequencer.state();

        state.pattern.toggle(0, 0);
        state.bpm = 999.0;

        assert!(!sequencer.state().pattern.get(0, 0));
        assert_eq!(sequencer.state().bpm, 120.0);
    }

    #[test]
    fn play_then_stop_resets_step_and_notifies_zero() {
        let (mut sequencer, _) = engine();
        let steps: Arc<StdMutex<Vec<usize>>> = Arc::default();
        let observed = steps.clone();
        sequencer.on_step_change(move |step| observed.lock().unwrap().push(step));

        sequencer.set_bpm(200.0); // 75ms per step
        sequencer.play();
        assert!(sequencer.state().playing);

        thread::sleep(Duration::from_millis(400));
        sequencer.stop();

        let state = sequencer.state();
        assert!(!state.playing);
        assert_eq!(state.current_step, 0);

        let seen = steps.lock().unwrap().clone();
        assert!(seen.len() >= 2, "expected ticks to fire, saw {:?}", seen);
        // The closing notification carries step zero
        assert_eq!(*seen.last().unwrap(), 0);
    }

    #[test]
    fn no_step_fires_after_stop_returns() {
        let (mut sequencer, _) = engine();
        let steps: Arc<StdMutex<Vec<usize>>> = Arc::default();
        let observed = steps.clone();
        sequencer.on_step_change(move |step| observed.lock().unwrap().push(step));

        sequencer.set_bpm(200.0);
        sequencer.play();
        thread::sleep(Duration::from_millis(200));
        sequencer.stop();

        let count_at_stop = steps.lock().unwrap().len();
        thread::sleep(Duration::from_millis(200));
        assert_eq!(steps.lock().unwrap().len(), count_at_stop);
    }

    #[test]
    fn step_notifications_are_monotonic_modulo_bar() {
        let (mut sequencer, _) = engine();
        let steps: Arc<StdMutex<Vec<usize>>> = Arc::default();
        let observed = steps.clone();
        sequencer.on_step_change(move |step| observed.lock().unwrap().push(step));

        sequencer.set_bpm(200.0);
        sequencer.play();
        thread::sleep(Duration::from_millis(600));
        sequencer.stop();

        let seen = steps.lock().unwrap().clone();
        // All but the final stop notification advance by exactly one, mod 16
        for pair in seen[..seen.len() - 1].windows(2) {
            assert_eq!(pair[1], (pair[0] + 1) % 16, "sequence {:?}", seen);
        }
    }

    #[test]
    fn armed_cells_trigger_their_tracks() {
        let (mut sequencer, bus) = engine();

        // Arm kick on every step, cowbell on step 0
        for step in 0..16 {
            sequencer.toggle_step(0, step);
        }
        sequencer.toggle_step(9, 0);

        sequencer.set_bpm(200.0);
        sequencer.play();
        thread::sleep(Duration::from_millis(400));
        sequencer.stop();

        let triggers = bus.triggers();
        let kicks = triggers.iter().filter(|&&t| t == 0).count();
        assert!(kicks >= 2, "expected repeated kick triggers, got {:?}", triggers);
        assert!(triggers.contains(&9), "cowbell at step 0 should fire");
    }

    #[test]
    fn play_twice_is_a_noop() {
        let (mut sequencer, _) = engine();
        sequencer.play();
        sequencer.play();
        assert!(sequencer.state().playing);
        sequencer.stop();
    }

    #[test]
    fn stop_when_stopped_is_silent() {
        let (mut sequencer, _) = engine();
        let steps: Arc<StdMutex<Vec<usize>>> = Arc::default();
        let observed = steps.clone();
        sequencer.on_step_change(move |step| observed.lock().unwrap().push(step));

        sequencer.stop();
        assert!(steps.lock().unwrap().is_empty());
    }

    #[test]
    fn bpm_change_while_playing_restarts_from_zero() {
        let (mut sequencer, _) = engine();
        sequencer.set_bpm(200.0);
        sequencer.play();
        thread::sleep(Duration::from_millis(250));

        sequencer.set_bpm(150.0);
        let state = sequencer.state();
        assert!(state.playing, "tempo change must keep playing");
        assert_eq!(state.bpm, 150.0);

        sequencer.stop();
    }

    #[test]
    fn last_step_subscriber_wins() {
        let (mut sequencer, _) = engine();

        let first: Arc<StdMutex<Vec<usize>>> = Arc::default();
        let second: Arc<StdMutex<Vec<usize>>> = Arc::default();

        let sink = first.clone();
        sequencer.on_step_change(move |step| sink.lock().unwrap().push(step));
        let sink = second.clone();
        sequencer.on_step_change(move |step| sink.lock().unwrap().push(step));

        sequencer.play();
        sequencer.stop(); // emits step-changed(0) to the active slot

        assert!(first.lock().unwrap().is_empty());
        assert!(!second.lock().unwrap().is_empty());
    }

    #[test]
    fn mutations_fire_state_change() {
        let (mut sequencer, _) = engine();
        let events: Arc<StdMutex<Vec<EngineState>>> = Arc::default();
        let sink = events.clone();
        sequencer.on_state_change(move |state| sink.lock().unwrap().push(state));

        sequencer.toggle_step(0, 0);
        sequencer.set_bpm(90.0);
        sequencer.set_volume(0.5);
        sequencer.clear_pattern();
        sequencer.apply_preset(Preset::Basic);
        sequencer.randomize_pattern();

        let seen = events.lock().unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[1].bpm, 90.0);
        assert_eq!(seen[2].volume, 0.5);
        assert!(seen[4].pattern.get(0, 0), "basic preset arms kick on step 0");
    }

    #[test]
    fn play_sound_triggers_independent_of_transport() {
        let (sequencer, bus) = engine();

        sequencer.play_sound(5);
        sequencer.play_sound(12); // out of range: ignored

        assert_eq!(bus.triggers(), vec![5]);
        assert!(!sequencer.state().playing);
    }

    #[test]
    fn preset_rows_match_templates() {
        let (mut sequencer, _) = engine();
        sequencer.apply_preset(Preset::Basic);

        let pattern = sequencer.state().pattern;
        let kick: Vec<usize> = (0..16).filter(|&s| pattern.get(0, s)).collect();
        let snare: Vec<usize> = (0..16).filter(|&s| pattern.get(1, s)).collect();
        assert_eq!(kick, vec![0, 4, 8, 12]);
        assert_eq!(snare, vec![4, 12]);
    }
}
