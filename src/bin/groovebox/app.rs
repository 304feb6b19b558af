//! Groovebox - interactive pattern editor over the step engine

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::{Consumer, RingBuffer};

use groovebox::sequencer::{Preset, Sequencer, STEPS, TRACKS};
use groovebox::voices::{Instrument, InstrumentInfo};

use super::ui;

const BPM_STEP: f32 = 5.0;
const VOLUME_STEP: f32 = 0.05;

/// Grid cursor position: (track, step).
pub struct Cursor {
    pub track: usize,
    pub step: usize,
}

pub struct App {
    sequencer: Sequencer,
    instruments: [InstrumentInfo; Instrument::COUNT],
    pub cursor: Cursor,
    /// Step events from the tick thread, drained once per frame.
    step_rx: Consumer<usize>,
    playhead: usize,
    should_quit: bool,
}

impl App {
    pub fn new(mut sequencer: Sequencer) -> Self {
        let instruments = sequencer.instruments();

        // The tick thread pushes step changes here; the draw loop polls them
        let (mut step_tx, step_rx) = RingBuffer::new(64);
        sequencer.on_step_change(move |step| {
            let _ = step_tx.push(step);
        });

        Self {
            sequencer,
            instruments,
            cursor: Cursor { track: 0, step: 0 },
            step_rx,
            playhead: 0,
            should_quit: false,
        }
    }

    /// Run the UI event loop.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Keep only the latest playhead position
            while let Ok(step) = self.step_rx.pop() {
                self.playhead = step;
            }

            let state = self.sequencer.state();
            terminal.draw(|frame| {
                ui::render(frame, &state, &self.instruments, &self.cursor, self.playhead);
            })?;

            // Non-blocking input poll, ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.sequencer.toggle_playback(),
            KeyCode::Enter => {
                self.sequencer.toggle_step(self.cursor.track, self.cursor.step);
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.sequencer.play_sound(self.cursor.track);
            }
            KeyCode::Up => {
                self.cursor.track = self.cursor.track.checked_sub(1).unwrap_or(TRACKS - 1);
            }
            KeyCode::Down => {
                self.cursor.track = (self.cursor.track + 1) % TRACKS;
            }
            KeyCode::Left => {
                self.cursor.step = self.cursor.step.checked_sub(1).unwrap_or(STEPS - 1);
            }
            KeyCode::Right => {
                self.cursor.step = (self.cursor.step + 1) % STEPS;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let bpm = self.sequencer.state().bpm + BPM_STEP;
                self.sequencer.set_bpm(bpm);
            }
            KeyCode::Char('-') => {
                let bpm = self.sequencer.state().bpm - BPM_STEP;
                self.sequencer.set_bpm(bpm);
            }
            KeyCode::Char(']') => {
                let volume = self.sequencer.state().volume + VOLUME_STEP;
                self.sequencer.set_volume(volume);
            }
            KeyCode::Char('[') => {
                let volume = self.sequencer.state().volume - VOLUME_STEP;
                self.sequencer.set_volume(volume);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => self.sequencer.clear_pattern(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.sequencer.randomize_pattern(),
            KeyCode::Char('1') => self.sequencer.apply_preset(Preset::Basic),
            KeyCode::Char('2') => self.sequencer.apply_preset(Preset::Funk),
            KeyCode::Char('3') => self.sequencer.apply_preset(Preset::Techno),
            _ => {}
        }
    }
}
