//! TUI module for groovebox
//!
//! Pattern grid editor with a transport bar and a help line.

mod grid;
mod transport;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use groovebox::sequencer::EngineState;
use groovebox::voices::{Instrument, InstrumentInfo};

use super::app::Cursor;
use grid::render_grid;
use transport::render_transport;

/// Render one frame of the whole interface.
pub fn render(
    frame: &mut Frame,
    state: &EngineState,
    instruments: &[InstrumentInfo; Instrument::COUNT],
    cursor: &Cursor,
    playhead: usize,
) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Min(14),   // Pattern grid
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], state, playhead);
    render_grid(frame, chunks[1], state, instruments, cursor, playhead);

    let help = Paragraph::new(
        " [Q] Quit  [Space] Play/Stop  [Enter] Toggle  [A] Audition  [+/-] BPM  [ / ] Vol[C] Clear  [R] Random  [1-3] Preset",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

/// Map an instrument's color tag onto a terminal color.
fn tag_color(tag: &str) -> Color {
    match tag {
        "red" => Color::Red,
        "orange" => Color::LightRed,
        "yellow" => Color::Yellow,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "purple" => Color::Magenta,
        "pink" => Color::LightMagenta,
        "indigo" => Color::LightBlue,
        "cyan" => Color::Cyan,
        "teal" => Color::LightCyan,
        "lime" => Color::LightGreen,
        "amber" => Color::LightYellow,
        _ => Color::White,
    }
}
