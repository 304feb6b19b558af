//! Transport bar widget - shows play state, tempo, volume, and playhead

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use groovebox::sequencer::EngineState;

/// Render the transport bar.
pub fn render_transport(frame: &mut Frame, area: Rect, state: &EngineState, playhead: usize) {
    let block = Block::default().title(" groovebox ").borders(Borders::ALL);

    let play_symbol = if state.playing { "\u{25b6}" } else { "\u{25a0}" };
    let play_state_str = if state.playing { "Playing" } else { "Stopped" };

    let volume_pct = (state.volume * 100.0).round() as u32;
    let beat = playhead / 4 + 1;

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, play_state_str),
            Style::default().fg(if state.playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("BPM: {:.0}  ", state.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Vol: {}%  ", volume_pct),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Step {:2}/16 | Beat {}", playhead + 1, beat),
            Style::default().fg(Color::White),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
