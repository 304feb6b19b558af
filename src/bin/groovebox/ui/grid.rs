//! Pattern grid widget - 12 instrument rows by 16 step columns

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use groovebox::sequencer::{EngineState, STEPS, TRACKS};
use groovebox::voices::{Instrument, InstrumentInfo};

use super::super::app::Cursor;
use super::tag_color;

const NAME_WIDTH: usize = 8;

/// Render the step grid with playhead and cursor highlighting.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    state: &EngineState,
    instruments: &[InstrumentInfo; Instrument::COUNT],
    cursor: &Cursor,
    playhead: usize,
) {
    let block = Block::default().title(" Pattern ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(TRACKS);
    for (track, info) in instruments.iter().enumerate() {
        let color = tag_color(info.color);
        let mut spans = vec![Span::styled(
            format!("{:>width$} ", info.name, width = NAME_WIDTH),
            Style::default().fg(color),
        )];

        let Some(row) = state.pattern.row(track) else {
            continue;
        };
        for (step, &armed) in row.iter().enumerate() {
            let at_playhead = state.playing && step == playhead;
            let at_cursor = track == cursor.track && step == cursor.step;

            let symbol = if armed { "\u{25a0}" } else { "\u{00b7}" };
            let mut style = Style::default().fg(if armed { color } else { Color::DarkGray });
            if at_playhead {
                style = style.bg(Color::Rgb(60, 60, 60)).add_modifier(Modifier::BOLD);
            }
            if at_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(format!("{} ", symbol), style));
            // Beat boundary gap every four steps
            if step % 4 == 3 && step != STEPS - 1 {
                spans.push(Span::raw(" "));
            }
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
