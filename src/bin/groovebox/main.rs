//! groovebox - Terminal drum machine
//!
//! Run with: cargo run

mod app;
mod ui;

use app::App;
use groovebox::sequencer::Sequencer;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let sequencer = Sequencer::initialize()?;

    let mut terminal = ratatui::init();
    let result = App::new(sequencer).run(&mut terminal);
    ratatui::restore();
    result
}
