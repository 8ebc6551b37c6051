mod app;
mod cli;
mod input;
mod logging;
mod terminal;

use std::time::Duration;

use anyhow::Result;
use clap::Parser as _;
use crossterm::event;
use tracing::{debug, info};

use hierview_outline::{OutlineTool, config::OutlineConfig, parser};

use app::App;
use cli::Cli;
use terminal::Tui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_tracing(cli.log_level, cli.log_file.as_deref())?;
    debug!("Parsed CLI arguments: {cli:?}");

    // Read all input before touching the terminal so a missing file fails cleanly
    let source = cli.source();
    let lines = source.read_lines()?;
    info!(source = %source.label(), lines = lines.len(), "input loaded");

    let map = parser::parse(&lines);
    let outline = OutlineTool::new(&map, source.label(), OutlineConfig::from(&cli));
    drop(map);
    let mut app = App::new(outline);

    let (mut terminal, _guard) = terminal::setup_terminal(&app.title())?;

    // Main event loop; the guard restores the terminal on every exit path
    run_app(&mut terminal, &mut app)
}

fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(TICK_RATE)? {
            let ev = event::read()?;
            app.handle_event(ev);
        }
    }
}
