//! tui-blocks - terminal demo of a sortable data table and text inputs.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use tui_blocks::app::App;
use tui_blocks::cli::Cli;
use tui_blocks::config::Config;
use tui_blocks::data::{load_records, sample_records};
use tui_blocks::error::AppError;
use tui_blocks::events::EventHandler;
use tui_blocks::tui::{self, Tui};
use tui_blocks::ui::{init_theme, load_theme};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = tui_blocks::logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let config_result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = config_result.unwrap_or_else(|e| {
        let err = AppError::from(e);
        warn!(error = %err, "Failed to load config, using defaults");
        if let Some(action) = err.suggested_action() {
            eprintln!("{} {}", err.user_message(), action);
        }
        Config::default()
    });
    if let Some(mode) = cli.selection {
        config.settings.selection_mode = mode;
    }

    init_theme(load_theme(&config.settings.theme));

    let records = match &cli.data {
        Some(path) => load_records(path).map_err(|e| {
            error!(error = %e, path = %path.display(), "Failed to load data");
            let hint = e.suggested_action().unwrap_or_default();
            anyhow::anyhow!("{}: {} {}", path.display(), e.user_message(), hint)
        })?,
        None => sample_records(),
    };
    info!(rows = records.len(), "Records ready");

    let mut app = App::new(records, &config.settings);
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);

    let mut terminal = tui::init().context("failed to set up terminal")?;
    let result = run(&mut terminal, &mut app, &events);
    let restored = tui::restore(&mut terminal);

    tui_blocks::logging::shutdown();
    result?;
    restored.context("failed to restore terminal")?;
    Ok(())
}

fn run(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }
    Ok(())
}
