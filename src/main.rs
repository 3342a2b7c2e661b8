mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::GameStatsApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::{AppState, DataSource};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        // Parse environment variables after configuring the default level.
        .parse_default_env()
        .init();

    // A dataset that fails to load is fatal; no window is opened.
    let dataset = data::loader::load_file(&config.data)
        .inspect_err(|err| log::error!("Failed to load dataset: {err}"))
        .with_context(|| format!("loading dataset from {}", config.data.display()))?;
    let source = DataSource::new(&config.data);
    if config.debug {
        log::debug!("Watching {} for changes", config.data.display());
    }
    let state = AppState::new(dataset, Some(source));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let reload_interval = config.reload_interval();
    eframe::run_native(
        "Game release statistics",
        options,
        Box::new(move |_cc| Ok(Box::new(GameStatsApp::new(state, reload_interval)))),
    )
    .map_err(|err| anyhow!("running dashboard: {err}"))
}
