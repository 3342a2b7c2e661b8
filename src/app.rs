use std::time::Duration;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GameStatsApp {
    state: AppState,
    /// Set in debug mode: how often the data file is checked for changes.
    reload_interval: Option<Duration>,
}

impl GameStatsApp {
    pub fn new(state: AppState, reload_interval: Option<Duration>) -> Self {
        Self {
            state,
            reload_interval,
        }
    }
}

impl eframe::App for GameStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(interval) = self.reload_interval {
            self.state.poll_reload();
            ctx.request_repaint_after(interval);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: selected records ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("records_panel")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.view.is_empty() {
                ui.label("No games match the current selection.");
            }
            ui.columns(2, |columns| {
                plot::area_plot(&mut columns[0], &self.state);
                plot::scatter_plot(&mut columns[1], &self.state);
            });
        });
    }
}
