use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Name",
    "Platform",
    "Year",
    "Genre",
    "Rating",
    "Critic",
    "User",
    "Games released",
];

/// Table of the currently selected records.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.dataset.records();
    let rows = state.view.rows();
    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto(), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let view_row = rows[row.index()];
                let record = &records[view_row.index];
                let cells = [
                    record.name.clone(),
                    record.platform.clone(),
                    record.year_of_release.to_string(),
                    record.genre.clone(),
                    record.rating.clone(),
                    format!("{:.0}", record.critic_score),
                    format!("{:.1}", record.user_score),
                    view_row.games_released.to_string(),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
