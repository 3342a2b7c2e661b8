use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Facet};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Game release statistics");
    ui.label("Releases by year, platform, genre and rating.");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No games left after cleaning the dataset.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            year_pickers(ui, state);
            ui.separator();
            facet_checklist(ui, state, Facet::Genre, "Choose genres:");
            facet_checklist(ui, state, Facet::Rating, "Choose ratings:");
        });
}

fn year_pickers(ui: &mut Ui, state: &mut AppState) {
    let from = state.criteria.from_year;
    let till = state.criteria.till_year;

    ui.strong("Years since:");
    let mut picked = None;
    egui::ComboBox::from_id_salt("start_year")
        .selected_text(from.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &state.start_year_options {
                if ui.selectable_label(year == from, year.to_string()).clicked() {
                    picked = Some(year);
                }
            }
        });
    if let Some(year) = picked.filter(|&y| y != from) {
        state.set_from_year(year);
    }

    ui.strong("Years until:");
    let mut picked = None;
    egui::ComboBox::from_id_salt("end_year")
        .selected_text(till.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &state.end_year_options {
                if ui.selectable_label(year == till, year.to_string()).clicked() {
                    picked = Some(year);
                }
            }
        });
    if let Some(year) = picked.filter(|&y| y != till) {
        state.set_till_year(year);
    }
}

fn facet_checklist(ui: &mut Ui, state: &mut AppState, facet: Facet, title: &str) {
    let values = state.facet_values(facet).to_vec();
    let n_selected = values.iter().filter(|v| state.is_selected(facet, v)).count();
    let header_text = format!("{title}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(facet);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(facet);
                }
            });

            for value in &values {
                let mut text = RichText::new(value);
                if facet == Facet::Genre {
                    text = text.color(state.genre_colors.color_for(value));
                }
                let mut checked = state.is_selected(facet, value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(facet, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Export view…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "Games selected: {} of {}",
            crate::data::aggregate::count(&state.view),
            state.dataset.len()
        ));

        ui.separator();

        if ui.selectable_label(state.show_table, "Records").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open games dataset")
        .add_filter("Delimited files", &["csv", "tsv"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export selected games")
        .set_file_name("games_selected.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match crate::data::export::export_file(&state.view, &path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
