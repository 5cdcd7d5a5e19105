use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::AqCategory;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Edit a copy; the state refilters only if something changed.
    let mut selection = state.selection.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Stations (multiselect with "All Stations") ----
            let n_selected = if selection.stations.all {
                dataset.stations.len()
            } else {
                selection.stations.stations.len()
            };
            let header_text = format!(
                "Select Stations  ({n_selected}/{})",
                dataset.stations.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("stations")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.checkbox(&mut selection.stations.all, "All Stations");
                    ui.add_enabled_ui(!selection.stations.all, |ui: &mut Ui| {
                        for station in &dataset.stations {
                            let mut checked = selection.stations.stations.contains(station);
                            if ui.checkbox(&mut checked, station).changed() {
                                if checked {
                                    selection.stations.stations.insert(station.clone());
                                } else {
                                    selection.stations.stations.remove(station);
                                }
                            }
                        }
                    });
                });
            ui.separator();

            // ---- Category ----
            ui.strong("Select AQ Category");
            let current = selection
                .category
                .map(AqCategory::label)
                .unwrap_or("All Categories");
            egui::ComboBox::from_id_salt("aq_category")
                .selected_text(current)
                .width(ui.available_width() * 0.9)
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut selection.category, None, "All Categories");
                    for &category in &dataset.categories {
                        ui.selectable_value(
                            &mut selection.category,
                            Some(category),
                            category.label(),
                        );
                    }
                });
            ui.separator();

            // ---- Date range ----
            if dataset.date_span.is_some() {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Start Date");
                    ui.add(DatePickerButton::new(&mut selection.start_date).id_salt("start_date"));
                });
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("End Date");
                    ui.add(DatePickerButton::new(&mut selection.end_date).id_salt("end_date"));
                });
                ui.separator();
            }

            // ---- Hour range ----
            ui.add(egui::Slider::new(&mut selection.start_hour, 0..=23).text("Start Hour"));
            ui.add(egui::Slider::new(&mut selection.end_hour, 0..=23).text("End Hour"));
        });

    state.set_selection(selection);
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air quality data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` into the state; on failure the previous dataset stays active.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} observations from {} stations ({})",
                dataset.len(),
                dataset.stations.len(),
                path.display()
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut state = AppState::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        load_into(&mut state, &path);
        assert!(state.dataset.is_none());
        let msg = state.status_message.clone().unwrap();
        assert!(msg.starts_with("Error:"));
        assert!(msg.contains("expected at least 12 columns"));
    }

    #[test]
    fn successful_load_clears_status() {
        let mut state = AppState {
            status_message: Some("Error: old".to_string()),
            ..AppState::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.csv");
        std::fs::write(
            &path,
            "PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,timestamp,Category\n\
             4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin,2013-03-01 00:00:00,Good\n",
        )
        .unwrap();

        load_into(&mut state, &path);
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));
        assert_eq!(state.status_message, None);
        assert_eq!(state.visible_indices, vec![0]);
    }
}
