use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{AqCategory, Measure};
use crate::state::{AppState, Tab, EMPTY_MESSAGE};
use crate::ui::plot;

pub const TITLE: &str = "Air Quality Analysis Dashboard (2013 - 2017) for Beijing Stations";

// ---------------------------------------------------------------------------
// Central panel: title, tab bar and the active tab
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(TITLE);

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data file to begin  (File → Open…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });
    ui.separator();

    let tab = state.tab;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match tab {
            Tab::KeyMetrics => key_metrics(ui, state),
            Tab::TimeSeries => time_series(ui, state),
            Tab::Correlation => correlation(ui, state),
            Tab::ByStation => by_station(ui, state),
        });
}

fn empty_message(ui: &mut Ui) {
    ui.label(RichText::new(EMPTY_MESSAGE).italics());
}

/// `(measure, header name)` for every numeric column.
fn measure_options(state: &AppState) -> Vec<(Measure, String)> {
    state
        .dataset
        .as_ref()
        .map(|ds| {
            ds.measures()
                .into_iter()
                .map(|m| (m, ds.measure_name(m).to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn measure_combo(ui: &mut Ui, label: &str, options: &[(Measure, String)], value: &mut Measure) {
    let current = options
        .iter()
        .find(|(m, _)| *m == *value)
        .map(|(_, n)| n.as_str())
        .unwrap_or("");
    egui::ComboBox::from_label(label)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for (m, name) in options {
                ui.selectable_value(value, *m, name);
            }
        });
}

fn measure_name(options: &[(Measure, String)], measure: Measure) -> String {
    options
        .iter()
        .find(|(m, _)| *m == measure)
        .map(|(_, n)| n.clone())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

fn key_metrics(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new(format!("Metrics for {}", state.selection_label())).strong());
    ui.add_space(6.0);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (category, count) in state.views.category_counts {
            metric_card(ui, category, count, state.count_delta(category));
        }
    });
    ui.add_space(8.0);

    ui.strong("Distribution of Air Quality Categories");
    if state.visible_indices.is_empty() {
        empty_message(ui);
    } else {
        plot::category_pie(ui, &state.views.category_counts);
    }
}

fn metric_card(ui: &mut Ui, category: AqCategory, count: usize, delta: i64) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(150.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(category.label());
            ui.label(RichText::new(format!("{count} Days")).size(22.0).strong());
            let color = match delta {
                d if d > 0 => Color32::from_rgb(0x21, 0xc3, 0x54),
                d if d < 0 => Color32::from_rgb(0xff, 0x4b, 0x4b),
                _ => Color32::GRAY,
            };
            ui.label(RichText::new(format!("{delta:+} from previous")).color(color));
        });
    });
}

fn time_series(ui: &mut Ui, state: &mut AppState) {
    let options = measure_options(state);
    let mut measure = state.time_series_measure;
    measure_combo(ui, "Select a Pollutant", &options, &mut measure);
    state.set_time_series_measure(measure);

    if state.visible_indices.is_empty() {
        empty_message(ui);
        return;
    }
    let name = measure_name(&options, measure);
    ui.strong(format!("Monthly Average of {name}"));
    plot::monthly_line(ui, &state.views.monthly, &name);
}

fn correlation(ui: &mut Ui, state: &mut AppState) {
    let options = measure_options(state);
    let (mut x, mut y) = (state.scatter_x, state.scatter_y);
    ui.horizontal(|ui: &mut Ui| {
        measure_combo(ui, "Select Pollutant X-Axis", &options, &mut x);
        measure_combo(ui, "Select Pollutant Y-Axis", &options, &mut y);
    });
    state.set_scatter_axes(x, y);

    let (x_name, y_name) = (measure_name(&options, x), measure_name(&options, y));
    ui.strong(format!("Correlation between {x_name} and {y_name}"));
    if state.views.scatter.is_empty() {
        empty_message(ui);
        return;
    }
    plot::station_scatter(ui, &state.views.scatter, &state.station_colors, &x_name, &y_name);
}

fn by_station(ui: &mut Ui, state: &mut AppState) {
    if state.visible_indices.is_empty() {
        empty_message(ui);
        return;
    }
    ui.strong("Station-wise Air Quality Distribution");
    plot::station_stacked_bars(ui, &state.views.pivot);
    ui.add_space(12.0);

    ui.strong("Wind Direction and Air Quality Category Distribution");
    plot::wind_polar(ui, &state.views.wind);
}
