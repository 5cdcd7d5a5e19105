use crate::color::StationColors;
use crate::data::aggregate::{
    category_counts, monthly_means, scatter_by_station, station_category_pivot,
    wind_direction_counts, CategoryCounts, MonthlyPoint, StationCounts, StationPoints, WindCounts,
};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{AirQualityDataset, AqCategory, Measure};

/// Message shown wherever the filtered table is empty.
pub const EMPTY_MESSAGE: &str = "No data available for the selected filters.";

/// The four dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    KeyMetrics,
    TimeSeries,
    Correlation,
    ByStation,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::KeyMetrics, Tab::TimeSeries, Tab::Correlation, Tab::ByStation];

    pub fn title(self) -> &'static str {
        match self {
            Tab::KeyMetrics => "Key Metrics",
            Tab::TimeSeries => "Time Series Analysis",
            Tab::Correlation => "Pollutant Correlation",
            Tab::ByStation => "Air Quality by Station",
        }
    }
}

/// Aggregates derived from the filtered rows (cached between frames).
#[derive(Debug, Clone)]
pub struct DerivedViews {
    pub category_counts: CategoryCounts,
    /// Counts before the most recent selection change, for the metric deltas.
    pub previous_counts: Option<CategoryCounts>,
    pub monthly: Vec<MonthlyPoint>,
    pub scatter: Vec<StationPoints>,
    pub pivot: Vec<StationCounts>,
    pub wind: Vec<WindCounts>,
}

impl Default for DerivedViews {
    fn default() -> Self {
        Self {
            category_counts: AqCategory::ALL.map(|c| (c, 0)),
            previous_counts: None,
            monthly: Vec::new(),
            scatter: Vec::new(),
            pivot: Vec::new(),
            wind: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<AirQualityDataset>,

    /// Current side-panel selection.
    pub selection: FilterSelection,

    /// Indices of observations passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    pub views: DerivedViews,

    pub tab: Tab,
    pub time_series_measure: Measure,
    pub scatter_x: Measure,
    pub scatter_y: Measure,

    pub station_colors: StationColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            views: DerivedViews::default(),
            tab: Tab::default(),
            time_series_measure: Measure::Pollutant(0),
            scatter_x: Measure::Pollutant(0),
            scatter_y: Measure::Pollutant(1),
            station_colors: StationColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the selection to show everything.
    pub fn set_dataset(&mut self, dataset: AirQualityDataset) {
        self.selection = FilterSelection::all(&dataset);
        self.station_colors = StationColors::new(&dataset.stations);
        self.views.previous_counts = None;

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Replace the selection; a no-op if nothing changed.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        self.views.previous_counts = Some(self.views.category_counts);
        self.refilter();
    }

    /// Recompute `visible_indices` and every derived view.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.selection);
        log::debug!(
            "Filter matched {} of {} observations",
            self.visible_indices.len(),
            ds.len()
        );

        let idx = &self.visible_indices;
        self.views.category_counts = category_counts(ds, idx);
        self.views.pivot = station_category_pivot(ds, idx);
        self.views.wind = wind_direction_counts(ds, idx);
        self.recompute_measures();
    }

    /// Recompute the views that depend on the measure selectors.
    pub fn recompute_measures(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let idx = &self.visible_indices;
        self.views.monthly = monthly_means(ds, idx, self.time_series_measure);
        self.views.scatter = scatter_by_station(ds, idx, self.scatter_x, self.scatter_y);
    }

    pub fn set_time_series_measure(&mut self, measure: Measure) {
        if measure != self.time_series_measure {
            self.time_series_measure = measure;
            self.recompute_measures();
        }
    }

    pub fn set_scatter_axes(&mut self, x: Measure, y: Measure) {
        if (x, y) != (self.scatter_x, self.scatter_y) {
            self.scatter_x = x;
            self.scatter_y = y;
            self.recompute_measures();
        }
    }

    /// Heading text for the metrics tab: "{stations} - {category}".
    pub fn selection_label(&self) -> String {
        let stations = match &self.dataset {
            Some(ds) => self.selection.stations.expand(ds).join(", "),
            None => String::new(),
        };
        let category = self
            .selection
            .category
            .map(AqCategory::label)
            .unwrap_or("All Categories");
        format!("{stations} - {category}")
    }

    /// Change of each category count since the previous selection.
    pub fn count_delta(&self, category: AqCategory) -> i64 {
        let now = self.views.category_counts[category.index()].1 as i64;
        let before = self
            .views
            .previous_counts
            .map(|p| p[category.index()].1 as i64)
            .unwrap_or(now);
        now - before
    }
}
