use std::collections::BTreeSet;

use chrono::{NaiveDate, Timelike};

use super::model::{AirQualityDataset, AqCategory, Observation};

// ---------------------------------------------------------------------------
// Filter selection: the side-panel state
// ---------------------------------------------------------------------------

/// Which stations are selected.
///
/// `all` stands for the "All Stations" entry; while it is set the explicit
/// set is ignored and every station passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSelection {
    pub all: bool,
    pub stations: BTreeSet<String>,
}

impl Default for StationSelection {
    fn default() -> Self {
        Self {
            all: true,
            stations: BTreeSet::new(),
        }
    }
}

impl StationSelection {
    pub fn allows(&self, station: &str) -> bool {
        self.all || self.stations.contains(station)
    }

    /// Stations the selection expands to, in dataset order.
    pub fn expand<'a>(&self, dataset: &'a AirQualityDataset) -> Vec<&'a str> {
        dataset
            .stations
            .iter()
            .map(String::as_str)
            .filter(|s| self.allows(s))
            .collect()
    }
}

/// The full user selection. `category: None` is "All Categories".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub stations: StationSelection,
    pub category: Option<AqCategory>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::spanning(NaiveDate::MIN, NaiveDate::MAX)
    }
}

impl FilterSelection {
    /// Selection that passes every row of `dataset`.
    pub fn all(dataset: &AirQualityDataset) -> Self {
        match dataset.date_span {
            Some((start, end)) => Self::spanning(start, end),
            None => Self::default(),
        }
    }

    fn spanning(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            stations: StationSelection::default(),
            category: None,
            start_date,
            end_date,
            start_hour: 0,
            end_hour: 23,
        }
    }

    /// Whether a single row passes. Date and hour bounds are inclusive.
    pub fn matches(&self, obs: &Observation) -> bool {
        let date = obs.timestamp.date();
        let hour = obs.timestamp.hour();
        self.stations.allows(&obs.station)
            && self.category.is_none_or(|c| c == obs.category)
            && self.start_date <= date
            && date <= self.end_date
            && self.start_hour <= hour
            && hour <= self.end_hour
    }
}

/// Return indices of observations that pass the selection, in file order.
pub fn filtered_indices(dataset: &AirQualityDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| selection.matches(obs))
        .map(|(i, _)| i)
        .collect()
}
