use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Number of pollutant columns at the front of the table.
pub const POLLUTANT_COUNT: usize = 6;
/// Number of weather columns (positions 6..10 plus 11).
pub const WEATHER_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// AqCategory – the precomputed air-quality label
// ---------------------------------------------------------------------------

/// Air-quality severity, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AqCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqCategory {
    /// All categories in canonical severity order.
    pub const ALL: [AqCategory; 6] = [
        AqCategory::Good,
        AqCategory::Moderate,
        AqCategory::UnhealthyForSensitiveGroups,
        AqCategory::Unhealthy,
        AqCategory::VeryUnhealthy,
        AqCategory::Hazardous,
    ];

    /// The label as it appears in the `Category` column.
    pub fn label(self) -> &'static str {
        match self {
            AqCategory::Good => "Good",
            AqCategory::Moderate => "Moderate",
            AqCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqCategory::Unhealthy => "Unhealthy",
            AqCategory::VeryUnhealthy => "Very Unhealthy",
            AqCategory::Hazardous => "Hazardous",
        }
    }

    /// Parse a `Category` cell. Surrounding whitespace is ignored.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|c| c.label() == s)
    }

    /// Position in [`AqCategory::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AqCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Wind direction ordering
// ---------------------------------------------------------------------------

/// The sixteen compass points, clockwise from north.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Bearing in degrees for a compass label, if it is one of [`COMPASS_POINTS`].
pub fn compass_bearing(label: &str) -> Option<f64> {
    COMPASS_POINTS
        .iter()
        .position(|p| *p == label)
        .map(|i| i as f64 * 22.5)
}

/// Sort wind direction labels: compass points clockwise, then unknowns lexically.
fn sort_wind_directions(dirs: BTreeSet<String>) -> Vec<String> {
    let mut out: Vec<String> = dirs.into_iter().collect();
    out.sort_by(|a, b| {
        let ka = COMPASS_POINTS.iter().position(|p| p == a).unwrap_or(usize::MAX);
        let kb = COMPASS_POINTS.iter().position(|p| p == b).unwrap_or(usize::MAX);
        ka.cmp(&kb).then_with(|| a.cmp(b))
    });
    out
}

// ---------------------------------------------------------------------------
// Measure – a numeric column selector
// ---------------------------------------------------------------------------

/// A numeric column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Pollutant(usize),
    Weather(usize),
}

// ---------------------------------------------------------------------------
// Observation – one row of the CSV
// ---------------------------------------------------------------------------

/// One hourly observation at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Pollutant readings in header order; `None` where the cell was missing.
    pub pollutants: [Option<f64>; POLLUTANT_COUNT],
    /// Weather readings in header order; `None` where the cell was missing.
    pub weather: [Option<f64>; WEATHER_COUNT],
    /// Wind direction label; `None` where the cell was missing.
    pub wind_direction: Option<String>,
    pub station: String,
    pub timestamp: NaiveDateTime,
    pub category: AqCategory,
}

impl Observation {
    /// Value of a numeric column for this row.
    pub fn value(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Pollutant(i) => self.pollutants.get(i).copied().flatten(),
            Measure::Weather(i) => self.weather.get(i).copied().flatten(),
        }
    }
}

// ---------------------------------------------------------------------------
// AirQualityDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Column names taken from the file header.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNames {
    pub pollutants: [String; POLLUTANT_COUNT],
    pub weather: [String; WEATHER_COUNT],
    pub wind_direction: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            pollutants: ["PM2.5", "PM10", "SO2", "NO2", "CO", "O3"].map(String::from),
            weather: ["TEMP", "PRES", "DEWP", "RAIN", "WSPM"].map(String::from),
            wind_direction: "wd".to_string(),
        }
    }
}

/// The full parsed dataset with pre-computed indices.
#[derive(Debug, Clone)]
pub struct AirQualityDataset {
    /// All observations in file order.
    pub observations: Vec<Observation>,
    pub columns: ColumnNames,
    /// Stations in order of first appearance.
    pub stations: Vec<String>,
    /// Categories that occur, in severity order.
    pub categories: Vec<AqCategory>,
    /// Wind directions that occur, in compass order.
    pub wind_directions: Vec<String>,
    /// Earliest and latest observation date; `None` for an empty table.
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl AirQualityDataset {
    /// Build indices from the loaded observations.
    pub fn new(columns: ColumnNames, observations: Vec<Observation>) -> Self {
        let mut stations: Vec<String> = Vec::new();
        let mut seen_stations: BTreeSet<&str> = BTreeSet::new();
        let mut categories: BTreeSet<AqCategory> = BTreeSet::new();
        let mut directions: BTreeSet<String> = BTreeSet::new();
        let mut date_span: Option<(NaiveDate, NaiveDate)> = None;

        for obs in &observations {
            if seen_stations.insert(obs.station.as_str()) {
                stations.push(obs.station.clone());
            }
            categories.insert(obs.category);
            if let Some(wd) = &obs.wind_direction {
                if !directions.contains(wd) {
                    directions.insert(wd.clone());
                }
            }
            let date = obs.timestamp.date();
            date_span = Some(match date_span {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }

        AirQualityDataset {
            columns,
            stations,
            categories: categories.into_iter().collect(),
            wind_directions: sort_wind_directions(directions),
            date_span,
            observations,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Every selectable measure: pollutants first, then weather factors.
    pub fn measures(&self) -> Vec<Measure> {
        (0..POLLUTANT_COUNT)
            .map(Measure::Pollutant)
            .chain((0..WEATHER_COUNT).map(Measure::Weather))
            .collect()
    }

    /// Header name of a measure.
    pub fn measure_name(&self, measure: Measure) -> &str {
        match measure {
            Measure::Pollutant(i) => self.columns.pollutants.get(i),
            Measure::Weather(i) => self.columns.weather.get(i),
        }
        .map(String::as_str)
        .unwrap_or("?")
    }

    /// Position of a station in [`AirQualityDataset::stations`].
    pub fn station_index(&self, station: &str) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an observation at `YYYY-MM-DD HH:00` with a single PM2.5 reading.
    /// An empty `wd` means the wind direction is missing.
    pub(crate) fn obs(
        station: &str,
        date: (i32, u32, u32),
        hour: u32,
        category: AqCategory,
        pm25: Option<f64>,
        wd: &str,
    ) -> Observation {
        let timestamp = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid test timestamp");
        let mut pollutants = [None; POLLUTANT_COUNT];
        pollutants[0] = pm25;
        pollutants[1] = pm25.map(|v| v * 2.0);
        Observation {
            pollutants,
            weather: [Some(10.0), Some(1010.0), Some(-5.0), Some(0.0), Some(2.5)],
            wind_direction: (!wd.is_empty()).then(|| wd.to_string()),
            station: station.to_string(),
            timestamp,
            category,
        }
    }

    #[test]
    fn category_labels_round_trip_and_order() {
        for c in AqCategory::ALL {
            assert_eq!(AqCategory::from_label(c.label()), Some(c));
        }
        assert_eq!(
            AqCategory::from_label(" Unhealthy for Sensitive Groups "),
            Some(AqCategory::UnhealthyForSensitiveGroups)
        );
        assert_eq!(AqCategory::from_label("Severe"), None);
        assert!(AqCategory::Good < AqCategory::Hazardous);
        assert_eq!(AqCategory::VeryUnhealthy.index(), 4);
    }

    #[test]
    fn dataset_indices() {
        let ds = AirQualityDataset::new(
            ColumnNames::default(),
            vec![
                obs("Dongsi", (2013, 3, 2), 5, AqCategory::Unhealthy, Some(80.0), "NW"),
                obs("Aotizhongxin", (2013, 3, 1), 0, AqCategory::Good, Some(5.0), "N"),
                obs("Dongsi", (2014, 1, 9), 23, AqCategory::Good, None, "calm"),
                obs("Tiantan", (2013, 5, 1), 12, AqCategory::Good, Some(9.0), "E"),
                obs("Tiantan", (2013, 5, 1), 13, AqCategory::Good, Some(9.0), ""),
            ],
        );

        assert_eq!(ds.stations, vec!["Dongsi", "Aotizhongxin", "Tiantan"]);
        assert_eq!(ds.categories, vec![AqCategory::Good, AqCategory::Unhealthy]);
        assert_eq!(ds.wind_directions, vec!["N", "E", "NW", "calm"]);
        assert_eq!(
            ds.date_span,
            Some((
                NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2014, 1, 9).unwrap()
            ))
        );
        assert_eq!(ds.station_index("Tiantan"), Some(2));
        assert_eq!(ds.measure_name(Measure::Weather(4)), "WSPM");
        assert_eq!(ds.measures().len(), POLLUTANT_COUNT + WEATHER_COUNT);
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = AirQualityDataset::new(ColumnNames::default(), Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.date_span, None);
    }

    #[test]
    fn compass_bearings() {
        assert_eq!(compass_bearing("N"), Some(0.0));
        assert_eq!(compass_bearing("E"), Some(90.0));
        assert_eq!(compass_bearing("NNW"), Some(337.5));
        assert_eq!(compass_bearing("calm"), None);
    }
}
