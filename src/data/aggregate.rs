use chrono::{Datelike, NaiveDate};

use super::model::{AirQualityDataset, AqCategory, Measure};

/// Row counts per category, always all six in severity order.
pub type CategoryCounts = [(AqCategory, usize); 6];

/// `value_counts` reindexed to every category, missing ones filled with 0.
pub fn category_counts(dataset: &AirQualityDataset, indices: &[usize]) -> CategoryCounts {
    let mut counts = AqCategory::ALL.map(|c| (c, 0usize));
    for &i in indices {
        counts[dataset.observations[i].category.index()].1 += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Monthly resampling
// ---------------------------------------------------------------------------

/// One calendar-month bucket of a measure.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    /// Last day of the month, used as the bucket label.
    pub month_end: NaiveDate,
    /// Mean of the present values, `None` when the month has none.
    pub mean: Option<f64>,
}

fn month_key(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_end(key: i32) -> Option<NaiveDate> {
    let (year, month0) = (key.div_euclid(12), key.rem_euclid(12) as u32);
    let next_first = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    next_first.and_then(|d| d.pred_opt())
}

/// Resample `measure` to month-end buckets covering every month between the
/// first and last filtered observation, including months with no rows.
pub fn monthly_means(
    dataset: &AirQualityDataset,
    indices: &[usize],
    measure: Measure,
) -> Vec<MonthlyPoint> {
    let keys = indices
        .iter()
        .map(|&i| month_key(dataset.observations[i].timestamp.date()));
    let (Some(first), Some(last)) = (keys.clone().min(), keys.max()) else {
        return Vec::new();
    };

    let span = (last - first + 1) as usize;
    let mut sums = vec![(0.0f64, 0usize); span];
    for &i in indices {
        let obs = &dataset.observations[i];
        if let Some(v) = obs.value(measure).filter(|v| v.is_finite()) {
            let slot = &mut sums[(month_key(obs.timestamp.date()) - first) as usize];
            slot.0 += v;
            slot.1 += 1;
        }
    }

    sums.into_iter()
        .enumerate()
        .filter_map(|(offset, (sum, n))| {
            let month_end = month_end(first + offset as i32)?;
            let mean = (n > 0).then(|| sum / n as f64);
            Some(MonthlyPoint { month_end, mean })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pivots
// ---------------------------------------------------------------------------

/// Category counts for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCounts {
    pub station: String,
    /// Indexed by [`AqCategory::index`].
    pub counts: [usize; 6],
}

/// Station × category row counts, rows in dataset station order.
/// Stations without any filtered row are left out.
pub fn station_category_pivot(dataset: &AirQualityDataset, indices: &[usize]) -> Vec<StationCounts> {
    let mut table = vec![[0usize; 6]; dataset.stations.len()];
    let mut present = vec![false; dataset.stations.len()];
    for &i in indices {
        let obs = &dataset.observations[i];
        if let Some(s) = dataset.station_index(&obs.station) {
            table[s][obs.category.index()] += 1;
            present[s] = true;
        }
    }

    dataset
        .stations
        .iter()
        .zip(table)
        .zip(present)
        .filter(|(_, p)| *p)
        .map(|((station, counts), _)| StationCounts {
            station: station.clone(),
            counts,
        })
        .collect()
}

/// Counts per wind direction for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct WindCounts {
    pub category: AqCategory,
    /// `(direction, count)` in the dataset's compass order.
    pub by_direction: Vec<(String, usize)>,
}

/// Wind direction × category counts, one entry per category in severity order.
/// Rows without a wind direction are not counted.
pub fn wind_direction_counts(dataset: &AirQualityDataset, indices: &[usize]) -> Vec<WindCounts> {
    let dirs = &dataset.wind_directions;
    let mut table = vec![vec![0usize; dirs.len()]; AqCategory::ALL.len()];
    for &i in indices {
        let obs = &dataset.observations[i];
        let Some(wd) = &obs.wind_direction else {
            continue;
        };
        if let Some(d) = dirs.iter().position(|d| d == wd) {
            table[obs.category.index()][d] += 1;
        }
    }

    AqCategory::ALL
        .into_iter()
        .zip(table)
        .map(|(category, row)| WindCounts {
            category,
            by_direction: dirs.iter().cloned().zip(row).collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Scatter points for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPoints {
    pub station: String,
    pub points: Vec<[f64; 2]>,
}

/// `(x, y)` pairs grouped by station; rows missing either value are skipped.
pub fn scatter_by_station(
    dataset: &AirQualityDataset,
    indices: &[usize],
    x: Measure,
    y: Measure,
) -> Vec<StationPoints> {
    let mut groups: Vec<Vec<[f64; 2]>> = vec![Vec::new(); dataset.stations.len()];
    for &i in indices {
        let obs = &dataset.observations[i];
        let (Some(xv), Some(yv)) = (obs.value(x), obs.value(y)) else {
            continue;
        };
        if let Some(s) = dataset.station_index(&obs.station) {
            groups[s].push([xv, yv]);
        }
    }

    dataset
        .stations
        .iter()
        .zip(groups)
        .filter(|(_, pts)| !pts.is_empty())
        .map(|(station, points)| StationPoints {
            station: station.clone(),
            points,
        })
        .collect()
}
