use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate};
use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::{category_bar_color, category_pie_color, category_polar_color, StationColors};
use crate::data::aggregate::{CategoryCounts, MonthlyPoint, StationCounts, StationPoints, WindCounts};
use crate::data::model::{compass_bearing, AqCategory};

const PLOT_HEIGHT: f32 = 380.0;
/// Arc subdivisions per 90° of sweep.
const ARC_STEPS_PER_QUARTER: f64 = 12.0;

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Point on a compass-style polar plane: angle in degrees clockwise from north.
fn polar_to_xy(r: f64, degrees: f64) -> [f64; 2] {
    let rad = degrees.to_radians();
    [r * rad.sin(), r * rad.cos()]
}

/// Split an annular sector into convex quads (egui only fills convex shapes).
/// With `inner == 0` the quads degenerate into triangles and form a pie slice.
pub fn annular_sector(inner: f64, outer: f64, start_deg: f64, end_deg: f64) -> Vec<[[f64; 2]; 4]> {
    let sweep = end_deg - start_deg;
    if sweep <= 0.0 || outer <= inner {
        return Vec::new();
    }
    let steps = ((sweep / 90.0) * ARC_STEPS_PER_QUARTER).ceil().max(1.0) as usize;
    let step = sweep / steps as f64;
    (0..steps)
        .map(|i| {
            let a0 = start_deg + step * i as f64;
            let a1 = a0 + step;
            [
                polar_to_xy(inner, a0),
                polar_to_xy(outer, a0),
                polar_to_xy(outer, a1),
                polar_to_xy(inner, a1),
            ]
        })
        .collect()
}

/// One pie slice: `(category, start_deg, end_deg)`.
pub type PieSlice = (AqCategory, f64, f64);

/// Slices for the non-zero categories, clockwise from north.
pub fn pie_slices(counts: &CategoryCounts) -> Vec<PieSlice> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|&(c, n)| {
            let end = start + 360.0 * n as f64 / total as f64;
            let slice = (c, start, end);
            start = end;
            slice
        })
        .collect()
}

/// A stacked polar bar segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub category: AqCategory,
    pub direction: String,
    pub inner: f64,
    pub outer: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Centre angle and angular width of every direction.
///
/// Compass labels sit at their bearing; if any label is not a compass point
/// the directions are spread evenly in the given order instead.
pub fn direction_angles(directions: &[String]) -> (Vec<f64>, f64) {
    let bearings: Option<Vec<f64>> = directions.iter().map(|d| compass_bearing(d)).collect();
    match bearings {
        Some(b) if !b.is_empty() => (b, 22.5),
        _ => {
            let n = directions.len().max(1) as f64;
            let width = 360.0 / n;
            ((0..directions.len()).map(|i| i as f64 * width).collect(), width)
        }
    }
}

/// Stack each direction's counts outwards in category order.
pub fn polar_wedges(wind: &[WindCounts]) -> Vec<Wedge> {
    let Some(first) = wind.first() else {
        return Vec::new();
    };
    let directions: Vec<String> = first.by_direction.iter().map(|(d, _)| d.clone()).collect();
    let (angles, width) = direction_angles(&directions);
    let half = width * 0.45;

    let mut radius = vec![0.0f64; directions.len()];
    let mut wedges = Vec::new();
    for row in wind {
        for (d, (dir, count)) in row.by_direction.iter().enumerate() {
            if *count == 0 || d >= radius.len() {
                continue;
            }
            let inner = radius[d];
            let outer = inner + *count as f64;
            radius[d] = outer;
            wedges.push(Wedge {
                category: row.category,
                direction: dir.clone(),
                inner,
                outer,
                start_deg: angles[d] - half,
                end_deg: angles[d] + half,
            });
        }
    }
    wedges
}

fn sector_polygons(
    inner: f64,
    outer: f64,
    start_deg: f64,
    end_deg: f64,
    name: &str,
    color: Color32,
) -> Vec<Polygon> {
    annular_sector(inner, outer, start_deg, end_deg)
        .into_iter()
        .map(|quad| {
            let points: PlotPoints = quad.to_vec().into();
            Polygon::new(points)
                .name(name)
                .fill_color(color)
                .stroke(Stroke::new(1.0, color))
        })
        .collect()
}

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Plot x coordinate of a date: seconds since the Unix epoch.
fn date_x(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) as f64 * 86_400.0
}

fn month_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    DateTime::from_timestamp(mark.value as i64, 0)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Pie chart of the category distribution.
pub fn category_pie(ui: &mut Ui, counts: &CategoryCounts) {
    let slices = pie_slices(counts);
    Plot::new("category_pie")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (category, start, end) in slices {
                let color = category_pie_color(category);
                for polygon in sector_polygons(0.0, 1.0, start, end, category.label(), color) {
                    plot_ui.polygon(polygon);
                }
            }
        });
}

/// Monthly mean line; gaps break the line.
pub fn monthly_line(ui: &mut Ui, points: &[MonthlyPoint], measure_name: &str) {
    let mut segments: Vec<Vec<[f64; 2]>> = vec![Vec::new()];
    for p in points {
        match p.mean {
            Some(v) => {
                if let Some(seg) = segments.last_mut() {
                    seg.push([date_x(p.month_end), v]);
                }
            }
            None => segments.push(Vec::new()),
        }
    }
    let markers: PlotPoints = points
        .iter()
        .filter_map(|p| Some([date_x(p.month_end), p.mean?]))
        .collect();

    Plot::new("monthly_line")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("timestamp")
        .y_axis_label(measure_name)
        .x_axis_formatter(month_label)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for seg in segments.into_iter().filter(|s| !s.is_empty()) {
                let series: PlotPoints = seg.into();
                plot_ui.line(Line::new(series).name(measure_name).width(2.0));
            }
            // Single-month runs have no line segment, so mark every month.
            plot_ui.points(Points::new(markers).name(measure_name).radius(2.5));
        });
}

/// Scatter of two measures, one colour per station.
pub fn station_scatter(
    ui: &mut Ui,
    groups: &[StationPoints],
    colors: &StationColors,
    x_name: &str,
    y_name: &str,
) {
    Plot::new("pollutant_scatter")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(x_name)
        .y_axis_label(y_name)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for group in groups {
                let pts: PlotPoints = group.points.clone().into();
                plot_ui.points(
                    Points::new(pts)
                        .name(&group.station)
                        .color(colors.color_for(&group.station))
                        .radius(2.0),
                );
            }
        });
}

/// Stacked bars: one bar per station, one layer per category.
pub fn station_stacked_bars(ui: &mut Ui, pivot: &[StationCounts]) {
    let names: Vec<String> = pivot.iter().map(|r| r.station.clone()).collect();
    let mut charts: Vec<BarChart> = Vec::with_capacity(AqCategory::ALL.len());
    for category in AqCategory::ALL {
        let bars: Vec<Bar> = pivot
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.counts[category.index()] as f64)
                    .width(0.7)
                    .name(&row.station)
            })
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(category.label())
            .color(category_bar_color(category))
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new("station_bars")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("station")
        .y_axis_label("Count")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            names.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Polar bars of wind direction, stacked by category.
pub fn wind_polar(ui: &mut Ui, wind: &[WindCounts]) {
    let wedges = polar_wedges(wind);
    let max_r = wedges.iter().map(|w| w.outer).fold(0.0f64, f64::max);
    let directions: Vec<String> = wind
        .first()
        .map(|w| w.by_direction.iter().map(|(d, _)| d.clone()).collect())
        .unwrap_or_default();
    let (angles, _) = direction_angles(&directions);

    Plot::new("wind_polar")
        .legend(Legend::default())
        .height(PLOT_HEIGHT + 80.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show(ui, |plot_ui| {
            if max_r > 0.0 {
                // Rings at quarters of the longest bar.
                for k in 1..=4 {
                    let r = max_r * k as f64 / 4.0;
                    let ring: PlotPoints = (0..=72)
                        .map(|i| polar_to_xy(r, i as f64 * 5.0))
                        .collect();
                    plot_ui.line(Line::new(ring).color(Color32::from_gray(120)).width(0.5));
                }
                for (dir, angle) in directions.iter().zip(&angles) {
                    let [x, y] = polar_to_xy(max_r * 1.08, *angle);
                    plot_ui.text(Text::new(PlotPoint::new(x, y), dir.as_str()));
                }
            }
            for w in &wedges {
                let color = category_polar_color(w.category);
                for polygon in sector_polygons(
                    w.inner,
                    w.outer,
                    w.start_deg,
                    w.end_deg,
                    w.category.label(),
                    color,
                ) {
                    plot_ui.polygon(polygon);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wind(rows: &[(AqCategory, &[usize])], dirs: &[&str]) -> Vec<WindCounts> {
        rows.iter()
            .map(|(category, counts)| WindCounts {
                category: *category,
                by_direction: dirs
                    .iter()
                    .map(|d| d.to_string())
                    .zip(counts.iter().copied())
                    .collect(),
            })
            .collect()
    }

    #[test]
    fn pie_slices_cover_full_turn() {
        let counts: CategoryCounts = [
            (AqCategory::Good, 3),
            (AqCategory::Moderate, 0),
            (AqCategory::UnhealthyForSensitiveGroups, 1),
            (AqCategory::Unhealthy, 0),
            (AqCategory::VeryUnhealthy, 0),
            (AqCategory::Hazardous, 4),
        ];
        let slices = pie_slices(&counts);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0], (AqCategory::Good, 0.0, 135.0));
        assert!((slices[2].2 - 360.0).abs() < 1e-9);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].2, pair[1].1);
        }
        assert!(pie_slices(&AqCategory::ALL.map(|c| (c, 0))).is_empty());
    }

    #[test]
    fn sectors_are_split_into_small_quads() {
        let quads = annular_sector(1.0, 2.0, 0.0, 90.0);
        assert_eq!(quads.len(), ARC_STEPS_PER_QUARTER as usize);
        let first = quads[0];
        assert!((first[0][1] - 1.0).abs() < 1e-9);
        assert!((first[1][1] - 2.0).abs() < 1e-9);
        let last = quads[quads.len() - 1];
        assert!((last[2][0] - 2.0).abs() < 1e-9);
        assert!(annular_sector(2.0, 1.0, 0.0, 90.0).is_empty());
        assert!(annular_sector(0.0, 1.0, 10.0, 10.0).is_empty());
    }

    #[test]
    fn wedges_stack_without_overlap() {
        let data = wind(
            &[
                (AqCategory::Good, &[2, 0, 1]),
                (AqCategory::Moderate, &[3, 4, 0]),
                (AqCategory::Hazardous, &[1, 0, 0]),
            ],
            &["N", "E", "S"],
        );
        let wedges = polar_wedges(&data);
        assert_eq!(wedges.len(), 5);

        let north: Vec<&Wedge> = wedges.iter().filter(|w| w.direction == "N").collect();
        assert_eq!(north.len(), 3);
        assert_eq!((north[0].inner, north[0].outer), (0.0, 2.0));
        assert_eq!((north[1].inner, north[1].outer), (2.0, 5.0));
        assert_eq!((north[2].inner, north[2].outer), (5.0, 6.0));
        assert_eq!(north[2].category, AqCategory::Hazardous);

        let east = wedges.iter().find(|w| w.direction == "E").unwrap();
        assert_eq!((east.inner, east.outer), (0.0, 4.0));
        assert!(((east.start_deg + east.end_deg) / 2.0 - 90.0).abs() < 1e-9);
    }

    #[test]
    fn dates_map_to_unix_seconds() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(date_x(d), 86_400.0);
        let d = NaiveDate::from_ymd_opt(2013, 3, 31).unwrap();
        assert_eq!(date_x(d), 1_364_688_000.0);
    }

    #[test]
    fn unknown_directions_are_spread_evenly() {
        let dirs: Vec<String> = ["N", "calm", "S", "W"].iter().map(|s| s.to_string()).collect();
        let (angles, width) = direction_angles(&dirs);
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
        assert_eq!(width, 90.0);

        let compass: Vec<String> = ["N", "SW"].iter().map(|s| s.to_string()).collect();
        assert_eq!(direction_angles(&compass), (vec![0.0, 225.0], 22.5));
    }
}
