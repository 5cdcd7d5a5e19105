use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::AqCategory;

// ---------------------------------------------------------------------------
// Fixed palettes
// ---------------------------------------------------------------------------

/// Qualitative "Set3" palette, used for the station-wise stacked bars.
pub const SET3: [Color32; 12] = [
    Color32::from_rgb(0x8d, 0xd3, 0xc7),
    Color32::from_rgb(0xff, 0xff, 0xb3),
    Color32::from_rgb(0xbe, 0xba, 0xda),
    Color32::from_rgb(0xfb, 0x80, 0x72),
    Color32::from_rgb(0x80, 0xb1, 0xd3),
    Color32::from_rgb(0xfd, 0xb4, 0x62),
    Color32::from_rgb(0xb3, 0xde, 0x69),
    Color32::from_rgb(0xfc, 0xcd, 0xe5),
    Color32::from_rgb(0xd9, 0xd9, 0xd9),
    Color32::from_rgb(0xbc, 0x80, 0xbd),
    Color32::from_rgb(0xcc, 0xeb, 0xc5),
    Color32::from_rgb(0xff, 0xed, 0x6f),
];

/// Reversed "Blues" sequential scale, darkest first.
pub const BLUES_R: [Color32; 9] = [
    Color32::from_rgb(8, 48, 107),
    Color32::from_rgb(8, 81, 156),
    Color32::from_rgb(33, 113, 181),
    Color32::from_rgb(66, 146, 198),
    Color32::from_rgb(107, 174, 214),
    Color32::from_rgb(158, 202, 225),
    Color32::from_rgb(198, 219, 239),
    Color32::from_rgb(222, 235, 247),
    Color32::from_rgb(247, 251, 255),
];

/// Default qualitative sequence for the category pie.
pub const PIE: [Color32; 6] = [
    Color32::from_rgb(0x63, 0x6e, 0xfa),
    Color32::from_rgb(0xef, 0x55, 0x3b),
    Color32::from_rgb(0x00, 0xcc, 0x96),
    Color32::from_rgb(0xab, 0x63, 0xfa),
    Color32::from_rgb(0xff, 0xa1, 0x5a),
    Color32::from_rgb(0x19, 0xd3, 0xf3),
];

/// Colour of a category in the stacked bar chart.
pub fn category_bar_color(category: AqCategory) -> Color32 {
    SET3[category.index() % SET3.len()]
}

/// Colour of a category in the polar chart.
pub fn category_polar_color(category: AqCategory) -> Color32 {
    BLUES_R[category.index()]
}

/// Colour of a category in the pie chart.
pub fn category_pie_color(category: AqCategory) -> Color32 {
    PIE[category.index()]
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Station colours for the scatter plot
// ---------------------------------------------------------------------------

/// Maps every station of the dataset to a distinct colour.
#[derive(Debug, Clone, Default)]
pub struct StationColors {
    mapping: BTreeMap<String, Color32>,
}

impl StationColors {
    /// Assign hues in dataset station order so colours stay put while filtering.
    pub fn new(stations: &[String]) -> Self {
        let mapping = stations
            .iter()
            .cloned()
            .zip(generate_palette(stations.len()))
            .collect();
        Self { mapping }
    }

    /// Look up the colour for a station.
    pub fn color_for(&self, station: &str) -> Color32 {
        self.mapping
            .get(station)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(12);
        assert_eq!(p.len(), 12);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn station_colors_fall_back_to_gray() {
        let stations = vec!["Dongsi".to_string(), "Wanliu".to_string()];
        let colors = StationColors::new(&stations);
        assert_ne!(colors.color_for("Dongsi"), colors.color_for("Wanliu"));
        assert_eq!(colors.color_for("Nowhere"), Color32::GRAY);
    }

    #[test]
    fn polar_scale_lightens_with_severity() {
        assert_eq!(category_polar_color(AqCategory::Good), BLUES_R[0]);
        assert_eq!(category_polar_color(AqCategory::Hazardous), BLUES_R[5]);
        assert_eq!(category_bar_color(AqCategory::Moderate), SET3[1]);
    }
}
