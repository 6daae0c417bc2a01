//! Sparkline coordinate generation for the weight log.
//!
//! Shares [`sort_weight_entries`] with the trend analyzer so the plotted
//! series is exactly the series the trend was computed from. The output
//! is ready-to-embed SVG fragments plus the raw coordinates for callers
//! that render their own markers.

use serde::{Deserialize, Serialize};

use crate::models::WeightEntry;
use crate::trend::sort_weight_entries;

/// Minimum visual span in kg; flatter series get a synthetic band so the
/// polyline never collapses onto a single horizontal line.
const VISIBILITY_FLOOR_KG: f64 = 2.0;

/// Plot geometry and series length cap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SparklineOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Only the most recent `limit` entries are plotted
    pub limit: usize,
}

impl Default for SparklineOptions {
    fn default() -> Self {
        SparklineOptions {
            width: 320.0,
            height: 96.0,
            padding: 8.0,
            limit: 30,
        }
    }
}

/// One plotted point in SVG coordinate space (y grows downward).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SparkPoint {
    pub x: f64,
    pub y: f64,
}

/// Render-ready sparkline for a weight series.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Sparkline {
    /// SVG polyline `points` attribute, one decimal per coordinate
    pub points: String,

    /// Closed SVG path filling the area under the line
    pub area_path: String,

    /// Lower edge of the plotted scale, after the visibility floor
    pub min: f64,

    /// Upper edge of the plotted scale, after the visibility floor
    pub max: f64,

    pub coordinates: Vec<SparkPoint>,

    /// Normalized weights actually plotted, oldest first
    pub values: Vec<f64>,
}

/// Builds sparkline geometry for the most recent entries.
///
/// Entries are normalized and sorted exactly like the trend analyzer's
/// input; fewer than two survivors yields an empty sparkline.
pub fn sparkline_points(entries: &[WeightEntry], options: &SparklineOptions) -> Sparkline {
    let sorted = sort_weight_entries(entries);
    let start = sorted.len().saturating_sub(options.limit);
    let window = &sorted[start..];
    if window.len() < 2 {
        return Sparkline::default();
    }

    let values: Vec<f64> = window.iter().map(|entry| entry.weight).collect();
    let observed_min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let observed_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if observed_max - observed_min < VISIBILITY_FLOOR_KG {
        let mid = (observed_min + observed_max) / 2.0;
        (
            mid - VISIBILITY_FLOOR_KG / 2.0,
            mid + VISIBILITY_FLOOR_KG / 2.0,
        )
    } else {
        (observed_min, observed_max)
    };

    let inner_width = options.width - 2.0 * options.padding;
    let inner_height = options.height - 2.0 * options.padding;
    let step = inner_width / (values.len() - 1) as f64;

    let coordinates: Vec<SparkPoint> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = options.padding + i as f64 * step;
            let y = options.padding + (1.0 - (value - min) / (max - min)) * inner_height;
            SparkPoint { x, y }
        })
        .collect();

    let points = coordinates
        .iter()
        .map(|point| format!("{:.1},{:.1}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ");

    let baseline = options.height - options.padding;
    let mut area_path = format!("M {:.1},{:.1}", coordinates[0].x, baseline);
    for point in &coordinates {
        area_path.push_str(&format!(" L {:.1},{:.1}", point.x, point.y));
    }
    area_path.push_str(&format!(
        " L {:.1},{:.1} Z",
        coordinates[coordinates.len() - 1].x,
        baseline
    ));

    Sparkline {
        points,
        area_path,
        min,
        max,
        coordinates,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, weight: f64) -> WeightEntry {
        WeightEntry::new(date, weight)
    }

    fn series(weights: &[f64]) -> Vec<WeightEntry> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| entry(&format!("2024-03-{:02}", i + 1), weight))
            .collect()
    }

    #[test]
    fn test_empty_and_single_entry_series() {
        let options = SparklineOptions::default();
        assert_eq!(sparkline_points(&[], &options), Sparkline::default());
        let single = series(&[80.0]);
        assert_eq!(sparkline_points(&single, &options), Sparkline::default());
    }

    #[test]
    fn test_two_point_geometry() {
        let options = SparklineOptions::default();
        let sparkline = sparkline_points(&series(&[80.0, 81.0]), &options);

        // Range 1 kg is widened to the 2 kg band 79.5..81.5
        assert_eq!(sparkline.min, 79.5);
        assert_eq!(sparkline.max, 81.5);
        assert_eq!(sparkline.points, "8.0,68.0 312.0,28.0");
        assert_eq!(sparkline.values, vec![80.0, 81.0]);
    }

    #[test]
    fn test_flat_series_gets_synthetic_band() {
        let options = SparklineOptions::default();
        let sparkline = sparkline_points(&series(&[80.0, 80.0, 80.0]), &options);

        assert_eq!(sparkline.min, 79.0);
        assert_eq!(sparkline.max, 81.0);
        // Every point sits on the vertical midline, not NaN
        for point in &sparkline.coordinates {
            assert!((point.y - 48.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wide_range_uses_observed_bounds() {
        let options = SparklineOptions::default();
        let sparkline = sparkline_points(&series(&[80.0, 84.0, 82.0]), &options);
        assert_eq!(sparkline.min, 80.0);
        assert_eq!(sparkline.max, 84.0);
    }

    #[test]
    fn test_x_spans_padded_width() {
        let options = SparklineOptions::default();
        let sparkline = sparkline_points(&series(&[80.0, 81.0, 82.0, 83.0]), &options);
        let first = sparkline.coordinates[0];
        let last = sparkline.coordinates[sparkline.coordinates.len() - 1];
        assert_eq!(first.x, 8.0);
        assert_eq!(last.x, 312.0);
    }

    #[test]
    fn test_higher_weight_plots_higher() {
        let options = SparklineOptions::default();
        let sparkline = sparkline_points(&series(&[80.0, 84.0]), &options);
        // SVG y grows downward
        assert!(sparkline.coordinates[1].y < sparkline.coordinates[0].y);
    }

    #[test]
    fn test_limit_keeps_most_recent_entries() {
        let weights: Vec<f64> = (0..10).map(|i| 80.0 + i as f64 * 0.5).collect();
        let options = SparklineOptions {
            limit: 4,
            ..Default::default()
        };
        let sparkline = sparkline_points(&series(&weights), &options);
        assert_eq!(sparkline.values.len(), 4);
        assert_eq!(sparkline.values[0], 83.0);
        assert_eq!(sparkline.values[3], 84.5);
    }

    #[test]
    fn test_area_path_is_closed_at_baseline() {
        let options = SparklineOptions::default();
        let sparkline = sparkline_points(&series(&[80.0, 81.0]), &options);
        assert!(sparkline.area_path.starts_with("M 8.0,88.0"));
        assert!(sparkline.area_path.ends_with("L 312.0,88.0 Z"));
    }

    #[test]
    fn test_invalid_entries_share_trend_normalization() {
        let mut entries = series(&[80.0, 81.0]);
        entries.push(entry("not-a-date", 82.0));
        entries.push(entry("2024-03-20", 500.0));
        let sparkline = sparkline_points(&entries, &SparklineOptions::default());
        assert_eq!(sparkline.values, vec![80.0, 81.0]);
    }
}
