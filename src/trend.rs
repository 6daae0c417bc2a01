//! Weight-trend analysis over a logged entry series.
//!
//! Entries arrive unsorted and possibly malformed; normalization drops
//! anything unusable, the analyzer samples a recent window, and the
//! weekly rate is classified into severity bands. The sparkline
//! generator shares [`sort_weight_entries`] so plot and trend never
//! disagree about which entries count.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::models::WeightEntry;
use crate::rounding::round_to_tenth;

/// Analysis window applied when the caller does not choose one.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Plausible bodyweight bounds in kg; entries outside are discarded.
pub const MIN_VALID_WEIGHT_KG: f64 = 30.0;
pub const MAX_VALID_WEIGHT_KG: f64 = 210.0;

/// Direction of weight change over the sampled window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    fn from_delta(delta: f64) -> Self {
        if delta == 0.0 {
            TrendDirection::Flat
        } else if delta > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Flat => write!(f, "flat"),
        }
    }
}

/// Severity band for a weekly rate of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendSeverity {
    Stable,     // below 0.1 kg/week
    Gradual,    // 0.1 to 0.45 kg/week
    Moderate,   // 0.45 to 0.8 kg/week
    Aggressive, // 0.8 to 1.2 kg/week
    Severe,     // 1.2 kg/week and above
}

impl TrendSeverity {
    pub fn from_weekly_rate(weekly_rate: f64) -> Self {
        let magnitude = weekly_rate.abs();
        if magnitude < 0.1 {
            TrendSeverity::Stable
        } else if magnitude < 0.45 {
            TrendSeverity::Gradual
        } else if magnitude < 0.8 {
            TrendSeverity::Moderate
        } else if magnitude < 1.2 {
            TrendSeverity::Aggressive
        } else {
            TrendSeverity::Severe
        }
    }

    /// Display label, with a gain/loss suffix taken from the rate's sign.
    pub fn label(&self, weekly_rate: f64) -> String {
        let suffix = if weekly_rate > 0.0 { "gain" } else { "loss" };
        match self {
            TrendSeverity::Stable => "Stable".to_string(),
            TrendSeverity::Gradual => format!("Gradual weight {}", suffix),
            TrendSeverity::Moderate => format!("Moderate weight {}", suffix),
            TrendSeverity::Aggressive => format!("Aggressive weight {}", suffix),
            TrendSeverity::Severe => format!("Severe weight {}", suffix),
        }
    }
}

/// Trend analysis result for one entry series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    /// Human-readable classification, or a placeholder for thin data
    pub label: String,

    /// Weight change across the sample in kg
    pub delta: f64,

    /// Rate of change normalized to kg/week
    pub weekly_rate: f64,

    pub direction: TrendDirection,

    /// The normalized entries the rate was computed from
    pub sample_range: Vec<WeightEntry>,
}

impl WeightTrend {
    fn placeholder(label: &str, survivors: Vec<WeightEntry>) -> Self {
        WeightTrend {
            label: label.to_string(),
            delta: 0.0,
            weekly_rate: 0.0,
            direction: TrendDirection::Flat,
            sample_range: survivors,
        }
    }
}

/// Descriptive statistics over a sampled entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// A weight entry whose date has been parsed, used internally so window
/// arithmetic never re-parses strings.
#[derive(Debug, Clone)]
struct DatedEntry {
    date: NaiveDate,
    entry: WeightEntry,
}

/// Accepts only a real calendar date written exactly as `YYYY-MM-DD`.
pub(crate) fn parse_entry_date(date: &str) -> Option<NaiveDate> {
    let bytes = date.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn normalize_entries(entries: &[WeightEntry]) -> Vec<DatedEntry> {
    let mut valid: Vec<DatedEntry> = entries
        .iter()
        .filter_map(|entry| {
            let date = parse_entry_date(&entry.date)?;
            if !entry.weight.is_finite()
                || entry.weight < MIN_VALID_WEIGHT_KG
                || entry.weight > MAX_VALID_WEIGHT_KG
            {
                return None;
            }
            let weight =
                round_to_tenth(entry.weight.clamp(MIN_VALID_WEIGHT_KG, MAX_VALID_WEIGHT_KG));
            Some(DatedEntry {
                date,
                entry: WeightEntry::new(entry.date.clone(), weight),
            })
        })
        .collect();

    let dropped = entries.len() - valid.len();
    if dropped > 0 {
        debug!(dropped, "dropped invalid weight entries during normalization");
    }

    valid.sort_by_key(|dated| dated.date);
    valid
}

/// Drops malformed entries, clamps and rounds weights, sorts by date.
///
/// This is the single normalization step shared by the trend analyzer,
/// the sparkline generator and the persistence layer.
pub fn sort_weight_entries(entries: &[WeightEntry]) -> Vec<WeightEntry> {
    normalize_entries(entries)
        .into_iter()
        .map(|dated| dated.entry)
        .collect()
}

/// Analyzes the weight trend over the most recent `window_days`.
///
/// With fewer than two valid entries a placeholder trend is returned.
/// When the window itself holds fewer than two entries the last two of
/// the full series are used instead, so sparse loggers still get a rate.
pub fn calculate_weight_trend(entries: &[WeightEntry], window_days: u32) -> WeightTrend {
    let normalized = normalize_entries(entries);
    if normalized.len() < 2 {
        let label = if normalized.is_empty() {
            "No data yet"
        } else {
            "Need more data"
        };
        let survivors = normalized.into_iter().map(|dated| dated.entry).collect();
        return WeightTrend::placeholder(label, survivors);
    }

    let latest_date = normalized[normalized.len() - 1].date;
    let window_start = latest_date - Duration::days(window_days as i64);
    let window: Vec<&DatedEntry> = normalized
        .iter()
        .filter(|dated| dated.date >= window_start)
        .collect();
    let sample: Vec<&DatedEntry> = if window.len() >= 2 {
        window
    } else {
        normalized.iter().skip(normalized.len() - 2).collect()
    };

    let first = sample[0];
    let last = sample[sample.len() - 1];
    let day_count = (last.date - first.date).num_days().max(1) as f64;
    let delta = last.entry.weight - first.entry.weight;
    let weekly_rate = delta / day_count * 7.0;

    WeightTrend {
        label: TrendSeverity::from_weekly_rate(weekly_rate).label(weekly_rate),
        delta,
        weekly_rate,
        direction: TrendDirection::from_delta(delta),
        sample_range: sample.into_iter().map(|dated| dated.entry.clone()).collect(),
    }
}

/// Descriptive statistics for an already-normalized sample.
///
/// No filtering happens here; feed it the `sample_range` of a trend or
/// the output of [`sort_weight_entries`].
pub fn summarize(entries: &[WeightEntry]) -> WeightSummary {
    if entries.is_empty() {
        return WeightSummary::default();
    }
    let weights: Vec<f64> = entries.iter().map(|entry| entry.weight).collect();
    let std_dev = if weights.len() > 1 {
        (&weights).std_dev()
    } else {
        0.0
    };
    WeightSummary {
        count: weights.len(),
        mean: (&weights).mean(),
        std_dev,
        min: (&weights).min(),
        max: (&weights).max(),
    }
}
