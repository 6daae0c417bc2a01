//! Step-range token parsing and step-based calorie estimation.
//!
//! Users record daily steps as loose bucket tokens rather than exact counts:
//! `"<10k"`, `"14k"`, `"10k-12k"`, `">20k"`. The parser turns a token into
//! numeric bounds plus a comparison operator, the estimator picks a
//! representative count for the bucket, and the calorie model converts that
//! count through a stride-length distance estimate. Unparseable input
//! degrades to zero steps and zero calories instead of erroring.

use serde::{Deserialize, Serialize};

use crate::models::{Gender, UserProfile};
use crate::rounding::round_half_up;

/// Ceiling assumed for a below-range bucket with no explicit bound.
const DEFAULT_LT_CEILING: i64 = 10_000;

/// Baseline assumed for an above-range bucket with no explicit bound.
const DEFAULT_GT_BASELINE: i64 = 20_000;

/// Representative fraction of a below-range bucket's ceiling.
const BELOW_CEILING_FACTOR: f64 = 0.75;

/// Representative overshoot past an above-range bucket's baseline.
const ABOVE_BASELINE_FACTOR: f64 = 1.15;

/// Stride length as a fraction of height, by gender.
const MALE_STRIDE_FACTOR: f64 = 0.415;
const FEMALE_STRIDE_FACTOR: f64 = 0.413;

const METERS_PER_MILE: f64 = 1609.34;
const LBS_PER_KG: f64 = 2.20462;

/// Calories burned per mile walked, per pound of bodyweight.
const CALORIES_PER_MILE_PER_LB: f64 = 0.57;

/// Fallbacks substituted when profile fields are non-positive.
const FALLBACK_WEIGHT_KG: f64 = 70.0;
const FALLBACK_HEIGHT_CM: f64 = 175.0;
const FALLBACK_STRIDE_M: f64 = 0.75;

/// Comparison operator carried by a parsed step-range token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RangeOperator {
    /// A single count, `"14k"`.
    Exact,
    /// A bounded interval, `"10k-12k"`.
    Range,
    /// Below a ceiling, `"<10k"`.
    Lt,
    /// Above a baseline, `">20k"` or `"20k+"`.
    Gt,
}

impl std::fmt::Display for RangeOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeOperator::Exact => write!(f, "exact"),
            RangeOperator::Range => write!(f, "range"),
            RangeOperator::Lt => write!(f, "lt"),
            RangeOperator::Gt => write!(f, "gt"),
        }
    }
}

/// Numeric bounds extracted from a step-range token.
///
/// The parser always populates `min`; both bounds are optional so that
/// hand-built values with a missing side still estimate sensibly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedStepRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub operator: RangeOperator,
}

impl Default for ParsedStepRange {
    fn default() -> Self {
        ParsedStepRange {
            min: Some(0),
            max: None,
            operator: RangeOperator::Exact,
        }
    }
}

/// Result of the parse, estimate and calorie chain for one token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepDetails {
    pub parsed_range: ParsedStepRange,
    pub estimated_steps: i64,
    /// Rounded to a whole number; `f64` so a non-finite profile weight
    /// surfaces as non-finite rather than a fabricated figure.
    pub calories: f64,
}

/// Parses a step-range token into bounds and an operator.
///
/// The token is lowercased and trimmed; `<` marks a below-range bucket and
/// `>` or `+` an above-range one. After stripping operator characters and
/// whitespace, fragments are split on `-`, en dash, em dash, or the word
/// `to`, and each fragment is read as a leading number with an optional
/// `k` thousand suffix. A token with no parseable number yields the
/// default range regardless of any operator character.
pub fn parse_step_range(token: &str) -> ParsedStepRange {
    let normalized = token.trim().to_lowercase();
    if normalized.is_empty() {
        return ParsedStepRange::default();
    }

    let below = normalized.contains('<');
    let above = !below && (normalized.contains('>') || normalized.contains('+'));

    let stripped: String = normalized
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '+') && !c.is_whitespace())
        .collect();
    let dashed = stripped.replace('\u{2013}', "-").replace('\u{2014}', "-").replace("to", "-");
    let values: Vec<i64> = dashed.split('-').filter_map(parse_fragment).collect();

    if below && !values.is_empty() {
        ParsedStepRange {
            min: Some(0),
            max: Some(values[0]),
            operator: RangeOperator::Lt,
        }
    } else if above && !values.is_empty() {
        ParsedStepRange {
            min: Some(values[0]),
            max: None,
            operator: RangeOperator::Gt,
        }
    } else if values.len() >= 2 {
        ParsedStepRange {
            min: Some(values[0].min(values[1])),
            max: Some(values[0].max(values[1])),
            operator: RangeOperator::Range,
        }
    } else if values.len() == 1 {
        ParsedStepRange {
            min: Some(values[0]),
            max: Some(values[0]),
            operator: RangeOperator::Exact,
        }
    } else {
        ParsedStepRange::default()
    }
}

/// Reads a leading number from a fragment, applying a `k` suffix when it
/// immediately follows the digits. Returns `None` when the fragment does
/// not start with a number.
fn parse_fragment(fragment: &str) -> Option<i64> {
    let bytes = fragment.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    let value: f64 = fragment[..end].parse().ok()?;
    let value = if fragment[end..].starts_with('k') {
        value * 1000.0
    } else {
        value
    };
    Some(round_half_up(value) as i64)
}

/// Picks a representative step count for a parsed bucket.
pub fn estimate_steps_from_range(parsed: &ParsedStepRange) -> i64 {
    match parsed.operator {
        RangeOperator::Lt => {
            let ceiling = parsed.max.unwrap_or(DEFAULT_LT_CEILING) as f64;
            round_half_up(ceiling * BELOW_CEILING_FACTOR) as i64
        }
        RangeOperator::Gt => {
            let baseline = parsed.min.unwrap_or(DEFAULT_GT_BASELINE) as f64;
            round_half_up(baseline * ABOVE_BASELINE_FACTOR) as i64
        }
        RangeOperator::Exact | RangeOperator::Range => match (parsed.min, parsed.max) {
            (Some(min), Some(max)) => round_half_up((min as f64 + max as f64) / 2.0) as i64,
            (Some(min), None) => min,
            (None, Some(max)) => round_half_up(max as f64 * BELOW_CEILING_FACTOR) as i64,
            (None, None) => 0,
        },
    }
}

/// Converts a step count to calories through a stride-length model.
///
/// Stride is estimated from height and gender, distance from stride and
/// count, and expenditure from distance and bodyweight. Non-positive
/// weight or height is replaced with population fallbacks; the result is
/// left unrounded for the caller to round at display time.
pub fn calories_from_steps(steps: i64, profile: &UserProfile) -> f64 {
    if steps <= 0 {
        return 0.0;
    }

    let weight_kg = if profile.weight_kg > 0.0 {
        profile.weight_kg
    } else {
        FALLBACK_WEIGHT_KG
    };
    let height_cm = if profile.height_cm > 0.0 {
        profile.height_cm
    } else {
        FALLBACK_HEIGHT_CM
    };

    let stride_factor = match profile.gender {
        Gender::Male => MALE_STRIDE_FACTOR,
        Gender::Female => FEMALE_STRIDE_FACTOR,
    };
    let height_m = height_cm / 100.0;
    let stride_m = if height_m > 0.0 {
        height_m * stride_factor
    } else {
        FALLBACK_STRIDE_M
    };

    let steps_per_mile = METERS_PER_MILE / stride_m;
    let distance_miles = steps as f64 / steps_per_mile;
    let weight_lbs = weight_kg * LBS_PER_KG;
    let calories_per_mile = CALORIES_PER_MILE_PER_LB * weight_lbs;
    distance_miles * calories_per_mile
}

/// Runs the full token-to-calories chain, rounding only the final figure.
pub fn step_details(token: &str, profile: &UserProfile) -> StepDetails {
    let parsed = parse_step_range(token);
    let estimated_steps = estimate_steps_from_range(&parsed);
    let calories = round_half_up(calories_from_steps(estimated_steps, profile));
    StepDetails {
        parsed_range: parsed,
        estimated_steps,
        calories,
    }
}
