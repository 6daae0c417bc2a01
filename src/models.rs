use serde::{Deserialize, Serialize};

/// Gender categories used by the energy formulas.
///
/// Anything that is not `male` takes the non-male branch of the formulas, so
/// unrecognized values deserialize to [`Gender::Female`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    #[serde(other)]
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Demographic snapshot used by the BMR and step-calorie formulas.
///
/// Fields are `f64` on purpose: the engine performs no input validation and
/// non-finite values are expected to flow through the formulas unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: f64,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Height in centimeters
    pub height_cm: f64,

    /// Gender category for the formula branch
    #[serde(default)]
    pub gender: Gender,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            age: 30.0,
            weight_kg: 70.0,
            height_cm: 175.0,
            gender: Gender::Male,
        }
    }
}

/// Subjective intensity buckets keyed into the MET tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardioIntensity {
    Light,
    Moderate,
    Vigorous,
}

/// A logged cardio session.
///
/// A session is recorded either with a subjective intensity or in heart-rate
/// effort mode. In the latter case `intensity` is absent and the session
/// contributes zero calories through the MET path; `avg_heart_rate` is kept
/// for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioSession {
    /// Cardio type identifier, keyed into the cardio table ("running", ...)
    pub kind: String,

    /// Session length in minutes
    pub duration_min: f64,

    /// Subjective intensity; `None` for heart-rate effort mode
    #[serde(default)]
    pub intensity: Option<CardioIntensity>,

    /// Average heart rate in bpm, when logged
    #[serde(default)]
    pub avg_heart_rate: Option<f64>,
}

/// Structured training plan for a training day.
///
/// The calories-per-hour rate is resolved from the training table by `kind`,
/// never stored on the plan itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProfile {
    /// Training type identifier, keyed into the training table ("strength", ...)
    pub kind: String,

    /// Planned duration in hours
    pub duration_hours: f64,
}

/// Activity multipliers applied to BMR for non-exercise activity.
///
/// Either value may be absent, in which case the aggregator falls back to the
/// built-in defaults (0.35 training / 0.28 rest).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityMultipliers {
    /// Multiplier used on training days
    #[serde(default)]
    pub training: Option<f64>,

    /// Multiplier used on rest days
    #[serde(default)]
    pub rest: Option<f64>,
}

/// Everything the breakdown aggregator needs to know about the user: the
/// demographic profile plus the logged routine. Handed to the engine by
/// parameter; the engine never reads a shared store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserData {
    /// Demographic profile
    #[serde(default)]
    pub profile: UserProfile,

    /// Activity multipliers, if customized
    #[serde(default)]
    pub activity: ActivityMultipliers,

    /// Training plan, if any
    #[serde(default)]
    pub training: Option<TrainingProfile>,

    /// Logged cardio routine
    #[serde(default)]
    pub cardio_sessions: Vec<CardioSession>,
}

/// A candidate bodyweight measurement as supplied by the caller.
///
/// `date` is an ISO `YYYY-MM-DD` string; malformed dates and out-of-range
/// weights are dropped during normalization rather than rejected. One entry
/// per distinct date is enforced by the caller, not the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Measurement date, `YYYY-MM-DD`
    pub date: String,

    /// Body weight in kilograms, clamped to [30, 210] and rounded to one
    /// decimal during normalization
    pub weight: f64,
}

impl WeightEntry {
    pub fn new(date: impl Into<String>, weight: f64) -> Self {
        WeightEntry {
            date: date.into(),
            weight,
        }
    }
}

/// Full daily expenditure breakdown.
///
/// Every calorie field carries an integral value (rounded independently
/// before the final sum) but stays `f64` so that non-finite profile input
/// propagates instead of panicking. The presentation layer relies on the
/// intermediates to show a percentage-of-total split per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieBreakdown {
    /// Basal metabolic rate as supplied to the aggregator
    pub bmr: f64,

    /// Non-exercise activity: round(bmr × activity_multiplier)
    pub base_activity: f64,

    /// Multiplier that produced `base_activity`
    pub activity_multiplier: f64,

    /// Calories from the estimated step count
    pub step_calories: f64,

    /// Representative step count resolved from the step-range token
    pub estimated_steps: i64,

    /// Calories from structured training (0 on rest days)
    pub training_burn: f64,

    /// Calories from all logged cardio sessions
    pub cardio_burn: f64,

    /// round(bmr + base_activity + step_calories + training_burn + cardio_burn)
    pub total: f64,
}
