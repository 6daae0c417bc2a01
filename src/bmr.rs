//! Basal metabolic rate via the Mifflin-St Jeor equation.
//!
//! The result is returned as `f64` even though it carries an integral
//! value: profile fields are not validated here, and a non-finite input
//! must surface as a non-finite output rather than a plausible-looking
//! number. Callers that need an integer cast after checking finiteness.

use crate::models::{Gender, UserProfile};
use crate::rounding::round_half_up;

/// Constant offset added for male profiles.
const MALE_OFFSET: f64 = 5.0;

/// Constant offset added for all other profiles.
const FEMALE_OFFSET: f64 = -161.0;

/// Calculates basal metabolic rate in kcal/day, rounded to a whole number.
///
/// Mifflin-St Jeor: `10·weight + 6.25·height − 5·age + offset`, where the
/// offset is +5 for male profiles and −161 otherwise. Weight is in kg,
/// height in cm, age in years.
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    let offset = match profile.gender {
        Gender::Male => MALE_OFFSET,
        Gender::Female => FEMALE_OFFSET,
    };
    let raw = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age + offset;
    round_half_up(raw)
}
