//! Daily expenditure breakdown aggregation.
//!
//! Composes BMR, general activity, steps, training and cardio into one
//! [`CalorieBreakdown`]. Each addend is rounded independently before the
//! final sum; summing raw values and rounding once would drift from the
//! per-component figures the presentation layer shows, so the order here
//! must not change.

use crate::cardio::total_cardio_burn;
use crate::models::{CalorieBreakdown, UserData};
use crate::rounding::round_half_up;
use crate::steps::step_details;
use crate::tables::{
    CardioTable, TrainingTable, DEFAULT_REST_DAY_MULTIPLIER, DEFAULT_TRAINING_DAY_MULTIPLIER,
};
use crate::training::training_calories;

/// Everything the aggregator needs for one day.
///
/// The engine never reads shared state; the caller snapshots profile,
/// session and table data into this struct per invocation.
#[derive(Debug, Clone, Copy)]
pub struct BreakdownInput<'a> {
    /// Raw step-range token as the user recorded it
    pub steps_token: &'a str,
    /// Whether the day includes a structured training session
    pub is_training_day: bool,
    pub user_data: &'a UserData,
    /// Basal rate, typically from [`crate::bmr::calculate_bmr`]
    pub bmr: f64,
    pub cardio_table: &'a CardioTable,
    pub training_table: &'a TrainingTable,
}

/// Builds the full expenditure breakdown for one day.
///
/// Cardio sessions are summed in full on both training and rest days;
/// only the general-activity multiplier and the training burn react to
/// `is_training_day`.
pub fn calculate_breakdown(input: &BreakdownInput<'_>) -> CalorieBreakdown {
    let user_data = input.user_data;
    let steps = step_details(input.steps_token, &user_data.profile);

    let activity_multiplier = if input.is_training_day {
        user_data
            .activity
            .training
            .unwrap_or(DEFAULT_TRAINING_DAY_MULTIPLIER)
    } else {
        user_data.activity.rest.unwrap_or(DEFAULT_REST_DAY_MULTIPLIER)
    };
    let base_activity = round_half_up(input.bmr * activity_multiplier);

    let training_burn = if input.is_training_day {
        let raw = user_data
            .training
            .as_ref()
            .map(|training| training_calories(training, input.training_table))
            .unwrap_or(0.0);
        round_half_up(raw)
    } else {
        0.0
    };

    let cardio_burn = round_half_up(total_cardio_burn(
        &user_data.cardio_sessions,
        &user_data.profile,
        input.cardio_table,
    ));

    let total = round_half_up(
        input.bmr + base_activity + steps.calories + training_burn + cardio_burn,
    );

    CalorieBreakdown {
        bmr: input.bmr,
        base_activity,
        activity_multiplier,
        step_calories: steps.calories,
        estimated_steps: steps.estimated_steps,
        training_burn,
        cardio_burn,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmr::calculate_bmr;
    use crate::models::{
        ActivityMultipliers, CardioIntensity, CardioSession, Gender, TrainingProfile, UserProfile,
    };
    use crate::tables::{default_cardio_table, default_training_table};

    fn sample_user() -> UserData {
        UserData {
            profile: UserProfile {
                age: 25.0,
                weight_kg: 80.0,
                height_cm: 180.0,
                gender: Gender::Male,
            },
            activity: ActivityMultipliers::default(),
            training: Some(TrainingProfile {
                kind: "strength".to_string(),
                duration_hours: 1.5,
            }),
            cardio_sessions: vec![CardioSession {
                kind: "running".to_string(),
                duration_min: 30.0,
                intensity: Some(CardioIntensity::Moderate),
                avg_heart_rate: None,
            }],
        }
    }

    fn breakdown_for(user_data: &UserData, steps_token: &str, is_training_day: bool) -> CalorieBreakdown {
        let cardio_table = default_cardio_table();
        let training_table = default_training_table();
        let bmr = calculate_bmr(&user_data.profile);
        calculate_breakdown(&BreakdownInput {
            steps_token,
            is_training_day,
            user_data,
            bmr,
            cardio_table: &cardio_table,
            training_table: &training_table,
        })
    }

    #[test]
    fn test_training_day_breakdown() {
        let user = sample_user();
        let breakdown = breakdown_for(&user, "14k", true);

        assert_eq!(breakdown.bmr, 1805.0);
        assert_eq!(breakdown.activity_multiplier, 0.35);
        assert_eq!(breakdown.base_activity, 632.0);
        assert_eq!(breakdown.estimated_steps, 14_000);
        assert_eq!(breakdown.step_calories, 653.0);
        assert_eq!(breakdown.training_burn, 330.0);
        assert_eq!(breakdown.cardio_burn, 280.0);
        assert_eq!(breakdown.total, 3700.0);
    }

    #[test]
    fn test_rest_day_keeps_cardio_but_not_training() {
        let user = sample_user();
        let breakdown = breakdown_for(&user, "14k", false);

        assert_eq!(breakdown.activity_multiplier, 0.28);
        assert_eq!(breakdown.base_activity, 505.0);
        assert_eq!(breakdown.training_burn, 0.0);
        // Cardio is never filtered by day type
        assert_eq!(breakdown.cardio_burn, 280.0);
    }

    #[test]
    fn test_custom_multipliers_override_defaults() {
        let mut user = sample_user();
        user.activity = ActivityMultipliers {
            training: Some(0.4),
            rest: Some(0.25),
        };
        let training_day = breakdown_for(&user, "", true);
        assert_eq!(training_day.activity_multiplier, 0.4);
        assert_eq!(training_day.base_activity, 722.0);

        let rest_day = breakdown_for(&user, "", false);
        assert_eq!(rest_day.activity_multiplier, 0.25);
    }

    #[test]
    fn test_missing_training_profile_burns_nothing() {
        let mut user = sample_user();
        user.training = None;
        let breakdown = breakdown_for(&user, "", true);
        assert_eq!(breakdown.training_burn, 0.0);
    }

    #[test]
    fn test_total_matches_sum_of_rounded_parts() {
        let user = sample_user();
        let breakdown = breakdown_for(&user, "10k-12k", true);
        let expected = round_half_up(
            breakdown.bmr
                + breakdown.base_activity
                + breakdown.step_calories
                + breakdown.training_burn
                + breakdown.cardio_burn,
        );
        assert_eq!(breakdown.total, expected);
    }

    #[test]
    fn test_empty_token_contributes_no_steps() {
        let user = sample_user();
        let breakdown = breakdown_for(&user, "", false);
        assert_eq!(breakdown.estimated_steps, 0);
        assert_eq!(breakdown.step_calories, 0.0);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_total_is_exact_sum_of_rounded_parts(
            bmr_raw in 900.0f64..2600.0f64,
            steps in 0u32..40_000u32,
            is_training_day in any::<bool>()
        ) {
            let user = sample_user();
            let token = steps.to_string();
            let breakdown = calculate_breakdown(&BreakdownInput {
                steps_token: &token,
                is_training_day,
                user_data: &user,
                bmr: round_half_up(bmr_raw),
                cardio_table: &default_cardio_table(),
                training_table: &default_training_table(),
            });

            let sum = breakdown.bmr
                + breakdown.base_activity
                + breakdown.step_calories
                + breakdown.training_burn
                + breakdown.cardio_burn;
            prop_assert_eq!(breakdown.total, sum);
            prop_assert_eq!(breakdown.total.fract(), 0.0);
        }
    }
}
