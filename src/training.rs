//! Duration-by-rate calorie calculation for structured training.

use crate::models::TrainingProfile;
use crate::tables::TrainingTable;

/// Calories for a training block, `duration_hours × rate`.
///
/// A style missing from the table resolves to a zero rate, so the block
/// contributes nothing. The product is left unrounded; the breakdown
/// aggregator rounds it where it is displayed.
pub fn training_calories(training: &TrainingProfile, table: &TrainingTable) -> f64 {
    let rate = table
        .get(&training.kind)
        .map(|style| style.calories_per_hour)
        .unwrap_or(0.0);
    training.duration_hours * rate
}
