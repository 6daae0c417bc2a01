//! MET-based cardio calorie calculation.
//!
//! Each session is priced as `met × weight × hours` and rounded on its own
//! before sessions are summed. An unknown activity, or a known activity
//! with no MET at the requested intensity, contributes zero calories
//! rather than raising an error: session lists come from stored state and
//! a stale entry must not poison the whole breakdown. Sessions recorded
//! in heart-rate mode carry no intensity and take the same zero path.

use crate::models::{CardioSession, UserProfile};
use crate::rounding::round_half_up;
use crate::tables::CardioTable;

/// Calories for one session, rounded to a whole number.
///
/// Activity names are matched against the table exactly; callers normalize
/// case before lookup. Bodyweight is used as given, so a non-finite
/// profile weight propagates into the result.
pub fn session_calories(session: &CardioSession, profile: &UserProfile, table: &CardioTable) -> f64 {
    let met = session.intensity.and_then(|intensity| {
        table
            .get(&session.kind)
            .and_then(|cardio| cardio.met.for_intensity(intensity))
    });
    let met = match met {
        Some(met) => met,
        None => return 0.0,
    };
    let hours = session.duration_min / 60.0;
    round_half_up(met * profile.weight_kg * hours)
}

/// Total burn across all sessions, each rounded before summation.
pub fn total_cardio_burn(
    sessions: &[CardioSession],
    profile: &UserProfile,
    table: &CardioTable,
) -> f64 {
    sessions
        .iter()
        .map(|session| session_calories(session, profile, table))
        .sum()
}
