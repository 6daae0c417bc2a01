//! Goal-based calorie targets derived from a daily expenditure total.

use serde::{Deserialize, Serialize};

use crate::rounding::round_half_up;

/// Bulk/cut phase selected by the user.
///
/// Keys are matched exactly; anything unrecognized falls back to
/// maintenance so a corrupt stored value never produces a deficit or
/// surplus the user did not ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    AggressiveBulk,
    Bulking,
    Maintenance,
    Cutting,
    AggressiveCut,
}

impl Goal {
    /// All goals from largest surplus to largest deficit.
    pub const ALL: [Goal; 5] = [
        Goal::AggressiveBulk,
        Goal::Bulking,
        Goal::Maintenance,
        Goal::Cutting,
        Goal::AggressiveCut,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Goal::AggressiveBulk => "aggressive_bulk",
            Goal::Bulking => "bulking",
            Goal::Maintenance => "maintenance",
            Goal::Cutting => "cutting",
            Goal::AggressiveCut => "aggressive_cut",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "aggressive_bulk" => Goal::AggressiveBulk,
            "bulking" => Goal::Bulking,
            "cutting" => Goal::Cutting,
            "aggressive_cut" => Goal::AggressiveCut,
            _ => Goal::Maintenance,
        }
    }

    /// Daily calorie adjustment applied on top of expenditure.
    pub fn adjustment(&self) -> f64 {
        match self {
            Goal::AggressiveBulk => 500.0,
            Goal::Bulking => 300.0,
            Goal::Maintenance => 0.0,
            Goal::Cutting => -300.0,
            Goal::AggressiveCut => -500.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Goal::AggressiveBulk => "Large surplus for fast mass gain",
            Goal::Bulking => "Moderate surplus for lean gaining",
            Goal::Maintenance => "Eat at expenditure to hold weight",
            Goal::Cutting => "Moderate deficit for steady fat loss",
            Goal::AggressiveCut => "Large deficit for rapid fat loss",
        }
    }
}

/// Target daily calories for an expenditure total and goal key, rounded.
pub fn goal_calories(tdee: f64, goal_key: &str) -> f64 {
    round_half_up(tdee + Goal::from_key(goal_key).adjustment())
}
