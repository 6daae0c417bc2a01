// Library interface for kcalrs modules
// This allows integration tests to access the core functionality

pub mod bmr;
pub mod cardio;
pub mod config;
pub mod error;
pub mod goals;
pub mod logging;
pub mod models;
pub mod rounding;
pub mod sparkline;
pub mod steps;
pub mod store;
pub mod tables;
pub mod tdee;
pub mod training;
pub mod trend;

// Re-export commonly used types for convenience
pub use models::*;
pub use bmr::calculate_bmr;
pub use goals::{goal_calories, Goal};
pub use sparkline::{sparkline_points, Sparkline, SparklineOptions};
pub use steps::{parse_step_range, step_details, ParsedStepRange, RangeOperator, StepDetails};
pub use tdee::{calculate_breakdown, BreakdownInput};
pub use trend::{
    calculate_weight_trend, sort_weight_entries, summarize, TrendDirection, WeightSummary,
    WeightTrend,
};
pub use error::{KcalError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
