//! Analysis over recorded activities and tasks.
//!
//! This module provides the time-distribution analyzer, the multi-factor
//! procrastination scorer, the per-deadline risk predictor, and the
//! chart-ready activity overview.

mod overview;
mod procrastination;
mod risk;
mod time_distribution;

pub use overview::{ActivityOverview, DailyProductivity, DifficultyPoint};

pub use procrastination::{
    completion_lag_points, consistency_points, entertainment_points, lateness_points,
    CompletionLagFactor, ConsistencyFactor, EntertainmentFactor, FactorBreakdown,
    LatenessFactor, ProcrastinationMetrics, ProcrastinationScorer, Tier, MAX_RAW_SCORE,
};

pub use risk::{RiskCategory, RiskPrediction, RiskPredictor};

pub use time_distribution::{DayPeriod, TimeDistribution, TimeDistributionAnalyzer};

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean, `None` for an empty iterator.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
