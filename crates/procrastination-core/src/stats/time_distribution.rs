//! Time-distribution analysis.
//!
//! Aggregates logged hours by activity category and by period of the day,
//! and reports mean productivity per period.

use std::collections::BTreeMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::{mean, round2};
use crate::error::{CoreError, Result};
use crate::records::{Activity, ActivityCategory};

/// Fixed four-way split of the day by start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// 05:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// 22:00-04:59, wraps midnight
    LateNight,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::LateNight,
    ];

    /// Bucket an hour of day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=21 => DayPeriod::Evening,
            _ => DayPeriod::LateNight,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning (05:00-11:59)",
            DayPeriod::Afternoon => "Afternoon (12:00-16:59)",
            DayPeriod::Evening => "Evening (17:00-21:59)",
            DayPeriod::LateNight => "Late night (22:00-04:59)",
        }
    }
}

/// Result of [`TimeDistributionAnalyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDistribution {
    /// Total hours per category that has at least one activity
    pub hours_by_category: BTreeMap<ActivityCategory, f64>,
    /// Share of total hours per category, 2 decimals; empty when no time was logged
    pub percentage_by_category: BTreeMap<ActivityCategory, f64>,
    pub total_hours: f64,
    /// Mean productivity (1-10) per period that has at least one activity
    pub productivity_by_period: BTreeMap<DayPeriod, f64>,
    /// Hours logged per period that has at least one activity
    pub hours_by_period: BTreeMap<DayPeriod, f64>,
    pub mean_productivity: f64,
}

impl TimeDistribution {
    /// Period with the highest mean productivity.
    pub fn most_productive_period(&self) -> Option<(DayPeriod, f64)> {
        self.productivity_by_period
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(period, value)| (*period, *value))
    }
}

/// Time-distribution analyzer.
#[derive(Debug, Clone, Default)]
pub struct TimeDistributionAnalyzer;

impl TimeDistributionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze all activities.
    ///
    /// Start times that are not `HH:MM` are treated as 12:00.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyData`] when there are no activities.
    pub fn analyze(&self, activities: &[Activity]) -> Result<TimeDistribution> {
        if activities.is_empty() {
            return Err(CoreError::EmptyData("activity"));
        }

        let mut hours_by_category: BTreeMap<ActivityCategory, f64> = BTreeMap::new();
        for activity in activities {
            *hours_by_category.entry(activity.category).or_default() += activity.duration_hours;
        }
        let total_hours: f64 = hours_by_category.values().sum();

        let percentage_by_category = if total_hours > 0.0 {
            hours_by_category
                .iter()
                .map(|(category, hours)| (*category, round2(hours / total_hours * 100.0)))
                .collect()
        } else {
            BTreeMap::new()
        };

        let mut productivity_samples: BTreeMap<DayPeriod, Vec<f64>> = BTreeMap::new();
        let mut hours_by_period: BTreeMap<DayPeriod, f64> = BTreeMap::new();
        for activity in activities {
            let period = DayPeriod::from_hour(activity.start_time_or_noon().hour());
            productivity_samples
                .entry(period)
                .or_default()
                .push(f64::from(activity.productivity));
            *hours_by_period.entry(period).or_default() += activity.duration_hours;
        }

        let productivity_by_period = productivity_samples
            .into_iter()
            .filter_map(|(period, samples)| mean(samples).map(|m| (period, m)))
            .collect();

        let mean_productivity =
            mean(activities.iter().map(|a| f64::from(a.productivity))).unwrap_or(0.0);

        tracing::debug!(
            activities = activities.len(),
            total_hours,
            "time distribution analyzed"
        );

        Ok(TimeDistribution {
            hours_by_category,
            percentage_by_category,
            total_hours,
            productivity_by_period,
            hours_by_period,
            mean_productivity,
        })
    }
}
