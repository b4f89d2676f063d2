//! Chart-ready summaries of the recorded data.
//!
//! Nothing here renders anything; the overview carries the series a front
//! end needs for a productivity trend, a task status bar chart, an hours per
//! period chart and a difficulty vs. productivity scatter plot.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use super::{mean, round2, DayPeriod};
use crate::error::{CoreError, Result};
use crate::records::{Activity, Task, TaskStatus};

/// Mean productivity of all activities logged on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProductivity {
    pub date: NaiveDate,
    pub mean_productivity: f64,
    pub activity_count: usize,
}

/// One activity plotted as difficulty against productivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPoint {
    pub difficulty: u8,
    pub productivity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOverview {
    /// Ordered by date
    pub daily_productivity: Vec<DailyProductivity>,
    pub most_productive_day: Option<DailyProductivity>,
    pub least_productive_day: Option<DailyProductivity>,
    /// Every status, zero when no task has it
    pub status_counts: BTreeMap<TaskStatus, usize>,
    /// Every period in [`DayPeriod::ALL`] order
    pub hours_by_period: Vec<(DayPeriod, f64)>,
    pub difficulty_points: Vec<DifficultyPoint>,
    pub mean_difficulty: Option<f64>,
    pub mean_point_productivity: Option<f64>,
}

impl ActivityOverview {
    /// Build the overview. Either collection may be empty, not both.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyData`] when there are no records at all.
    pub fn build(activities: &[Activity], tasks: &[Task]) -> Result<Self> {
        if activities.is_empty() && tasks.is_empty() {
            return Err(CoreError::EmptyData("activity or task"));
        }

        let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for activity in activities {
            by_date
                .entry(activity.date)
                .or_default()
                .push(f64::from(activity.productivity));
        }
        let daily_productivity: Vec<DailyProductivity> = by_date
            .into_iter()
            .filter_map(|(date, samples)| {
                let activity_count = samples.len();
                mean(samples).map(|m| DailyProductivity {
                    date,
                    mean_productivity: round2(m),
                    activity_count,
                })
            })
            .collect();

        // First occurrence wins on ties, so the earliest day is reported.
        let mut most_productive_day: Option<&DailyProductivity> = None;
        let mut least_productive_day: Option<&DailyProductivity> = None;
        for day in &daily_productivity {
            if most_productive_day
                .map_or(true, |best| day.mean_productivity > best.mean_productivity)
            {
                most_productive_day = Some(day);
            }
            if least_productive_day
                .map_or(true, |worst| day.mean_productivity < worst.mean_productivity)
            {
                least_productive_day = Some(day);
            }
        }
        let most_productive_day = most_productive_day.cloned();
        let least_productive_day = least_productive_day.cloned();

        let mut status_counts: BTreeMap<TaskStatus, usize> =
            TaskStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for task in tasks {
            *status_counts.entry(task.status).or_default() += 1;
        }

        let hours_by_period = DayPeriod::ALL
            .iter()
            .map(|period| {
                let hours: f64 = activities
                    .iter()
                    .filter(|a| DayPeriod::from_hour(a.start_time_or_noon().hour()) == *period)
                    .map(|a| a.duration_hours)
                    .sum();
                (*period, round2(hours))
            })
            .collect();

        let difficulty_points: Vec<DifficultyPoint> = activities
            .iter()
            .map(|a| DifficultyPoint {
                difficulty: a.difficulty,
                productivity: a.productivity,
            })
            .collect();
        let mean_difficulty =
            mean(difficulty_points.iter().map(|p| f64::from(p.difficulty))).map(round2);
        let mean_point_productivity =
            mean(difficulty_points.iter().map(|p| f64::from(p.productivity))).map(round2);

        Ok(Self {
            daily_productivity,
            most_productive_day,
            least_productive_day,
            status_counts,
            hours_by_period,
            difficulty_points,
            mean_difficulty,
            mean_point_productivity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ActivityCategory;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn activity(
        id: u64,
        day: u32,
        start: &str,
        hours: f64,
        productivity: u8,
        difficulty: u8,
    ) -> Activity {
        Activity::new(id, ActivityCategory::Study, format!("a{id}"), hours, date(day), start)
            .with_productivity(productivity)
            .with_difficulty(difficulty)
    }

    #[test]
    fn empty_records_are_an_error() {
        assert!(matches!(
            ActivityOverview::build(&[], &[]),
            Err(CoreError::EmptyData(_))
        ));
    }

    #[test]
    fn daily_trend_is_sorted_with_best_and_worst_day() {
        let activities = vec![
            activity(1, 3, "09:00", 1.0, 4, 2),
            activity(2, 1, "09:00", 1.0, 8, 6),
            activity(3, 1, "14:00", 1.0, 6, 4),
            activity(4, 2, "20:00", 1.0, 2, 3),
        ];

        let overview = ActivityOverview::build(&activities, &[]).unwrap();

        let dates: Vec<NaiveDate> = overview.daily_productivity.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(overview.daily_productivity[0].mean_productivity, 7.0);
        assert_eq!(overview.daily_productivity[0].activity_count, 2);
        assert_eq!(overview.most_productive_day.unwrap().date, date(1));
        assert_eq!(overview.least_productive_day.unwrap().date, date(2));
        assert_eq!(overview.mean_difficulty, Some(3.75));
        assert_eq!(overview.mean_point_productivity, Some(5.0));
        assert_eq!(overview.difficulty_points.len(), 4);
    }

    #[test]
    fn every_period_and_status_is_listed() {
        let activities = vec![
            activity(1, 1, "06:30", 2.0, 5, 1),
            activity(2, 1, "23:00", 1.5, 5, 1),
            activity(3, 1, "??", 0.5, 5, 1),
        ];
        let tasks = vec![
            Task::new(1, "Math", "ps1", date(20), date(1)).with_status(TaskStatus::Late),
            Task::new(2, "Math", "ps2", date(20), date(1)),
        ];

        let overview = ActivityOverview::build(&activities, &tasks).unwrap();

        assert_eq!(
            overview.hours_by_period,
            vec![
                (DayPeriod::Morning, 2.0),
                (DayPeriod::Afternoon, 0.5),
                (DayPeriod::Evening, 0.0),
                (DayPeriod::LateNight, 1.5),
            ]
        );
        assert_eq!(overview.status_counts.len(), 4);
        assert_eq!(overview.status_counts[&TaskStatus::Late], 1);
        assert_eq!(overview.status_counts[&TaskStatus::Pending], 1);
        assert_eq!(overview.status_counts[&TaskStatus::Done], 0);
    }

    #[test]
    fn tasks_only_has_no_daily_trend() {
        let tasks = vec![Task::new(1, "Math", "ps1", date(20), date(1))];

        let overview = ActivityOverview::build(&[], &tasks).unwrap();

        assert!(overview.daily_productivity.is_empty());
        assert!(overview.most_productive_day.is_none());
        assert_eq!(overview.mean_difficulty, None);
        assert!(overview.hours_by_period.iter().all(|(_, hours)| *hours == 0.0));
    }
}
