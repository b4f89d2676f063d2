//! Procrastination index scoring.
//!
//! Four independent factors are scored from task and activity records:
//!
//! | Factor             | Points | Input                                      |
//! |--------------------|--------|--------------------------------------------|
//! | Lateness           | 0-3    | share of tasks with status `late`          |
//! | Completion lag     | 0-3    | mean days from assignment to completion    |
//! | Entertainment ratio| 0-3    | entertainment share of logged hours        |
//! | Consistency        | 0-2    | std. deviation of activities per day       |
//!
//! The raw sum (max 11) is normalized to 0-10 and mapped to a [`Tier`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{mean, round2};
use crate::error::{CoreError, Result};
use crate::records::{Activity, ActivityCategory, Task, TaskStatus};

/// Highest possible raw score (3 + 3 + 3 + 2).
pub const MAX_RAW_SCORE: u8 = 11;

/// Categorical interpretation of the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    #[serde(alias = "RENDAH")]
    Low,
    #[serde(alias = "RENDAH-SEDANG")]
    LowMed,
    #[serde(alias = "SEDANG")]
    Med,
    #[serde(alias = "SEDANG-TINGGI")]
    MedHigh,
    #[serde(alias = "TINGGI")]
    High,
}

impl Tier {
    /// Map a normalized score (0-10) to a tier. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Tier::High
        } else if score >= 6.0 {
            Tier::MedHigh
        } else if score >= 4.0 {
            Tier::Med
        } else if score >= 2.0 {
            Tier::LowMed
        } else {
            Tier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::LowMed => "LOW_MED",
            Tier::Med => "MED",
            Tier::MedHigh => "MED_HIGH",
            Tier::High => "HIGH",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Tier::High => {
                "SERIOUS INTERVENTION NEEDED! Procrastination is very high. Talk to your \
                 academic advisor soon and consider professional support."
            }
            Tier::MedHigh => {
                "IMPROVE NOW! Time management is not working. Keep a strict daily schedule, \
                 use the Pomodoro technique, and set internal deadlines."
            }
            Tier::Med => {
                "NEEDS IMPROVEMENT. Some procrastination patterns show up. Start by \
                 prioritising tasks and cut entertainment time during busy periods."
            }
            Tier::LowMed => {
                "FAIRLY GOOD. Keep your good habits. Focus on consistency and try to finish \
                 tasks earlier than the deadline."
            }
            Tier::Low => {
                "VERY GOOD! Procrastination is low. Keep up your productive and disciplined \
                 habits."
            }
        }
    }
}

/// Points for the percentage of late tasks.
pub fn lateness_points(late_percentage: f64) -> u8 {
    if late_percentage > 30.0 {
        3
    } else if late_percentage > 15.0 {
        2
    } else if late_percentage > 0.0 {
        1
    } else {
        0
    }
}

/// Points for the mean assignment-to-completion lag in days.
pub fn completion_lag_points(mean_days: f64) -> u8 {
    if mean_days > 14.0 {
        3
    } else if mean_days > 7.0 {
        2
    } else if mean_days > 3.0 {
        1
    } else {
        0
    }
}

/// Points for the entertainment share of logged hours (percent).
pub fn entertainment_points(entertainment_percentage: f64) -> u8 {
    if entertainment_percentage > 40.0 {
        3
    } else if entertainment_percentage > 25.0 {
        2
    } else if entertainment_percentage > 15.0 {
        1
    } else {
        0
    }
}

/// Points for the standard deviation of activities per day.
pub fn consistency_points(daily_stddev: f64) -> u8 {
    if daily_stddev > 3.0 {
        2
    } else if daily_stddev > 1.5 {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatenessFactor {
    #[serde(alias = "skor")]
    pub score: u8,
    #[serde(alias = "persentase_terlambat")]
    pub late_percentage: f64,
    #[serde(alias = "jumlah_tugas_terlambat")]
    pub late_count: usize,
    #[serde(alias = "total_tugas")]
    pub total_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionLagFactor {
    #[serde(alias = "skor")]
    pub score: u8,
    #[serde(alias = "rata_rata_hari")]
    pub mean_days: f64,
    #[serde(alias = "jumlah_tugas_selesai")]
    pub completed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntertainmentFactor {
    #[serde(alias = "skor")]
    pub score: u8,
    #[serde(alias = "persentase_hiburan")]
    pub entertainment_percentage: f64,
    #[serde(alias = "persentase_produktif")]
    pub productive_percentage: f64,
    #[serde(alias = "waktu_hiburan")]
    pub entertainment_hours: f64,
    #[serde(alias = "waktu_produktif")]
    pub productive_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyFactor {
    #[serde(alias = "skor")]
    pub score: u8,
    #[serde(alias = "deviasi_aktivitas")]
    pub daily_stddev: f64,
    #[serde(alias = "rata_aktivitas_harian")]
    pub daily_mean: f64,
    #[serde(alias = "jumlah_hari")]
    pub day_count: usize,
}

/// Per-factor details. A factor is absent when its input was missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "keterlambatan")]
    pub lateness: Option<LatenessFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "waktu_pengerjaan")]
    pub completion_lag: Option<CompletionLagFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "rasio_hiburan")]
    pub entertainment_ratio: Option<EntertainmentFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "konsistensi")]
    pub consistency: Option<ConsistencyFactor>,
}

impl FactorBreakdown {
    /// Scored factors as `(name, points)` in fixed order.
    pub fn scores(&self) -> Vec<(&'static str, u8)> {
        let mut out = Vec::with_capacity(4);
        if let Some(f) = &self.lateness {
            out.push(("lateness", f.score));
        }
        if let Some(f) = &self.completion_lag {
            out.push(("completion_lag", f.score));
        }
        if let Some(f) = &self.entertainment_ratio {
            out.push(("entertainment_ratio", f.score));
        }
        if let Some(f) = &self.consistency {
            out.push(("consistency", f.score));
        }
        out
    }

    pub fn total(&self) -> u8 {
        self.scores().iter().map(|(_, points)| points).sum()
    }
}

/// Snapshot produced by [`ProcrastinationScorer::score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcrastinationMetrics {
    /// 0-10, two decimals
    #[serde(alias = "skor_total")]
    pub normalized_score: f64,
    #[serde(alias = "skor_mentah")]
    pub raw_score: u8,
    #[serde(alias = "maksimum_skor")]
    pub max_possible_score: u8,
    #[serde(alias = "tingkat")]
    pub tier: Tier,
    #[serde(default, alias = "faktor_penilaian")]
    pub factor_breakdown: FactorBreakdown,
    #[serde(alias = "rekomendasi")]
    pub recommendation: String,
}

/// Multi-factor procrastination scorer.
#[derive(Debug, Clone, Default)]
pub struct ProcrastinationScorer;

impl ProcrastinationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score the given records. Activities only feed the entertainment and
    /// consistency factors and may be empty.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyData`] when there are no tasks.
    pub fn score(&self, tasks: &[Task], activities: &[Activity]) -> Result<ProcrastinationMetrics> {
        if tasks.is_empty() {
            return Err(CoreError::EmptyData("task"));
        }

        let factor_breakdown = FactorBreakdown {
            lateness: Some(Self::lateness(tasks)),
            completion_lag: Self::completion_lag(tasks),
            entertainment_ratio: Self::entertainment_ratio(activities),
            consistency: Self::consistency(activities),
        };

        let raw_score = factor_breakdown.total();
        let normalized = if raw_score > 0 {
            (f64::from(raw_score) / f64::from(MAX_RAW_SCORE) * 10.0).min(10.0)
        } else {
            0.0
        };
        let tier = Tier::from_score(normalized);

        tracing::debug!(raw_score, normalized, tier = tier.as_str(), "procrastination scored");

        Ok(ProcrastinationMetrics {
            normalized_score: round2(normalized),
            raw_score,
            max_possible_score: MAX_RAW_SCORE,
            tier,
            factor_breakdown,
            recommendation: tier.recommendation().to_string(),
        })
    }

    fn lateness(tasks: &[Task]) -> LatenessFactor {
        let late_count = tasks.iter().filter(|t| t.status == TaskStatus::Late).count();
        let total_tasks = tasks.len();
        let late_percentage = late_count as f64 / total_tasks as f64 * 100.0;

        LatenessFactor {
            score: lateness_points(late_percentage),
            late_percentage: round2(late_percentage),
            late_count,
            total_tasks,
        }
    }

    // Keyed on date_completed presence, not status: late tasks with a
    // completion date count, late tasks without one do not.
    fn completion_lag(tasks: &[Task]) -> Option<CompletionLagFactor> {
        let lags: Vec<f64> = tasks
            .iter()
            .filter_map(Task::completion_lag_days)
            .map(|days| days as f64)
            .collect();
        let completed_count = lags.len();
        let mean_days = mean(lags)?;

        Some(CompletionLagFactor {
            score: completion_lag_points(mean_days),
            mean_days: round2(mean_days),
            completed_count,
        })
    }

    fn entertainment_ratio(activities: &[Activity]) -> Option<EntertainmentFactor> {
        let hours_in = |category: ActivityCategory| -> f64 {
            activities
                .iter()
                .filter(|a| a.category == category)
                .map(|a| a.duration_hours)
                .sum()
        };

        let total_hours: f64 = activities.iter().map(|a| a.duration_hours).sum();
        if total_hours <= 0.0 {
            return None;
        }

        let entertainment_hours = hours_in(ActivityCategory::Entertainment);
        let productive_hours =
            hours_in(ActivityCategory::Study) + hours_in(ActivityCategory::Assignment);
        let entertainment_percentage = entertainment_hours / total_hours * 100.0;
        let productive_percentage = productive_hours / total_hours * 100.0;

        Some(EntertainmentFactor {
            score: entertainment_points(entertainment_percentage),
            entertainment_percentage: round2(entertainment_percentage),
            productive_percentage: round2(productive_percentage),
            entertainment_hours: round2(entertainment_hours),
            productive_hours: round2(productive_hours),
        })
    }

    fn consistency(activities: &[Activity]) -> Option<ConsistencyFactor> {
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for activity in activities {
            *per_day.entry(activity.date).or_default() += 1;
        }
        if per_day.len() < 2 {
            return None;
        }

        let counts: Vec<f64> = per_day.values().map(|&c| c as f64).collect();
        let daily_mean = mean(counts.iter().copied())?;
        // Sample standard deviation (n - 1).
        let variance = counts.iter().map(|c| (c - daily_mean).powi(2)).sum::<f64>()
            / (counts.len() - 1) as f64;
        let daily_stddev = variance.sqrt();

        Some(ConsistencyFactor {
            score: consistency_points(daily_stddev),
            daily_stddev: round2(daily_stddev),
            daily_mean: round2(daily_mean),
            day_count: per_day.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: u64, status: TaskStatus) -> Task {
        Task::new(id, "Math", format!("task {id}"), date(2024, 2, 1), date(2024, 1, 1))
            .with_status(status)
    }

    fn activity(id: u64, category: ActivityCategory, hours: f64, day: u32) -> Activity {
        Activity::new(id, category, format!("activity {id}"), hours, date(2024, 3, day), "09:00")
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(Tier::from_score(0.0), Tier::Low);
        assert_eq!(Tier::from_score(1.99), Tier::Low);
        assert_eq!(Tier::from_score(2.0), Tier::LowMed);
        assert_eq!(Tier::from_score(3.99), Tier::LowMed);
        assert_eq!(Tier::from_score(4.0), Tier::Med);
        assert_eq!(Tier::from_score(6.0), Tier::MedHigh);
        assert_eq!(Tier::from_score(7.99), Tier::MedHigh);
        assert_eq!(Tier::from_score(8.0), Tier::High);
        assert_eq!(Tier::from_score(10.0), Tier::High);
    }

    #[test]
    fn test_factor_breakpoints_are_exclusive() {
        assert_eq!(lateness_points(0.0), 0);
        assert_eq!(lateness_points(15.0), 1);
        assert_eq!(lateness_points(15.01), 2);
        assert_eq!(lateness_points(30.0), 2);
        assert_eq!(lateness_points(30.01), 3);

        assert_eq!(completion_lag_points(3.0), 0);
        assert_eq!(completion_lag_points(7.0), 1);
        assert_eq!(completion_lag_points(14.0), 2);
        assert_eq!(completion_lag_points(14.5), 3);

        assert_eq!(entertainment_points(15.0), 0);
        assert_eq!(entertainment_points(25.0), 1);
        assert_eq!(entertainment_points(40.0), 2);
        assert_eq!(entertainment_points(40.1), 3);

        assert_eq!(consistency_points(1.5), 0);
        assert_eq!(consistency_points(3.0), 1);
        assert_eq!(consistency_points(3.1), 2);
    }

    #[test]
    fn test_no_tasks_is_an_error() {
        let activities = vec![activity(1, ActivityCategory::Study, 1.0, 1)];
        let err = ProcrastinationScorer::new().score(&[], &activities).unwrap_err();
        assert!(matches!(err, CoreError::EmptyData("task")));
    }

    #[test]
    fn test_late_and_slow_tasks_without_activities() {
        let tasks = vec![
            task(1, TaskStatus::Late),
            task(2, TaskStatus::Late),
            Task::new(3, "Physics", "report", date(2024, 1, 25), date(2024, 1, 1))
                .completed_on(date(2024, 1, 20)),
        ];

        let metrics = ProcrastinationScorer::new().score(&tasks, &[]).unwrap();

        let lateness = metrics.factor_breakdown.lateness.as_ref().unwrap();
        assert_eq!(lateness.score, 3);
        assert_eq!(lateness.late_percentage, 66.67);
        assert_eq!(lateness.late_count, 2);

        let lag = metrics.factor_breakdown.completion_lag.as_ref().unwrap();
        assert_eq!(lag.score, 3);
        assert_eq!(lag.mean_days, 19.0);
        assert_eq!(lag.completed_count, 1);

        assert!(metrics.factor_breakdown.entertainment_ratio.is_none());
        assert!(metrics.factor_breakdown.consistency.is_none());
        assert_eq!(metrics.raw_score, 6);
        assert_eq!(metrics.max_possible_score, 11);
        assert_eq!(metrics.normalized_score, 5.45);
        assert_eq!(metrics.tier, Tier::Med);
        assert_eq!(metrics.recommendation, Tier::Med.recommendation());
    }

    #[test]
    fn test_on_time_tasks_score_zero() {
        let tasks = vec![task(1, TaskStatus::Pending), task(2, TaskStatus::InProgress)];

        let metrics = ProcrastinationScorer::new().score(&tasks, &[]).unwrap();

        assert_eq!(metrics.raw_score, 0);
        assert_eq!(metrics.normalized_score, 0.0);
        assert_eq!(metrics.tier, Tier::Low);
        assert!(metrics.factor_breakdown.completion_lag.is_none());
    }

    #[test]
    fn test_completion_lag_includes_late_tasks_with_completion_date() {
        let tasks = vec![
            task(1, TaskStatus::Late).with_date_completed(date(2024, 1, 11)),
            task(2, TaskStatus::Late),
            Task::new(3, "Math", "quiz", date(2024, 1, 10), date(2024, 1, 1))
                .completed_on(date(2024, 1, 3)),
        ];

        let metrics = ProcrastinationScorer::new().score(&tasks, &[]).unwrap();

        let lag = metrics.factor_breakdown.completion_lag.unwrap();
        assert_eq!(lag.completed_count, 2);
        assert_eq!(lag.mean_days, 6.0);
        assert_eq!(lag.score, 1);
    }

    #[test]
    fn test_entertainment_ratio_and_productive_share() {
        let tasks = vec![task(1, TaskStatus::Pending)];
        let activities = vec![
            activity(1, ActivityCategory::Entertainment, 4.5, 1),
            activity(2, ActivityCategory::Study, 3.0, 1),
            activity(3, ActivityCategory::Assignment, 1.5, 1),
            activity(4, ActivityCategory::Rest, 1.0, 1),
        ];

        let metrics = ProcrastinationScorer::new().score(&tasks, &activities).unwrap();

        let ratio = metrics.factor_breakdown.entertainment_ratio.unwrap();
        assert_eq!(ratio.entertainment_percentage, 45.0);
        assert_eq!(ratio.productive_percentage, 45.0);
        assert_eq!(ratio.productive_hours, 4.5);
        assert_eq!(ratio.score, 3);
        // Single day: no consistency factor.
        assert!(metrics.factor_breakdown.consistency.is_none());
        assert_eq!(metrics.raw_score, 3);
    }

    #[test]
    fn test_zero_duration_activities_skip_entertainment_factor() {
        let tasks = vec![task(1, TaskStatus::Pending)];
        let activities = vec![
            activity(1, ActivityCategory::Entertainment, 0.0, 1),
            activity(2, ActivityCategory::Study, 0.0, 2),
        ];

        let metrics = ProcrastinationScorer::new().score(&tasks, &activities).unwrap();

        assert!(metrics.factor_breakdown.entertainment_ratio.is_none());
        assert!(metrics.factor_breakdown.consistency.is_some());
    }

    #[test]
    fn test_consistency_uses_sample_standard_deviation() {
        let tasks = vec![task(1, TaskStatus::Pending)];
        // Day 1: 1 activity, day 2: 9 activities -> mean 5, sample sd = sqrt(32) ~ 5.66
        let mut activities = vec![activity(1, ActivityCategory::Study, 1.0, 1)];
        for id in 2..=10 {
            activities.push(activity(id, ActivityCategory::Study, 1.0, 2));
        }

        let metrics = ProcrastinationScorer::new().score(&tasks, &activities).unwrap();

        let consistency = metrics.factor_breakdown.consistency.unwrap();
        assert_eq!(consistency.day_count, 2);
        assert_eq!(consistency.daily_mean, 5.0);
        assert_eq!(consistency.daily_stddev, 5.66);
        assert_eq!(consistency.score, 2);
    }

    #[test]
    fn test_maximum_score_is_high_tier() {
        let tasks = vec![
            task(1, TaskStatus::Late).with_date_completed(date(2024, 1, 30)),
            task(2, TaskStatus::Late).with_date_completed(date(2024, 1, 28)),
        ];
        let mut activities = vec![activity(1, ActivityCategory::Entertainment, 10.0, 1)];
        for id in 2..=9 {
            activities.push(activity(id, ActivityCategory::Entertainment, 1.0, 2));
        }

        let metrics = ProcrastinationScorer::new().score(&tasks, &activities).unwrap();

        assert_eq!(metrics.raw_score, MAX_RAW_SCORE);
        assert_eq!(metrics.normalized_score, 10.0);
        assert_eq!(metrics.tier, Tier::High);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let tasks = vec![task(1, TaskStatus::Late), task(2, TaskStatus::Pending)];
        let activities = vec![
            activity(1, ActivityCategory::Entertainment, 2.0, 1),
            activity(2, ActivityCategory::Study, 2.0, 2),
        ];
        let scorer = ProcrastinationScorer::new();

        let first = scorer.score(&tasks, &activities).unwrap();
        let second = scorer.score(&tasks, &activities).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metrics_deserialize_from_legacy_snapshot() {
        let json = r#"{
            "skor_total": 5.45,
            "skor_mentah": 6,
            "maksimum_skor": 11,
            "tingkat": "SEDANG",
            "faktor_penilaian": {
                "keterlambatan": {
                    "skor": 3,
                    "persentase_terlambat": 66.67,
                    "jumlah_tugas_terlambat": 2,
                    "total_tugas": 3
                },
                "waktu_pengerjaan": {"skor": 3, "rata_rata_hari": 19.0, "jumlah_tugas_selesai": 1}
            },
            "rekomendasi": "PERLU PERBAIKAN."
        }"#;

        let metrics: ProcrastinationMetrics = serde_json::from_str(json).unwrap();

        assert_eq!(metrics.tier, Tier::Med);
        assert_eq!(metrics.raw_score, 6);
        assert_eq!(metrics.factor_breakdown.total(), 6);
        assert_eq!(metrics.factor_breakdown.lateness.unwrap().late_count, 2);
    }
}
