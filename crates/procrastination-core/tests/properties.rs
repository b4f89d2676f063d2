//! Property tests for the analysis engine.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use procrastination_core::stats::lateness_points;
use procrastination_core::{
    Activity, ActivityCategory, ProcrastinationScorer, RiskPredictor, Task, TaskStatus, Tier,
    TimeDistributionAnalyzer,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn category() -> impl Strategy<Value = ActivityCategory> {
    prop::sample::select(ActivityCategory::ALL.to_vec())
}

fn status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

prop_compose! {
    fn activity()(
        id in 1u64..1000,
        category in category(),
        tenths in 0u32..80,
        day in 0u64..10,
        hour in 0u32..24,
        productivity in 1u8..=10,
        difficulty in 1u8..=10,
    ) -> Activity {
        let date = base_date().checked_add_days(Days::new(day)).unwrap();
        let hours = f64::from(tenths) / 10.0;
        Activity::new(id, category, "generated", hours, date, format!("{hour:02}:00"))
            .with_productivity(productivity)
            .with_difficulty(difficulty)
    }
}

prop_compose! {
    fn task()(
        id in 1u64..1000,
        status in status(),
        lead in 1u64..30,
        lag in 0u64..40,
        completed in any::<bool>(),
    ) -> Task {
        let assigned = base_date();
        let deadline = assigned.checked_add_days(Days::new(lead)).unwrap();
        let task = Task::new(id, "Course", "generated", deadline, assigned).with_status(status);
        let done_on = assigned.checked_add_days(Days::new(lag)).unwrap();
        match status {
            TaskStatus::Done => task.completed_on(done_on),
            TaskStatus::Late if completed => task.with_date_completed(done_on),
            _ => task,
        }
    }
}

proptest! {
    #[test]
    fn percentages_sum_to_one_hundred(activities in prop::collection::vec(activity(), 1..40)) {
        let result = TimeDistributionAnalyzer::new().analyze(&activities).unwrap();
        if result.total_hours > 0.0 {
            let total: f64 = result.percentage_by_category.values().sum();
            // Rounding each share to 2 decimals moves it by at most 0.005.
            let bound = 0.005 * result.percentage_by_category.len() as f64 + 1e-9;
            prop_assert!((total - 100.0).abs() <= bound);
        } else {
            prop_assert!(result.percentage_by_category.is_empty());
        }
    }

    #[test]
    fn lateness_points_are_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(lateness_points(low) <= lateness_points(high));
    }

    #[test]
    fn scores_stay_in_range(
        tasks in prop::collection::vec(task(), 1..20),
        activities in prop::collection::vec(activity(), 0..40),
    ) {
        let scorer = ProcrastinationScorer::new();
        let metrics = scorer.score(&tasks, &activities).unwrap();

        prop_assert!(metrics.raw_score <= 11);
        prop_assert!((0.0..=10.0).contains(&metrics.normalized_score));
        prop_assert_eq!(metrics.raw_score, metrics.factor_breakdown.total());
        prop_assert_eq!(&metrics, &scorer.score(&tasks, &activities).unwrap());
    }

    #[test]
    fn tiers_partition_the_score_range(score in 0.0f64..=10.0) {
        let tier = Tier::from_score(score);
        let expected = match score {
            s if s >= 8.0 => Tier::High,
            s if s >= 6.0 => Tier::MedHigh,
            s if s >= 4.0 => Tier::Med,
            s if s >= 2.0 => Tier::LowMed,
            _ => Tier::Low,
        };
        prop_assert_eq!(tier, expected);
    }

    #[test]
    fn days_remaining_is_never_negative(
        offset in -60i64..60,
        difficulty in 1u8..=10,
        score in 0.0f64..=10.0,
    ) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let deadline = today + chrono::Duration::days(offset);

        let prediction = RiskPredictor::new()
            .predict_for_date(score, deadline, difficulty, today)
            .unwrap();

        prop_assert!(prediction.days_remaining >= 0);
        prop_assert!(prediction.predicted_completion >= today);
        prop_assert!((0.0..=10.0).contains(&prediction.risk_score));
        if prediction.days_remaining > 0 {
            prop_assert!(prediction.predicted_completion <= deadline);
        }
    }
}
