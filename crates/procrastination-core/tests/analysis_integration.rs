//! Integration tests for the scoring and risk workflow.

use chrono::NaiveDate;
use procrastination_core::{
    parse_date, Activity, ActivityCategory, AnalysisContext, CoreError, RiskCategory,
    SampleGenerator, Student, Task, TaskStatus, Tier,
};

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

#[test]
fn test_full_scoring_workflow() {
    let mut ctx = AnalysisContext::new(Student::new("Dewi", "22010"));

    for (id, name, deadline) in [(1, "Homework 1", "2024-02-01"), (2, "Homework 2", "2024-02-08")] {
        let task = Task::new(id, "Algorithms", name, date(deadline), date("2024-01-01"))
            .with_status(TaskStatus::Late);
        ctx.add_task(task).unwrap();
    }
    ctx.add_task(
        Task::new(3, "Databases", "Project", date("2024-01-25"), date("2024-01-01"))
            .completed_on(date("2024-01-20"))
            .with_actual_hours(6.5),
    )
    .unwrap();

    let metrics = ctx.recompute().unwrap().clone();
    assert_eq!(metrics.raw_score, 6);
    assert_eq!(metrics.normalized_score, 5.45);
    assert_eq!(metrics.tier, Tier::Med);

    // Risk for a hard task due in two days.
    let today = date("2024-05-10");
    let prediction = ctx.predict_risk("2024-05-12", 8, today).unwrap();
    assert_eq!(prediction.days_remaining, 2);
    assert_eq!(prediction.risk_category, RiskCategory::VeryHigh);
    assert_eq!(prediction.predicted_completion, date("2024-05-11"));
}

#[test]
fn test_activity_factors_change_score_after_recompute() {
    let mut ctx = AnalysisContext::default();
    ctx.add_task(Task::new(1, "Math", "ps1", date("2024-03-20"), date("2024-03-01")))
        .unwrap();
    let before = ctx.recompute().unwrap().raw_score;
    assert_eq!(before, 0);

    // Heavy entertainment on one day, a single study session on another.
    for id in 1..=6 {
        ctx.add_activity(Activity::new(
            id,
            ActivityCategory::Entertainment,
            "series",
            2.0,
            date("2024-03-02"),
            "21:00",
        ))
        .unwrap();
    }
    ctx.add_activity(Activity::new(
        7,
        ActivityCategory::Study,
        "notes",
        1.0,
        date("2024-03-03"),
        "08:00",
    ))
    .unwrap();

    assert_eq!(ctx.metrics().unwrap().raw_score, 0);

    let after = ctx.recompute().unwrap();
    // 12/13 entertainment -> 3 points; counts 6 and 1 -> sd 3.54 -> 2 points
    assert_eq!(after.factor_breakdown.entertainment_ratio.as_ref().unwrap().score, 3);
    assert_eq!(after.factor_breakdown.consistency.as_ref().unwrap().score, 2);
    assert_eq!(after.raw_score, 5);
}

#[test]
fn test_time_distribution_requires_activities() {
    let ctx = AnalysisContext::default();
    assert!(matches!(ctx.analyze_time(), Err(CoreError::EmptyData("activity"))));
    assert!(ctx.overview().is_err());
}

#[test]
fn test_sample_data_supports_every_analysis() {
    let today = date("2024-06-01");
    let mut ctx = AnalysisContext::new(Student::new("Sample", "000"));
    ctx.replace_records(SampleGenerator::default().generate(today));

    let distribution = ctx.analyze_time().unwrap();
    let total: f64 = distribution.percentage_by_category.values().sum();
    assert!((total - 100.0).abs() < 0.05);

    let metrics = ctx.recompute().unwrap();
    assert!(metrics.normalized_score >= 0.0 && metrics.normalized_score <= 10.0);

    let overview = ctx.overview().unwrap();
    assert_eq!(overview.daily_productivity.len(), 7);

    let open = ctx.predict_open_tasks(today).unwrap();
    assert!(open.iter().all(|(_, p)| p.days_remaining >= 1));
}
