//! Analysis session: student identity, records and the cached score.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, ValidationError};
use crate::records::{parse_date, Activity, RecordStore, Task};
use crate::stats::{
    ActivityOverview, ProcrastinationMetrics, ProcrastinationScorer, RiskPrediction,
    RiskPredictor, TimeDistribution, TimeDistributionAnalyzer,
};

/// Score used for risk prediction when no tasks have been recorded yet.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// The student the session belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "nama", alias = "name")]
    pub name: String,
    pub nim: String,
}

impl Student {
    pub fn new(name: impl Into<String>, nim: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nim: nim.into(),
        }
    }
}

/// One analysis session.
///
/// The metrics snapshot is only replaced by [`recompute`](Self::recompute);
/// adding records leaves the previous snapshot in place until the caller
/// recomputes or calls [`invalidate`](Self::invalidate).
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    student: Student,
    store: RecordStore,
    metrics: Option<ProcrastinationMetrics>,
}

impl AnalysisContext {
    pub fn new(student: Student) -> Self {
        Self {
            student,
            ..Self::default()
        }
    }

    /// Rebuild a session from persisted parts.
    pub fn with_records(
        student: Student,
        store: RecordStore,
        metrics: Option<ProcrastinationMetrics>,
    ) -> Self {
        Self {
            student,
            store,
            metrics,
        }
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    pub fn set_student(&mut self, student: Student) {
        self.student = student;
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn add_activity(&mut self, activity: Activity) -> Result<(), ValidationError> {
        self.store.add_activity(activity)
    }

    pub fn add_task(&mut self, task: Task) -> Result<(), ValidationError> {
        self.store.add_task(task)
    }

    /// Swap in a new record set and drop the cached score.
    pub fn replace_records(&mut self, store: RecordStore) {
        self.store = store;
        self.metrics = None;
    }

    pub fn analyze_time(&self) -> Result<TimeDistribution> {
        TimeDistributionAnalyzer::new().analyze(self.store.list_activities())
    }

    /// Score the current records and cache the result.
    ///
    /// On error the previous snapshot is left untouched.
    pub fn recompute(&mut self) -> Result<&ProcrastinationMetrics> {
        let metrics = ProcrastinationScorer::new()
            .score(self.store.list_tasks(), self.store.list_activities())?;
        tracing::debug!(score = metrics.normalized_score, "metrics cache updated");
        Ok(self.metrics.insert(metrics))
    }

    /// Cached snapshot from the last successful [`recompute`](Self::recompute).
    pub fn metrics(&self) -> Option<&ProcrastinationMetrics> {
        self.metrics.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.metrics = None;
    }

    /// Cached score, computing it first if needed. Falls back to
    /// [`NEUTRAL_SCORE`] when there are no tasks to score.
    fn score_for_prediction(&mut self) -> Result<f64> {
        if let Some(metrics) = &self.metrics {
            return Ok(metrics.normalized_score);
        }
        match self.recompute() {
            Ok(metrics) => Ok(metrics.normalized_score),
            Err(CoreError::EmptyData(what)) => {
                tracing::warn!(
                    what,
                    neutral = NEUTRAL_SCORE,
                    "nothing to score, using the neutral score for risk prediction"
                );
                Ok(NEUTRAL_SCORE)
            }
            Err(e) => Err(e),
        }
    }

    /// Predict procrastination risk for a deadline given as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDateFormat`] or [`CoreError::Validation`]
    /// for bad input.
    pub fn predict_risk(
        &mut self,
        deadline: &str,
        difficulty: u8,
        today: NaiveDate,
    ) -> Result<RiskPrediction> {
        // Reject a bad deadline before scoring anything.
        let deadline = parse_date(deadline)?;
        let score = self.score_for_prediction()?;
        RiskPredictor::new().predict_for_date(score, deadline, difficulty, today)
    }

    /// Risk for every task that is not done yet, soonest deadline first.
    pub fn predict_open_tasks(&mut self, today: NaiveDate) -> Result<Vec<(u64, RiskPrediction)>> {
        let score = self.score_for_prediction()?;
        let predictor = RiskPredictor::new();

        let mut open: Vec<&Task> = self
            .store
            .list_tasks()
            .iter()
            .filter(|t| t.date_completed.is_none())
            .collect();
        open.sort_by_key(|t| (t.deadline, t.id));

        open.into_iter()
            .map(|task| {
                predictor
                    .predict_for_date(score, task.deadline, task.difficulty, today)
                    .map(|prediction| (task.id, prediction))
            })
            .collect()
    }

    pub fn overview(&self) -> Result<ActivityOverview> {
        ActivityOverview::build(self.store.list_activities(), self.store.list_tasks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ActivityCategory, TaskStatus};
    use crate::stats::{RiskCategory, Tier};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn scored_context() -> AnalysisContext {
        let mut ctx = AnalysisContext::new(Student::new("Budi", "123"));
        let late = |id: u64, name: &str| {
            Task::new(id, "Math", name, date(2, 1), date(1, 1)).with_status(TaskStatus::Late)
        };
        ctx.add_task(late(1, "ps1")).unwrap();
        ctx.add_task(late(2, "ps2")).unwrap();
        ctx.add_task(
            Task::new(3, "Physics", "lab", date(1, 25), date(1, 1)).completed_on(date(1, 20)),
        )
        .unwrap();
        ctx
    }

    #[test]
    fn metrics_start_empty_and_are_cached_by_recompute() {
        let mut ctx = scored_context();
        assert!(ctx.metrics().is_none());

        let score = ctx.recompute().unwrap().normalized_score;
        assert_eq!(score, 5.45);
        assert_eq!(ctx.metrics().unwrap().tier, Tier::Med);
    }

    #[test]
    fn adding_records_keeps_the_stale_snapshot() {
        let mut ctx = scored_context();
        ctx.recompute().unwrap();

        ctx.add_task(Task::new(4, "Math", "ps3", date(3, 1), date(2, 1))).unwrap();
        let lateness = |ctx: &AnalysisContext| {
            ctx.metrics().unwrap().factor_breakdown.lateness.clone().unwrap()
        };
        assert_eq!(lateness(&ctx).total_tasks, 3);

        ctx.recompute().unwrap();
        assert_eq!(lateness(&ctx).total_tasks, 4);

        ctx.invalidate();
        assert!(ctx.metrics().is_none());
    }

    #[test]
    fn failed_recompute_leaves_previous_snapshot() {
        let previous = scored_context().recompute().unwrap().clone();
        let mut ctx = AnalysisContext::with_records(
            Student::default(),
            RecordStore::new(),
            Some(previous.clone()),
        );

        assert!(matches!(ctx.recompute(), Err(CoreError::EmptyData(_))));
        assert_eq!(ctx.metrics(), Some(&previous));

        ctx.replace_records(RecordStore::new());
        assert!(ctx.metrics().is_none());
    }

    #[test]
    fn predict_risk_scores_on_demand() {
        let mut ctx = scored_context();

        let prediction = ctx.predict_risk("2024-05-12", 8, date(5, 10)).unwrap();

        assert!(ctx.metrics().is_some());
        assert_eq!(prediction.risk_category, RiskCategory::VeryHigh);
        assert_eq!(prediction.predicted_completion, date(5, 11));
    }

    #[test]
    fn predict_risk_without_tasks_uses_neutral_score() {
        let mut ctx = AnalysisContext::default();
        ctx.add_activity(Activity::new(
            1,
            ActivityCategory::Study,
            "read",
            1.0,
            date(5, 1),
            "08:00",
        ))
        .unwrap();

        // base = 0.3 + 0.16 = 0.46, 20 days out
        let prediction = ctx.predict_risk("2024-05-30", 4, date(5, 10)).unwrap();

        assert!(ctx.metrics().is_none());
        assert_eq!(prediction.risk_category, RiskCategory::Medium);
        assert_eq!(prediction.risk_score, 4.6);
    }

    #[test]
    fn predict_risk_rejects_bad_deadline() {
        let mut ctx = scored_context();
        let err = ctx.predict_risk("next friday", 5, date(5, 10)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDateFormat { .. }));
        assert!(ctx.metrics().is_none());
    }

    #[test]
    fn open_tasks_are_sorted_by_deadline() {
        let mut ctx = scored_context();
        ctx.add_task(Task::new(4, "Math", "ps3", date(1, 15), date(1, 1)).with_difficulty(6))
            .unwrap();

        let predictions = ctx.predict_open_tasks(date(1, 10)).unwrap();

        let ids: Vec<u64> = predictions.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![4, 1, 2]);
        assert_eq!(predictions[0].1.days_remaining, 5);
    }

    #[test]
    fn student_serializes_with_legacy_name_key() {
        let json = serde_json::to_value(Student::new("Siti", "2201")).unwrap();
        assert_eq!(json["nama"], "Siti");
        let back: Student = serde_json::from_value(json).unwrap();
        assert_eq!(back.name, "Siti");
    }
}
