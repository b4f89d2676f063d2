//! Plain-text analysis report.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::context::{AnalysisContext, Student};
use crate::error::{CoreError, Result};
use crate::stats::{ProcrastinationMetrics, TimeDistribution};

const RULE: &str = "============================================================";

const FOLLOW_UP: [&str; 5] = [
    "Use the Pomodoro technique (25 minutes focus, 5 minutes rest)",
    "Write a daily to-do list with clear priorities",
    "Set internal deadlines 2-3 days before the real deadline",
    "Reduce distractions (mute notifications, use a website blocker)",
    "Track daily progress to stay accountable",
];

/// Everything that goes into one report.
#[derive(Debug, Clone)]
pub struct Report {
    pub student: Student,
    pub generated_at: NaiveDateTime,
    pub metrics: Option<ProcrastinationMetrics>,
    pub activity_count: usize,
    pub task_count: usize,
    pub distribution: Option<TimeDistribution>,
}

impl Report {
    /// Collect report data, scoring first if no metrics are cached.
    ///
    /// Missing tasks or activities leave the matching sections as `N/A`.
    pub fn build(ctx: &mut AnalysisContext, now: NaiveDateTime) -> Self {
        if ctx.metrics().is_none() {
            if let Err(e) = ctx.recompute() {
                tracing::debug!("report without metrics: {e}");
            }
        }

        let distribution = match ctx.analyze_time() {
            Ok(distribution) => Some(distribution),
            Err(CoreError::EmptyData(_)) => None,
            Err(e) => {
                tracing::warn!("time distribution skipped: {e}");
                None
            }
        };

        Self {
            student: ctx.student().clone(),
            generated_at: now,
            metrics: ctx.metrics().cloned(),
            activity_count: ctx.store().list_activities().len(),
            task_count: ctx.store().list_tasks().len(),
            distribution,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "PROCRASTINATION ANALYSIS REPORT")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "STUDENT:")?;
        writeln!(f, "Name : {}", self.student.name)?;
        writeln!(f, "NIM  : {}", self.student.nim)?;
        writeln!(f, "Date : {}", self.generated_at.format("%d/%m/%Y %H:%M"))?;
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "RESULTS:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        match &self.metrics {
            Some(metrics) => {
                writeln!(f, "Procrastination index: {:.2}/10", metrics.normalized_score)?;
                writeln!(
                    f,
                    "Raw score: {}/{}",
                    metrics.raw_score, metrics.max_possible_score
                )?;
                writeln!(f, "Tier: {}", metrics.tier.as_str())?;
            }
            None => {
                writeln!(f, "Procrastination index: N/A")?;
                writeln!(f, "Tier: N/A")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "FACTORS:")?;
        self.write_factors(f)?;

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "RECOMMENDATION:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        match &self.metrics {
            Some(metrics) => writeln!(f, "{}", metrics.recommendation)?,
            None => writeln!(f, "No recommendation yet (no tasks recorded).")?,
        }
        writeln!(f)?;
        writeln!(f, "RECORDS:")?;
        writeln!(f, "Activities logged: {}", self.activity_count)?;
        writeln!(f, "Tasks logged: {}", self.task_count)?;

        if let Some(distribution) = &self.distribution {
            if !distribution.percentage_by_category.is_empty() {
                writeln!(f)?;
                writeln!(f, "TIME DISTRIBUTION:")?;
                for (category, percent) in &distribution.percentage_by_category {
                    writeln!(f, "  {category}: {percent}%")?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "FOLLOW-UP:")?;
        for (i, advice) in FOLLOW_UP.iter().enumerate() {
            writeln!(f, "{}. {advice}", i + 1)?;
        }
        write!(f, "{RULE}")
    }
}

impl Report {
    fn write_factors(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(metrics) = &self.metrics else {
            return writeln!(f, "  No factors scored yet.");
        };
        let breakdown = &metrics.factor_breakdown;

        if let Some(lateness) = &breakdown.lateness {
            writeln!(f, "  LATENESS ({} pts):", lateness.score)?;
            writeln!(
                f,
                "    {} of {} tasks late ({}%)",
                lateness.late_count, lateness.total_tasks, lateness.late_percentage
            )?;
        }
        if let Some(lag) = &breakdown.completion_lag {
            writeln!(f, "  COMPLETION LAG ({} pts):", lag.score)?;
            writeln!(
                f,
                "    {} days on average over {} completed tasks",
                lag.mean_days, lag.completed_count
            )?;
        }
        if let Some(ratio) = &breakdown.entertainment_ratio {
            writeln!(f, "  ENTERTAINMENT RATIO ({} pts):", ratio.score)?;
            writeln!(
                f,
                "    entertainment {}h ({}%), productive {}h ({}%)",
                ratio.entertainment_hours,
                ratio.entertainment_percentage,
                ratio.productive_hours,
                ratio.productive_percentage
            )?;
        }
        if let Some(consistency) = &breakdown.consistency {
            writeln!(f, "  CONSISTENCY ({} pts):", consistency.score)?;
            writeln!(
                f,
                "    {} activities/day on average, std. deviation {} over {} days",
                consistency.daily_mean, consistency.daily_stddev, consistency.day_count
            )?;
        }
        Ok(())
    }
}

/// Render the report for the current session.
pub fn render_report(ctx: &mut AnalysisContext, now: NaiveDateTime) -> String {
    Report::build(ctx, now).to_string()
}

/// `laporan_prokrastinasi_<nim>_<YYYYMMDD_HHMMSS>.txt`
pub fn report_file_name(nim: &str, now: NaiveDateTime) -> String {
    format!("laporan_prokrastinasi_{nim}_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Write an already rendered report into `dir`, named by [`report_file_name`].
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_report(dir: &Path, nim: &str, text: &str, now: NaiveDateTime) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(nim, now));
    std::fs::write(&path, text)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}
