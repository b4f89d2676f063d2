//! Per-deadline procrastination risk.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::round2;
use crate::error::Result;
use crate::records::{check_rating, parse_date};

/// Urgency bucket for a single upcoming task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    #[serde(alias = "RENDAH")]
    Low,
    #[serde(alias = "SEDANG")]
    Medium,
    #[serde(alias = "TINGGI")]
    High,
    #[serde(alias = "SANGAT TINGGI")]
    VeryHigh,
}

impl RiskCategory {
    /// Bucket an adjusted risk in `[0, 1]`. Bounds are exclusive.
    pub fn from_risk(risk: f64) -> Self {
        if risk > 0.7 {
            RiskCategory::VeryHigh
        } else if risk > 0.5 {
            RiskCategory::High
        } else if risk > 0.3 {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::High => "HIGH",
            RiskCategory::VeryHigh => "VERY_HIGH",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            RiskCategory::VeryHigh => "Start working on it today! Make a daily plan.",
            RiskCategory::High => "Set an internal deadline earlier than the real one.",
            RiskCategory::Medium => "Break the task down into small subtasks.",
            RiskCategory::Low => "Keep working on it consistently.",
        }
    }

    /// Share of the remaining days expected to pass before the task is done.
    pub fn completion_fraction(&self) -> f64 {
        match self {
            RiskCategory::VeryHigh => 0.2,
            RiskCategory::High => 0.4,
            RiskCategory::Medium => 0.6,
            RiskCategory::Low => 0.8,
        }
    }
}

/// Output of [`RiskPredictor::predict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub deadline: NaiveDate,
    /// Never negative; past deadlines clamp to 0
    pub days_remaining: i64,
    pub difficulty: u8,
    /// Adjusted risk scaled to 0-10, 2 decimals
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub action: String,
    pub predicted_completion: NaiveDate,
}

/// Combines a procrastination score with urgency and difficulty.
#[derive(Debug, Clone, Default)]
pub struct RiskPredictor;

impl RiskPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Predict risk for a deadline given as `YYYY-MM-DD` text.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::InvalidDateFormat`] for a bad deadline and
    /// [`crate::CoreError::Validation`] for a difficulty outside 1-10.
    pub fn predict(
        &self,
        normalized_score: f64,
        deadline: &str,
        difficulty: u8,
        today: NaiveDate,
    ) -> Result<RiskPrediction> {
        let deadline = parse_date(deadline)?;
        self.predict_for_date(normalized_score, deadline, difficulty, today)
    }

    /// Same as [`predict`](Self::predict) with an already-parsed deadline.
    pub fn predict_for_date(
        &self,
        normalized_score: f64,
        deadline: NaiveDate,
        difficulty: u8,
        today: NaiveDate,
    ) -> Result<RiskPrediction> {
        check_rating("difficulty", difficulty)?;

        let days_remaining = (deadline - today).num_days().max(0);
        let base = Self::base_risk(normalized_score, difficulty);
        let adjusted = Self::adjust_for_urgency(base, days_remaining);
        let risk_category = RiskCategory::from_risk(adjusted);
        let predicted_completion = Self::predicted_completion(today, days_remaining, risk_category);

        tracing::debug!(
            %deadline,
            days_remaining,
            base,
            adjusted,
            category = risk_category.as_str(),
            "risk predicted"
        );

        Ok(RiskPrediction {
            deadline,
            days_remaining,
            difficulty,
            risk_score: round2(adjusted * 10.0),
            risk_category,
            action: risk_category.action().to_string(),
            predicted_completion,
        })
    }

    /// 60% procrastination score, 40% difficulty, both scaled to `[0, 1]`.
    pub fn base_risk(normalized_score: f64, difficulty: u8) -> f64 {
        normalized_score / 10.0 * 0.6 + f64::from(difficulty) / 10.0 * 0.4
    }

    /// Scale up risk for deadlines under a week away, capped at 1.
    pub fn adjust_for_urgency(base: f64, days_remaining: i64) -> f64 {
        let factor = if days_remaining < 3 {
            1.5
        } else if days_remaining < 7 {
            1.2
        } else {
            1.0
        };
        (base * factor).min(1.0)
    }

    pub fn predicted_completion(
        today: NaiveDate,
        days_remaining: i64,
        category: RiskCategory,
    ) -> NaiveDate {
        if days_remaining <= 0 {
            return today;
        }
        let days = ((days_remaining as f64 * category.completion_fraction()).floor() as u64).max(1);
        today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
    }
}
