//! Assignments and their completion state.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{check_hours, check_rating};
use crate::error::ValidationError;

/// Task status. Set once when the task is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[serde(alias = "belum")]
    Pending,
    #[serde(alias = "dikerjakan")]
    InProgress,
    #[serde(alias = "selesai")]
    Done,
    #[serde(alias = "terlambat")]
    Late,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Late,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Late => "late",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" | "belum" => Ok(TaskStatus::Pending),
            "in_progress" | "dikerjakan" => Ok(TaskStatus::InProgress),
            "done" | "selesai" => Ok(TaskStatus::Done),
            "late" | "terlambat" => Ok(TaskStatus::Late),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

fn default_difficulty() -> u8 {
    3
}

fn default_estimated_hours() -> f64 {
    5.0
}

/// An assignment for a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "id_tugas")]
    pub id: u64,
    #[serde(alias = "mata_kuliah")]
    pub course: String,
    #[serde(alias = "deskripsi")]
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(alias = "tanggal_diberikan")]
    pub date_assigned: NaiveDate,
    pub status: TaskStatus,
    /// Required for `done`, allowed for `late`, absent otherwise.
    #[serde(default, alias = "tanggal_selesai")]
    pub date_completed: Option<NaiveDate>,
    #[serde(default = "default_difficulty", alias = "tingkat_kesulitan")]
    pub difficulty: u8,
    #[serde(default = "default_estimated_hours", alias = "estimasi_waktu")]
    pub estimated_hours: f64,
    #[serde(default, alias = "waktu_aktual")]
    pub actual_hours: Option<f64>,
}

impl Task {
    pub fn new(
        id: u64,
        course: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDate,
        date_assigned: NaiveDate,
    ) -> Self {
        Self {
            id,
            course: course.into(),
            description: description.into(),
            deadline,
            date_assigned,
            status: TaskStatus::Pending,
            date_completed: None,
            difficulty: default_difficulty(),
            estimated_hours: default_estimated_hours(),
            actual_hours: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the task done on `date`.
    pub fn completed_on(mut self, date: NaiveDate) -> Self {
        self.status = TaskStatus::Done;
        self.date_completed = Some(date);
        self
    }

    pub fn with_date_completed(mut self, date: NaiveDate) -> Self {
        self.date_completed = Some(date);
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_actual_hours(mut self, hours: f64) -> Self {
        self.actual_hours = Some(hours);
        self
    }

    /// Whole days between assignment and completion, if completed.
    pub fn completion_lag_days(&self) -> Option<i64> {
        self.date_completed
            .map(|completed| (completed - self.date_assigned).num_days())
    }

    /// Check numeric ranges and the completion-date invariant.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_rating("difficulty", self.difficulty)?;
        check_hours("estimated_hours", self.estimated_hours)?;
        if let Some(actual) = self.actual_hours {
            check_hours("actual_hours", actual)?;
        }

        match (self.status, self.date_completed) {
            (TaskStatus::Done, None) => Err(ValidationError::CompletionDate {
                id: self.id,
                message: "status done requires date_completed",
            }),
            (TaskStatus::Pending | TaskStatus::InProgress, Some(_)) => {
                Err(ValidationError::CompletionDate {
                    id: self.id,
                    message: "date_completed is only allowed for done or late tasks",
                })
            }
            _ => Ok(()),
        }
    }
}
