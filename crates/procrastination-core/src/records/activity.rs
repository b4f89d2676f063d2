//! Self-logged student activities.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{check_hours, check_rating, parse_start_time};
use crate::error::{Result, ValidationError};

/// What the student spent the time on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    #[serde(alias = "belajar")]
    Study,
    #[serde(alias = "tugas")]
    Assignment,
    #[serde(alias = "istirahat")]
    Rest,
    #[serde(alias = "hiburan")]
    Entertainment,
    #[serde(alias = "lainnya")]
    Other,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 5] = [
        ActivityCategory::Study,
        ActivityCategory::Assignment,
        ActivityCategory::Rest,
        ActivityCategory::Entertainment,
        ActivityCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Study => "study",
            ActivityCategory::Assignment => "assignment",
            ActivityCategory::Rest => "rest",
            ActivityCategory::Entertainment => "entertainment",
            ActivityCategory::Other => "other",
        }
    }

    /// Study and assignment work count as productive time.
    pub fn is_productive(&self) -> bool {
        matches!(self, ActivityCategory::Study | ActivityCategory::Assignment)
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "study" | "belajar" => Ok(ActivityCategory::Study),
            "assignment" | "tugas" => Ok(ActivityCategory::Assignment),
            "rest" | "istirahat" => Ok(ActivityCategory::Rest),
            "entertainment" | "hiburan" => Ok(ActivityCategory::Entertainment),
            "other" | "lainnya" => Ok(ActivityCategory::Other),
            _ => Err(ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

fn default_difficulty() -> u8 {
    1
}

fn default_productivity() -> u8 {
    3
}

/// A single logged activity.
///
/// `start_time` is kept as entered; analysis parses it leniently and falls
/// back to noon (see [`Activity::start_time_or_noon`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(alias = "id_aktivitas")]
    pub id: u64,
    #[serde(alias = "jenis")]
    pub category: ActivityCategory,
    #[serde(alias = "deskripsi")]
    pub description: String,
    #[serde(alias = "durasi")]
    pub duration_hours: f64,
    #[serde(alias = "tanggal")]
    pub date: NaiveDate,
    #[serde(alias = "waktu_mulai")]
    pub start_time: String,
    #[serde(default, alias = "deadline_terkait")]
    pub related_deadline: Option<NaiveDate>,
    #[serde(default = "default_difficulty", alias = "tingkat_kesulitan")]
    pub difficulty: u8,
    #[serde(default = "default_productivity", alias = "produktivitas")]
    pub productivity: u8,
}

impl Activity {
    pub fn new(
        id: u64,
        category: ActivityCategory,
        description: impl Into<String>,
        duration_hours: f64,
        date: NaiveDate,
        start_time: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category,
            description: description.into(),
            duration_hours,
            date,
            start_time: start_time.into(),
            related_deadline: None,
            difficulty: default_difficulty(),
            productivity: default_productivity(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_productivity(mut self, productivity: u8) -> Self {
        self.productivity = productivity;
        self
    }

    pub fn with_related_deadline(mut self, deadline: NaiveDate) -> Self {
        self.related_deadline = Some(deadline);
        self
    }

    /// Check numeric ranges.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_hours("duration_hours", self.duration_hours)?;
        check_rating("difficulty", self.difficulty)?;
        check_rating("productivity", self.productivity)?;
        Ok(())
    }

    /// Parsed start time.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::MalformedTime`] if `start_time` is not `HH:MM`.
    pub fn start_time(&self) -> Result<NaiveTime> {
        parse_start_time(&self.start_time)
    }

    /// Parsed start time, or 12:00 when it does not parse.
    pub fn start_time_or_noon(&self) -> NaiveTime {
        match self.start_time() {
            Ok(time) => time,
            Err(e) => {
                tracing::debug!(
                    activity_id = self.id,
                    error = %e,
                    "defaulting start time to 12:00"
                );
                NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
            }
        }
    }
}
