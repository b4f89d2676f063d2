//! Activity and task records plus the in-memory record store.
//!
//! Records are fixed-shape structs. Enum fields are validated when parsed
//! from text, and [`Activity::validate`] / [`Task::validate`] check numeric
//! ranges before a record enters the [`RecordStore`].

mod activity;
mod store;
mod task;

pub use activity::{Activity, ActivityCategory};
pub use store::RecordStore;
pub use task::{Task, TaskStatus};

use chrono::{NaiveDate, NaiveTime};

use crate::error::{CoreError, Result, ValidationError};

/// Date format used for every persisted and user-entered date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format for activity start times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`CoreError::InvalidDateFormat`] when the text is not a valid date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDateFormat {
        input: input.to_string(),
    })
}

/// Parse an `HH:MM` start time.
///
/// # Errors
/// Returns [`CoreError::MalformedTime`] when the text is not a valid time.
pub fn parse_start_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), TIME_FORMAT).map_err(|_| CoreError::MalformedTime {
        input: input.to_string(),
    })
}

/// Check that a 1-10 rating is in range.
pub(crate) fn check_rating(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if (1..=10).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange {
            field,
            value: i64::from(value),
        })
    }
}

/// Check that an hour count is finite and non-negative.
pub(crate) fn check_hours(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date("2024-01-20").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(parse_date(" 2024-02-29 ").unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        for input in ["20/01/2024", "2024-13-01", "2023-02-29", "", "tomorrow"] {
            let err = parse_date(input).unwrap_err();
            assert!(matches!(err, CoreError::InvalidDateFormat { .. }), "{input}");
        }
    }

    #[test]
    fn parse_start_time_handles_valid_and_invalid_input() {
        assert_eq!(parse_start_time("08:30").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(parse_start_time("23:59").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(matches!(parse_start_time("25:00"), Err(CoreError::MalformedTime { .. })));
        assert!(matches!(parse_start_time("evening"), Err(CoreError::MalformedTime { .. })));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(check_rating("difficulty", 1).is_ok());
        assert!(check_rating("difficulty", 10).is_ok());
        assert!(check_rating("difficulty", 0).is_err());
        assert!(check_rating("productivity", 11).is_err());
    }

    #[test]
    fn hours_must_be_finite_and_non_negative() {
        assert!(check_hours("duration_hours", 0.0).is_ok());
        assert!(check_hours("duration_hours", 2.5).is_ok());
        assert!(check_hours("duration_hours", -0.5).is_err());
        assert!(check_hours("duration_hours", f64::NAN).is_err());
    }
}
