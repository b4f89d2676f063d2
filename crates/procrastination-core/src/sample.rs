//! Reproducible sample data for trying out the analysis.

use chrono::{Days, NaiveDate};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::records::{Activity, ActivityCategory, RecordStore, Task, TaskStatus};

const START_TIMES: [&str; 6] = ["08:00", "10:00", "13:00", "15:00", "19:00", "21:00"];
const COURSES: [&str; 5] = ["Mathematics", "Physics", "Chemistry", "Biology", "History"];

/// Sample data generator.
///
/// Activities are spread over the 7 days starting two weeks before `today`,
/// cycling through categories and start times. Tasks have deadlines within
/// the next four weeks.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    /// Fixed seed for reproducible output, `None` for entropy
    pub seed: Option<u64>,
    pub activity_count: usize,
    pub task_count: usize,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self {
            seed: Some(42),
            activity_count: 30,
            task_count: 10,
        }
    }
}

impl SampleGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_counts(mut self, activity_count: usize, task_count: usize) -> Self {
        self.activity_count = activity_count;
        self.task_count = task_count;
        self
    }

    /// Generate a fresh record store. Every generated record passes validation.
    pub fn generate(&self, today: NaiveDate) -> RecordStore {
        let mut rng = match self.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        let activities = (0..self.activity_count)
            .map(|i| Self::activity(i, today, &mut rng))
            .collect();
        let tasks = (0..self.task_count)
            .map(|i| Self::task(i, today, &mut rng))
            .collect();

        tracing::debug!(
            activities = self.activity_count,
            tasks = self.task_count,
            seed = ?self.seed,
            "sample data generated"
        );
        RecordStore::from_records(activities, tasks)
    }

    fn activity(i: usize, today: NaiveDate, rng: &mut Mcg128Xsl64) -> Activity {
        let start = sub_days(today, 14);
        let category = ActivityCategory::ALL[i % ActivityCategory::ALL.len()];
        let duration = round1(rng.gen_range(0.5..3.0));
        let productivity = rng.gen_range(2..=8);
        let difficulty = if category.is_productive() {
            rng.gen_range(1..=7)
        } else {
            1
        };

        Activity::new(
            i as u64 + 1,
            category,
            format!("{category} activity {}", i + 1),
            duration,
            add_days(start, (i % 7) as u64),
            START_TIMES[i % START_TIMES.len()],
        )
        .with_difficulty(difficulty)
        .with_productivity(productivity)
    }

    fn task(i: usize, today: NaiveDate, rng: &mut Mcg128Xsl64) -> Task {
        let course = COURSES[i % COURSES.len()];
        let deadline = add_days(today, rng.gen_range(1..30));
        let assigned = sub_days(deadline, rng.gen_range(5..15));

        // done / in progress / pending 30% each, late 10%
        let status = match rng.gen_range(0..10) {
            0..=2 => TaskStatus::Done,
            3..=5 => TaskStatus::InProgress,
            6..=8 => TaskStatus::Pending,
            _ => TaskStatus::Late,
        };

        let task = Task::new(
            i as u64 + 1,
            course,
            format!("Task {} {course}", i + 1),
            deadline,
            assigned,
        )
        .with_status(status)
        .with_difficulty(rng.gen_range(2..=8))
        .with_estimated_hours(round1(rng.gen_range(3.0..10.0)));

        if status == TaskStatus::Done {
            task.completed_on(add_days(assigned, rng.gen_range(1..5)))
                .with_actual_hours(round1(rng.gen_range(2.0..8.0)))
        } else {
            task
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}
