//! In-memory, append-only record store.

use super::{Activity, Task};
use crate::error::ValidationError;

/// Ordered collections of activities and tasks for one session.
///
/// Records are validated on the way in and never edited or removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordStore {
    activities: Vec<Activity>,
    tasks: Vec<Task>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-validated records (e.g. a loaded snapshot).
    pub fn from_records(activities: Vec<Activity>, tasks: Vec<Task>) -> Self {
        Self { activities, tasks }
    }

    pub fn list_activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append an activity.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the activity fails validation.
    pub fn add_activity(&mut self, activity: Activity) -> Result<(), ValidationError> {
        activity.validate()?;
        tracing::debug!(id = activity.id, category = %activity.category, "activity added");
        self.activities.push(activity);
        Ok(())
    }

    /// Append a task.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the task fails validation.
    pub fn add_task(&mut self, task: Task) -> Result<(), ValidationError> {
        task.validate()?;
        tracing::debug!(id = task.id, status = %task.status, "task added");
        self.tasks.push(task);
        Ok(())
    }

    /// Generate the next available activity ID.
    ///
    /// # Errors
    /// Returns [`ValidationError::IdExhausted`] if an activity already holds `u64::MAX`.
    pub fn next_activity_id(&self) -> Result<u64, ValidationError> {
        next_id(self.activities.iter().map(|a| a.id), "activity")
    }

    /// Generate the next available task ID.
    ///
    /// # Errors
    /// Returns [`ValidationError::IdExhausted`] if a task already holds `u64::MAX`.
    pub fn next_task_id(&self) -> Result<u64, ValidationError> {
        next_id(self.tasks.iter().map(|t| t.id), "task")
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.tasks.is_empty()
    }

    /// Drop every record (used before regenerating sample data).
    pub fn clear(&mut self) {
        self.activities.clear();
        self.tasks.clear();
    }
}

fn next_id(ids: impl Iterator<Item = u64>, kind: &'static str) -> Result<u64, ValidationError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(ValidationError::IdExhausted(kind))
}
