//! JSON snapshot of a whole analysis session.
//!
//! The document shape is
//!
//! ```json
//! {
//!   "mahasiswa": { "nama": "...", "nim": "..." },
//!   "aktivitas": [ ... ],
//!   "tugas": [ ... ],
//!   "metrik_prokrastinasi": { ... },
//!   "tanggal_update": "2024-05-10 14:03:22"
//! }
//! ```
//!
//! Records are decoded one by one so a single bad entry does not make the
//! rest of the file unreadable.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::config::DEFAULT_DATA_FILE;
use super::data_dir;
use crate::context::{AnalysisContext, Student};
use crate::error::{CoreError, Result, ValidationError};
use crate::records::{Activity, RecordStore, Task};
use crate::stats::ProcrastinationMetrics;

/// Format of the `tanggal_update` stamp.
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const KEY_STUDENT: &str = "mahasiswa";
const KEY_ACTIVITIES: &str = "aktivitas";
const KEY_TASKS: &str = "tugas";
const KEY_METRICS: &str = "metrik_prokrastinasi";
const KEY_UPDATED_AT: &str = "tanggal_update";

/// What happened while loading a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded_activities: usize,
    pub loaded_tasks: usize,
    pub skipped_activities: usize,
    pub skipped_tasks: usize,
    /// A metrics object was present but could not be decoded.
    pub metrics_discarded: bool,
    pub updated_at: Option<String>,
    /// The file did not exist and an empty session was returned.
    pub missing: bool,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.skipped_activities + self.skipped_tasks
    }
}

/// Snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/data_prokrastinasi.json`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(DEFAULT_DATA_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session. A missing file yields an empty session.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(&self) -> Result<(AnalysisContext, LoadReport)> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no snapshot yet, starting empty");
                let report = LoadReport {
                    missing: true,
                    ..LoadReport::default()
                };
                return Ok((AnalysisContext::default(), report));
            }
            Err(e) => return Err(e.into()),
        };

        let (ctx, report) = from_json(&content)?;
        tracing::info!(
            path = %self.path.display(),
            activities = report.loaded_activities,
            tasks = report.loaded_tasks,
            skipped = report.skipped(),
            "snapshot loaded"
        );
        Ok((ctx, report))
    }

    /// Write the session, replacing the file atomically.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, ctx: &AnalysisContext, now: NaiveDateTime) -> Result<()> {
        let content = to_json(ctx, now)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::info!(
            path = %self.path.display(),
            activities = ctx.store().list_activities().len(),
            tasks = ctx.store().list_tasks().len(),
            "snapshot saved"
        );
        Ok(())
    }
}

/// Render the snapshot document.
pub fn to_json(ctx: &AnalysisContext, now: NaiveDateTime) -> Result<String> {
    let metrics = match ctx.metrics() {
        Some(metrics) => serde_json::to_value(metrics)?,
        None => json!({}),
    };

    let doc = json!({
        KEY_STUDENT: ctx.student(),
        KEY_ACTIVITIES: ctx.store().list_activities(),
        KEY_TASKS: ctx.store().list_tasks(),
        KEY_METRICS: metrics,
        KEY_UPDATED_AT: now.format(UPDATED_AT_FORMAT).to_string(),
    });

    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse a snapshot document, skipping records that fail to decode or validate.
///
/// # Errors
/// Returns [`CoreError::Json`] if the text is not JSON at all.
pub fn from_json(content: &str) -> Result<(AnalysisContext, LoadReport)> {
    let doc: Value = serde_json::from_str(content)?;
    let mut report = LoadReport::default();

    let student = match doc.get(KEY_STUDENT) {
        Some(value) => serde_json::from_value::<Student>(value.clone()).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable student entry: {e}");
            Student::default()
        }),
        None => Student::default(),
    };

    let (activities, skipped_activities) =
        decode_records::<Activity>(&doc, KEY_ACTIVITIES, Activity::validate);
    let (tasks, skipped_tasks) = decode_records::<Task>(&doc, KEY_TASKS, Task::validate);

    let metrics = match doc.get(KEY_METRICS) {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        Some(value) => match serde_json::from_value::<ProcrastinationMetrics>(value.clone()) {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                tracing::warn!("discarding unreadable metrics snapshot: {e}");
                report.metrics_discarded = true;
                None
            }
        },
    };

    report.loaded_activities = activities.len();
    report.loaded_tasks = tasks.len();
    report.skipped_activities = skipped_activities;
    report.skipped_tasks = skipped_tasks;
    report.updated_at = doc
        .get(KEY_UPDATED_AT)
        .and_then(Value::as_str)
        .map(str::to_string);

    let store = RecordStore::from_records(activities, tasks);
    let ctx = AnalysisContext::with_records(student, store, metrics);
    Ok((ctx, report))
}

fn decode_records<T: DeserializeOwned>(
    doc: &Value,
    key: &str,
    validate: impl Fn(&T) -> std::result::Result<(), ValidationError>,
) -> (Vec<T>, usize) {
    let Some(entries) = doc.get(key).and_then(Value::as_array) else {
        return (Vec::new(), 0);
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.iter().enumerate() {
        let decoded = serde_json::from_value::<T>(entry.clone())
            .map_err(CoreError::from)
            .and_then(|record| validate(&record).map(|()| record).map_err(CoreError::from));
        match decoded {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(key, index, "skipping invalid record: {e}");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}
