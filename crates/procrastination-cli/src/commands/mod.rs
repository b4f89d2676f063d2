pub mod activity;
pub mod analyze;
pub mod completions;
pub mod config;
pub mod predict;
pub mod report;
pub mod sample;
pub mod student;
pub mod task;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use procrastination_core::{AnalysisContext, Config, SnapshotFile};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded configuration plus the session stored in the snapshot file.
pub struct Session {
    pub config: Config,
    pub file: SnapshotFile,
    pub ctx: AnalysisContext,
}

impl Session {
    /// Load the snapshot named by `data`, `storage.data_file` or the default.
    pub fn open(data: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let path: PathBuf = match data {
            Some(path) => path.to_path_buf(),
            None => config.data_file_path()?,
        };
        let file = SnapshotFile::new(path);
        let (ctx, report) = file.load()?;

        if report.skipped() > 0 {
            eprintln!(
                "warning: skipped {} invalid record(s) in {}",
                report.skipped(),
                file.path().display()
            );
        }
        if report.metrics_discarded {
            eprintln!("warning: stored metrics were unreadable and have been dropped");
        }

        tracing::debug!(
            path = %file.path().display(),
            activities = ctx.store().list_activities().len(),
            tasks = ctx.store().list_tasks().len(),
            "session opened"
        );
        Ok(Self { config, file, ctx })
    }

    pub fn save(&self) -> CmdResult {
        self.file.save(&self.ctx, Local::now().naive_local())?;
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
