//! # Procrastination Core Library
//!
//! This library provides the analysis engine behind the procrastination
//! detector. Students log activities and assignments; the engine turns those
//! logs into time-distribution statistics, a composite procrastination score
//! and per-deadline risk predictions. The `procrastination-cli` binary is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Records**: validated activity/task records in an append-only store
//! - **Stats**: time-distribution analyzer, multi-factor scorer, risk predictor
//!   and chart-ready overview
//! - **Context**: one analysis session with an explicit metrics cache
//! - **Storage**: JSON data snapshot and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`AnalysisContext`]: Session state and entry point for every analysis
//! - [`ProcrastinationScorer`]: Pure scoring function over tasks and activities
//! - [`RiskPredictor`]: Deadline risk from score, difficulty and urgency
//! - [`SnapshotFile`]: Load/save of the session document
//! - [`Config`]: Application configuration management

pub mod context;
pub mod error;
pub mod records;
pub mod report;
pub mod sample;
pub mod stats;
pub mod storage;

pub use context::{AnalysisContext, Student, NEUTRAL_SCORE};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use records::{parse_date, Activity, ActivityCategory, RecordStore, Task, TaskStatus};
pub use report::{render_report, report_file_name, write_report, Report};
pub use sample::SampleGenerator;
pub use stats::{
    ActivityOverview, DayPeriod, ProcrastinationMetrics, ProcrastinationScorer, RiskCategory,
    RiskPrediction, RiskPredictor, Tier, TimeDistribution, TimeDistributionAnalyzer,
};
pub use storage::{data_dir, Config, LoadReport, SnapshotFile};
