//! On-disk state: TOML configuration and the JSON data snapshot.

mod config;
pub mod snapshot;

pub use config::Config;
pub use snapshot::{LoadReport, SnapshotFile};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/procrastination[-dev]/` based on PROCRASTINATION_ENV.
///
/// Set PROCRASTINATION_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PROCRASTINATION_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("procrastination-dev")
    } else {
        base_dir.join("procrastination")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
