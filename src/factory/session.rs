//! Default per-run log layout

use super::destination::{Destination, WriteMode};
use crate::core::{LogLevel, LoggerError, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// strftime pattern for session directory names, e.g. `20250108T103045`
pub const SESSION_DIR_FORMAT: &str = "%Y%m%dT%H%M%S";

pub const ERRORS_LOG: &str = "Latest_ERRORS.log";
pub const LATEST_LOG: &str = "Latest.log";
pub const DEBUG_LOG: &str = "Debug.log";

/// Create `<root>/<timestamp>.log/` and return its path
pub fn create_session_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(format!("{}.log", Local::now().format(SESSION_DIR_FORMAT)));
    fs::create_dir_all(&dir)
        .map_err(|e| LoggerError::io_operation("creating session directory", &dir, e))?;
    Ok(dir)
}

pub fn default_destinations(session_dir: &Path) -> Vec<Destination> {
    vec![
        Destination::new(session_dir.join(ERRORS_LOG))
            .with_levels(LogLevel::WARN, LogLevel::CRITICAL)
            .with_mode(WriteMode::ReplaceOnce),
        Destination::new(session_dir.join(LATEST_LOG))
            .with_levels(LogLevel::DEBUG, LogLevel::CRITICAL)
            .with_mode(WriteMode::ReplaceOnce),
        Destination::new(session_dir.join(DEBUG_LOG))
            .with_levels(LogLevel::DEBUG, LogLevel::CRITICAL)
            .with_mode(WriteMode::Append),
    ]
}
