//! Destination provisioning
//!
//! Turns a [`Destination`] into a live file sink: parent directories are
//! created, replace-once destinations are truncated the first time their
//! path is seen, and every sink for one path shares a single open file.

use super::destination::{Destination, WriteMode};
use crate::appenders::FileAppender;
use crate::core::{
    shared, FormatTemplate, LoggerError, Result, SharedAppender, Sink, SinkId, SinkKind,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Default)]
pub struct Provisioner {
    /// Paths already handled in replace-once mode
    ledger: Mutex<HashSet<PathBuf>>,
    open_files: Mutex<HashMap<PathBuf, SharedAppender>>,
}

impl Provisioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provision(
        &self,
        destination: &Destination,
        id: SinkId,
        template: FormatTemplate,
    ) -> Result<Sink> {
        let path = resolve_path(destination.path())?;
        ensure_parent_dir(&path)?;

        if destination.mode() == WriteMode::ReplaceOnce {
            self.truncate_once(&path)?;
        }

        let appender = self.open(&path)?;
        Ok(Sink::new(
            id,
            SinkKind::File(path),
            destination.range(),
            template,
            appender,
        ))
    }

    /// Truncate `path` unless it is already in the ledger
    ///
    /// The path enters the ledger even when no file existed yet, so the file
    /// created by this provisioning is never truncated later. Returns whether
    /// existing content was removed.
    fn truncate_once(&self, path: &Path) -> Result<bool> {
        let mut ledger = self.ledger.lock();
        if ledger.contains(path) {
            return Ok(false);
        }

        // set_len keeps any handle already open on this path valid
        let truncated = match OpenOptions::new().write(true).open(path) {
            Ok(file) => {
                file.set_len(0)
                    .map_err(|e| LoggerError::io_operation("truncating log file", path, e))?;
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(LoggerError::io_operation("truncating log file", path, e)),
        };

        ledger.insert(path.to_path_buf());
        Ok(truncated)
    }

    fn open(&self, path: &Path) -> Result<SharedAppender> {
        let mut open_files = self.open_files.lock();
        if let Some(appender) = open_files.get(path) {
            return Ok(Arc::clone(appender));
        }

        let appender = shared(FileAppender::new(path)?);
        open_files.insert(path.to_path_buf(), Arc::clone(&appender));
        Ok(appender)
    }

    /// Whether `path` has been through replace-once handling
    pub fn is_replaced(&self, path: impl AsRef<Path>) -> bool {
        match resolve_path(path.as_ref()) {
            Ok(path) => self.ledger.lock().contains(&path),
            Err(_) => false,
        }
    }

    pub fn open_file_count(&self) -> usize {
        self.open_files.lock().len()
    }

    /// Forget the ledger and drop the cached file handles
    pub fn reset(&self) {
        self.ledger.lock().clear();
        self.open_files.lock().clear();
    }
}

/// Resolve relative paths against the current working directory
fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| LoggerError::io_operation("resolving working directory for", path, e))?;
    Ok(cwd.join(path))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| LoggerError::io_operation("creating log directory", parent, e)),
        _ => Ok(()),
    }
}
