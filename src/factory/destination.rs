//! File destinations and the ordered registry that holds them

use crate::core::{LevelRange, LogLevel};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How a destination file is treated the first time it is provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Keep existing content and append
    #[default]
    Append,
    /// Truncate existing content once per factory lifetime, then append
    #[serde(alias = "replace")]
    ReplaceOnce,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Append => f.write_str("append"),
            WriteMode::ReplaceOnce => f.write_str("replace_once"),
        }
    }
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" => Ok(WriteMode::Append),
            "replace" | "replace_once" | "replace-once" => Ok(WriteMode::ReplaceOnce),
            _ => Err(format!("Invalid write mode: '{}'", s)),
        }
    }
}

/// A file sink specification
///
/// Defaults to the `[INFO, CRITICAL]` range in append mode.
///
/// ```
/// use logger_factory::{Destination, LevelRange, LogLevel, WriteMode};
///
/// let errors = Destination::new("logs/errors.log")
///     .with_range(LevelRange::new(LogLevel::WARN, LogLevel::CRITICAL))
///     .with_mode(WriteMode::ReplaceOnce);
/// assert_eq!(errors.mode(), WriteMode::ReplaceOnce);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    path: PathBuf,
    #[serde(default)]
    range: LevelRange,
    #[serde(default)]
    mode: WriteMode,
}

impl Destination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            range: LevelRange::FILE_DEFAULT,
            mode: WriteMode::Append,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: LevelRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_levels(self, min_level: LogLevel, max_level: LogLevel) -> Self {
        self.with_range(LevelRange::new(min_level, max_level))
    }

    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn range(&self) -> LevelRange {
        self.range
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }
}

/// Ordered sequence of registered destinations
///
/// Registration order is the attach order for every logger assembled
/// afterwards. Registering touches no files.
#[derive(Debug, Default)]
pub struct DestinationRegistry {
    entries: RwLock<Vec<Destination>>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, destination: Destination) {
        self.entries.write().push(destination);
    }

    /// Snapshot in registration order
    pub fn list(&self) -> Vec<Destination> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
