//! Inclusive severity range used to filter what reaches a sink

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[low, high]` severity bounds
///
/// Bounds are not validated: a range with `low > high` is accepted and
/// simply matches nothing. Use [`LevelRange::is_empty`] to detect one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelRange {
    pub low: LogLevel,
    pub high: LogLevel,
}

impl LevelRange {
    /// `[DEBUG, INFO]`, routed to stdout by default
    pub const CONSOLE_OUT: LevelRange = LevelRange::new(LogLevel::DEBUG, LogLevel::INFO);
    /// `[WARN, CRITICAL]`, routed to stderr by default
    pub const CONSOLE_ERR: LevelRange = LevelRange::new(LogLevel::WARN, LogLevel::CRITICAL);
    /// `[INFO, CRITICAL]`, the default for file destinations
    pub const FILE_DEFAULT: LevelRange = LevelRange::new(LogLevel::INFO, LogLevel::CRITICAL);

    pub const fn new(low: LogLevel, high: LogLevel) -> Self {
        Self { low, high }
    }

    /// Range covering every possible level
    pub const fn all() -> Self {
        Self::new(LogLevel::new(u8::MIN), LogLevel::new(u8::MAX))
    }

    #[inline]
    pub fn contains(&self, level: LogLevel) -> bool {
        self.low <= level && level <= self.high
    }

    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::FILE_DEFAULT
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
