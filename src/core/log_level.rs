//! Log level definitions
//!
//! Levels are ordinals, not a closed set: the named levels sit at fixed
//! values and custom levels created with [`LogLevel::new`] interleave
//! between them by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr", into = "LevelRepr")]
pub struct LogLevel(u8);

impl LogLevel {
    pub const DEBUG: LogLevel = LogLevel(10);
    pub const INFO: LogLevel = LogLevel(20);
    pub const WARN: LogLevel = LogLevel(30);
    pub const ERROR: LogLevel = LogLevel(40);
    pub const CRITICAL: LogLevel = LogLevel(50);

    /// Create a level from a raw ordinal
    pub const fn new(value: u8) -> Self {
        LogLevel(value)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Name of a named level, `None` for custom ordinals
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            LogLevel::DEBUG => Some("DEBUG"),
            LogLevel::INFO => Some("INFO"),
            LogLevel::WARN => Some("WARN"),
            LogLevel::ERROR => Some("ERROR"),
            LogLevel::CRITICAL => Some("CRITICAL"),
            _ => None,
        }
    }

    /// Terminal color by band, so custom levels pick up their neighbours' color
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self.0 {
            0..=10 => Blue,
            11..=20 => Green,
            21..=30 => Yellow,
            31..=40 => Red,
            _ => BrightRed,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::INFO
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            // `pad` so width/alignment specs apply to level names
            Some(name) => f.pad(name),
            None => f.pad(&format!("Level {}", self.0)),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::DEBUG),
            "INFO" => Ok(LogLevel::INFO),
            "WARN" | "WARNING" => Ok(LogLevel::WARN),
            "ERROR" => Ok(LogLevel::ERROR),
            "CRITICAL" | "FATAL" => Ok(LogLevel::CRITICAL),
            _ => s
                .parse::<u8>()
                .map(LogLevel::new)
                .map_err(|_| format!("Invalid log level: '{}'", s)),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Value(u8),
    Name(String),
}

impl TryFrom<LevelRepr> for LogLevel {
    type Error = String;

    fn try_from(repr: LevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelRepr::Value(value) => Ok(LogLevel::new(value)),
            LevelRepr::Name(name) => name.parse(),
        }
    }
}

impl From<LogLevel> for LevelRepr {
    fn from(level: LogLevel) -> Self {
        match level.name() {
            Some(name) => LevelRepr::Name(name.to_string()),
            None => LevelRepr::Value(level.0),
        }
    }
}
