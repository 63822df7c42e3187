//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod format;
pub mod level_range;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use appender::{shared, Appender, SharedAppender};
pub use error::{LoggerError, Result};
pub use format::{FormatTemplate, DEFAULT_CONSOLE_FORMAT, DEFAULT_FILE_FORMAT};
pub use level_range::LevelRange;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use sink::{Sink, SinkId, SinkKind};
pub use timestamp::TimestampFormat;
