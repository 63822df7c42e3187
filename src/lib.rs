//! # Logger Factory
//!
//! Named loggers that fan records out to a console-out stream, a
//! console-err stream and any number of files, each filtered by its own
//! inclusive severity range.
//!
//! ## Features
//!
//! - **Idempotent setup**: a logger is assembled once per name; repeat
//!   requests only adjust its emit threshold
//! - **Level ranges**: every sink accepts an inclusive `[low, high]` band
//! - **Replace-once files**: a destination can be truncated the first time
//!   it is opened in a run and appended to afterwards
//! - **Configurable templates**: separate console and file record formats
//! - **Thread Safe**: one record is one locked write per sink

pub mod appenders;
pub mod core;
pub mod factory;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, FormatTemplate, LevelRange, LogEntry, LogLevel, Logger, LoggerError,
        LoggerMetrics, Result, Sink, SinkId, SinkKind, TimestampFormat,
    };
    pub use crate::factory::{
        Destination, FactoryConfig, LoggerFactory, LoggerFactoryBuilder, WriteMode,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use crate::core::{
    Appender, FormatTemplate, LevelRange, LogEntry, LogLevel, Logger, LoggerError, LoggerMetrics,
    Result, Sink, SinkId, SinkKind, TimestampFormat,
};
pub use factory::{Destination, FactoryConfig, LoggerFactory, LoggerFactoryBuilder, WriteMode};
