//! Named logger fanning records out to its sinks

use super::{
    error::Result, log_entry::LogEntry, log_level::LogLevel, metrics::LoggerMetrics, sink::Sink,
};
use parking_lot::RwLock;
use std::panic::Location;

/// A named logger with a fixed set of sinks
///
/// The sink list is set at construction and never changes; only the emit
/// threshold can be adjusted afterwards. Records go to this logger's own
/// sinks and nowhere else.
pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    sinks: Vec<Sink>,
    /// Metrics for observability (emitted, suppressed, failed writes)
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>, sinks: Vec<Sink>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::INFO),
            sinks,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    /// Records below `level` are dropped before any sink sees them
    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log a message, tagged with the caller's source location
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let location = Location::caller();
        self.log_at(level, message, location.file(), location.line());
    }

    /// Log with the module path of the call site; used by the logging macros
    #[track_caller]
    pub fn log_in_module(&self, level: LogLevel, message: impl AsRef<str>, module_path: &str) {
        if !self.admit(level) {
            return;
        }
        let location = Location::caller();
        let entry = LogEntry::new(self.name.as_str(), level, message.as_ref())
            .with_location(location.file(), location.line())
            .with_module_path(module_path);
        self.dispatch(&entry);
    }

    /// Log with a caller-supplied location tag instead of the call site
    pub fn log_at(&self, level: LogLevel, message: impl AsRef<str>, file: &str, line: u32) {
        if !self.admit(level) {
            return;
        }
        let entry =
            LogEntry::new(self.name.as_str(), level, message.as_ref()).with_location(file, line);
        self.dispatch(&entry);
    }

    fn admit(&self, level: LogLevel) -> bool {
        if self.is_enabled(level) {
            self.metrics.record_emitted();
            true
        } else {
            self.metrics.record_suppressed();
            false
        }
    }

    /// Write to every sink whose range accepts the record
    ///
    /// A failing sink is reported on stderr and does not stop delivery to
    /// the remaining sinks.
    fn dispatch(&self, entry: &LogEntry) {
        for sink in self.sinks.iter().filter(|sink| sink.accepts(entry.level)) {
            match sink.write(entry) {
                Ok(()) => {
                    self.metrics.record_sink_write();
                }
                Err(e) => {
                    self.metrics.record_write_failure();
                    eprintln!(
                        "[LOGGER ERROR] Logger '{}' sink {} failed: {}",
                        self.name,
                        sink.kind(),
                        e
                    );
                }
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        for sink in &self.sinks {
            sink.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::DEBUG, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::INFO, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::WARN, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::ERROR, message);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::CRITICAL, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("sinks", &self.sinks)
            .finish()
    }
}
