//! Logger factory
//!
//! [`LoggerFactory`] owns everything needed to build loggers: the console
//! level ranges and templates, the ordered file destinations, the
//! provisioner with its truncation ledger, and the registry of loggers
//! already assembled. A logger is assembled once per name; later requests
//! for the same name only change its emit threshold.
//!
//! ```no_run
//! use logger_factory::prelude::*;
//!
//! # fn main() -> logger_factory::Result<()> {
//! let factory = LoggerFactory::new();
//! factory.add_output_file("logs/app.log", LogLevel::DEBUG, LogLevel::CRITICAL, WriteMode::ReplaceOnce);
//!
//! let logger = factory.get_logger("pipeline")?;
//! logger.info("started");
//!
//! // Same sinks, lower threshold
//! let logger = factory.get_logger_with_level("pipeline", LogLevel::DEBUG)?;
//! logger.debug("verbose now");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod destination;
pub mod provisioner;
pub mod session;

pub use config::FactoryConfig;
pub use destination::{Destination, DestinationRegistry, WriteMode};
pub use provisioner::Provisioner;

use crate::appenders::ConsoleAppender;
use crate::core::{
    shared, Appender, FormatTemplate, LevelRange, LogLevel, Logger, Result, SharedAppender, Sink,
    SinkId, SinkKind, TimestampFormat,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Settings read at assembly time; changes affect only loggers assembled later
#[derive(Debug, Clone)]
struct Settings {
    console_out: LevelRange,
    console_err: LevelRange,
    console_format: FormatTemplate,
    file_format: FormatTemplate,
    timestamp_format: TimestampFormat,
    console_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console_out: LevelRange::CONSOLE_OUT,
            console_err: LevelRange::CONSOLE_ERR,
            console_format: FormatTemplate::console_default(),
            file_format: FormatTemplate::file_default(),
            timestamp_format: TimestampFormat::default(),
            console_colors: false,
        }
    }
}

pub struct LoggerFactory {
    settings: RwLock<Settings>,
    destinations: DestinationRegistry,
    provisioner: Provisioner,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    console_out: SharedAppender,
    console_err: SharedAppender,
    next_sink_id: AtomicU64,
}

impl LoggerFactory {
    /// Factory writing console output to the process stdout and stderr
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LoggerFactoryBuilder {
        LoggerFactoryBuilder::new()
    }

    #[must_use]
    pub fn from_config(config: FactoryConfig) -> Self {
        let mut builder = Self::builder()
            .console_out_range(config.console_out)
            .console_err_range(config.console_err)
            .console_format(config.console_format)
            .file_format(config.file_format)
            .timestamp_format(config.timestamp_format)
            .console_colors(config.console_colors);
        for destination in config.destinations {
            builder = builder.destination(destination);
        }
        builder.build()
    }

    /// Register a file destination for every logger assembled from now on
    pub fn register(&self, destination: Destination) {
        self.destinations.register(destination);
    }

    /// Register `path` with an inclusive `[min_level, max_level]` filter
    pub fn add_output_file(
        &self,
        path: impl Into<PathBuf>,
        min_level: LogLevel,
        max_level: LogLevel,
        mode: WriteMode,
    ) {
        self.register(
            Destination::new(path)
                .with_levels(min_level, max_level)
                .with_mode(mode),
        );
    }

    /// Registered destinations in attach order
    pub fn destinations(&self) -> Vec<Destination> {
        self.destinations.list()
    }

    pub fn set_console_out_range(&self, low: LogLevel, high: LogLevel) {
        self.settings.write().console_out = LevelRange::new(low, high);
    }

    pub fn set_console_err_range(&self, low: LogLevel, high: LogLevel) {
        self.settings.write().console_err = LevelRange::new(low, high);
    }

    /// Replace the console template; an invalid template leaves the old one
    pub fn set_console_format(&self, template: &str) -> Result<()> {
        let template = FormatTemplate::parse(template)?;
        self.settings.write().console_format = template;
        Ok(())
    }

    /// Replace the file template; an invalid template leaves the old one
    pub fn set_file_format(&self, template: &str) -> Result<()> {
        let template = FormatTemplate::parse(template)?;
        self.settings.write().file_format = template;
        Ok(())
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        self.settings.write().timestamp_format = format;
    }

    pub fn set_console_colors(&self, enabled: bool) {
        self.settings.write().console_colors = enabled;
    }

    /// Get the logger named `name` with an `INFO` emit threshold
    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>> {
        self.get_logger_with_level(name, LogLevel::INFO)
    }

    /// Get the logger named `name`, assembling it on first request
    ///
    /// Repeat requests return the same logger with its threshold set to
    /// `level`; sinks are never attached twice. If assembly fails the error
    /// is returned and the name stays unassembled.
    pub fn get_logger_with_level(&self, name: &str, level: LogLevel) -> Result<Arc<Logger>> {
        // Held across assembly so one name is assembled at most once
        let mut loggers = self.loggers.lock();

        if let Some(logger) = loggers.get(name) {
            logger.set_min_level(level);
            return Ok(Arc::clone(logger));
        }

        let logger = Arc::new(self.assemble(name)?);
        logger.set_min_level(level);
        loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    fn assemble(&self, name: &str) -> Result<Logger> {
        let settings = self.settings.read().clone();
        let console_template = settings
            .console_format
            .with_timestamp_format(settings.timestamp_format.clone());
        let file_template = settings
            .file_format
            .with_timestamp_format(settings.timestamp_format);

        let destinations = self.destinations.list();
        let mut sinks = Vec::with_capacity(destinations.len() + 2);

        sinks.push(
            Sink::new(
                self.next_sink_id(),
                SinkKind::ConsoleOut,
                settings.console_out,
                console_template.clone(),
                Arc::clone(&self.console_out),
            )
            .with_colors(settings.console_colors),
        );
        sinks.push(
            Sink::new(
                self.next_sink_id(),
                SinkKind::ConsoleErr,
                settings.console_err,
                console_template,
                Arc::clone(&self.console_err),
            )
            .with_colors(settings.console_colors),
        );

        for destination in &destinations {
            let sink =
                self.provisioner
                    .provision(destination, self.next_sink_id(), file_template.clone())?;
            sinks.push(sink);
        }

        Ok(Logger::new(name, sinks))
    }

    fn next_sink_id(&self) -> SinkId {
        SinkId(self.next_sink_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_assembled(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Names of every assembled logger, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether `path` has already been truncated or claimed in replace-once mode
    pub fn is_replaced(&self, path: impl AsRef<Path>) -> bool {
        self.provisioner.is_replaced(path)
    }

    /// Create a timestamped session directory under `root` and register
    /// the default destinations inside it
    ///
    /// Registers `Latest_ERRORS.log` (`[WARN, CRITICAL]`, replace-once),
    /// `Latest.log` (`[DEBUG, CRITICAL]`, replace-once) and `Debug.log`
    /// (`[DEBUG, CRITICAL]`, append). Returns the session directory.
    pub fn install_default_destinations(&self, root: impl AsRef<Path>) -> Result<PathBuf> {
        let session_dir = session::create_session_dir(root.as_ref())?;
        for destination in session::default_destinations(&session_dir) {
            self.register(destination);
        }
        Ok(session_dir)
    }

    /// Return to the state of a freshly built factory
    ///
    /// Clears destinations, the truncation ledger, open files and assembled
    /// loggers, and restores default ranges and templates. Loggers handed
    /// out earlier keep working with the sinks they already hold.
    pub fn reset(&self) {
        let mut loggers = self.loggers.lock();
        loggers.clear();
        self.destinations.clear();
        self.provisioner.reset();
        *self.settings.write() = Settings::default();
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`LoggerFactory`]
///
/// # Example
/// ```
/// use logger_factory::prelude::*;
///
/// let stdout = MemoryAppender::new("stdout");
/// let factory = LoggerFactory::builder()
///     .console_out_appender(stdout.clone())
///     .console_err_range(LevelRange::new(LogLevel::ERROR, LogLevel::CRITICAL))
///     .destination(Destination::new("app.log"))
///     .build();
/// assert_eq!(factory.destinations().len(), 1);
/// ```
pub struct LoggerFactoryBuilder {
    settings: Settings,
    destinations: Vec<Destination>,
    console_out: Option<SharedAppender>,
    console_err: Option<SharedAppender>,
}

impl LoggerFactoryBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            destinations: Vec::new(),
            console_out: None,
            console_err: None,
        }
    }

    /// Replace stdout as the console-out stream
    #[must_use = "builder methods return a new value"]
    pub fn console_out_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.console_out = Some(shared(appender));
        self
    }

    /// Replace stderr as the console-err stream
    #[must_use = "builder methods return a new value"]
    pub fn console_err_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.console_err = Some(shared(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_out_range(mut self, range: LevelRange) -> Self {
        self.settings.console_out = range;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_err_range(mut self, range: LevelRange) -> Self {
        self.settings.console_err = range;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_format(mut self, template: FormatTemplate) -> Self {
        self.settings.console_format = template;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_format(mut self, template: FormatTemplate) -> Self {
        self.settings.file_format = template;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.settings.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, enabled: bool) -> Self {
        self.settings.console_colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destinations.push(destination);
        self
    }

    pub fn build(self) -> LoggerFactory {
        let destinations = DestinationRegistry::new();
        for destination in self.destinations {
            destinations.register(destination);
        }

        LoggerFactory {
            settings: RwLock::new(self.settings),
            destinations,
            provisioner: Provisioner::new(),
            loggers: Mutex::new(HashMap::new()),
            console_out: self
                .console_out
                .unwrap_or_else(|| shared(ConsoleAppender::stdout())),
            console_err: self
                .console_err
                .unwrap_or_else(|| shared(ConsoleAppender::stderr())),
            next_sink_id: AtomicU64::new(0),
        }
    }
}

impl Default for LoggerFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use tempfile::TempDir;

    struct Captured {
        factory: LoggerFactory,
        stdout: MemoryAppender,
        stderr: MemoryAppender,
    }

    fn captured() -> Captured {
        let stdout = MemoryAppender::new("stdout");
        let stderr = MemoryAppender::new("stderr");
        let factory = LoggerFactory::builder()
            .console_out_appender(stdout.clone())
            .console_err_appender(stderr.clone())
            .console_format(FormatTemplate::parse("{level} {message}").unwrap())
            .build();
        Captured {
            factory,
            stdout,
            stderr,
        }
    }

    #[test]
    fn test_first_request_assembles_console_sinks_in_order() {
        let c = captured();
        assert!(!c.factory.is_assembled("svc"));

        let logger = c.factory.get_logger("svc").unwrap();

        assert!(c.factory.is_assembled("svc"));
        assert_eq!(logger.sink_count(), 2);
        assert_eq!(logger.sinks()[0].kind(), &SinkKind::ConsoleOut);
        assert_eq!(logger.sinks()[0].range(), LevelRange::CONSOLE_OUT);
        assert_eq!(logger.sinks()[1].kind(), &SinkKind::ConsoleErr);
        assert_eq!(logger.sinks()[1].range(), LevelRange::CONSOLE_ERR);
        assert_eq!(logger.min_level(), LogLevel::INFO);
    }

    #[test]
    fn test_repeat_request_only_changes_threshold() {
        let c = captured();
        let first = c
            .factory
            .get_logger_with_level("svc", LogLevel::WARN)
            .unwrap();
        let ids: Vec<SinkId> = first.sinks().iter().map(Sink::id).collect();

        let second = c
            .factory
            .get_logger_with_level("svc", LogLevel::DEBUG)
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.min_level(), LogLevel::DEBUG);
        let again: Vec<SinkId> = second.sinks().iter().map(Sink::id).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn test_console_routing_by_level() {
        let c = captured();
        let logger = c.factory.get_logger("svc").unwrap();

        logger.info("to stdout");
        logger.critical("to stderr");

        assert_eq!(c.stdout.lines(), vec!["INFO to stdout"]);
        assert_eq!(c.stderr.lines(), vec!["CRITICAL to stderr"]);
    }

    #[test]
    fn test_setters_apply_to_later_assemblies_only() {
        let c = captured();
        let before = c.factory.get_logger("before").unwrap();

        c.factory
            .set_console_out_range(LogLevel::DEBUG, LogLevel::WARN);
        c.factory.set_console_format("<{level}> {message}").unwrap();
        let after = c.factory.get_logger("after").unwrap();

        before.warn("old");
        after.warn("new");

        assert_eq!(c.stdout.lines(), vec!["<WARN> new"]);
        assert_eq!(c.stderr.lines(), vec!["WARN old", "<WARN> new"]);
    }

    #[test]
    fn test_invalid_template_keeps_previous() {
        let c = captured();
        assert!(c.factory.set_file_format("{oops}").is_err());
        assert!(c.factory.set_console_format("{level").is_err());

        c.factory.get_logger("svc").unwrap().info("unchanged");
        assert_eq!(c.stdout.lines(), vec!["INFO unchanged"]);
    }

    #[test]
    fn test_failed_assembly_leaves_name_unassembled() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let c = captured();
        c.factory.register(Destination::new(blocker.join("app.log")));

        assert!(c.factory.get_logger("svc").is_err());
        assert!(!c.factory.is_assembled("svc"));
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let c = captured();
        c.factory.add_output_file(
            temp_dir.path().join("app.log"),
            LogLevel::DEBUG,
            LogLevel::CRITICAL,
            WriteMode::ReplaceOnce,
        );
        c.factory.set_console_err_range(LogLevel::CRITICAL, LogLevel::CRITICAL);
        c.factory.get_logger("svc").unwrap();
        assert!(c.factory.is_replaced(temp_dir.path().join("app.log")));

        c.factory.reset();

        assert!(c.factory.logger_names().is_empty());
        assert!(c.factory.destinations().is_empty());
        assert!(!c.factory.is_replaced(temp_dir.path().join("app.log")));
        let logger = c.factory.get_logger("svc").unwrap();
        assert_eq!(logger.sink_count(), 2);
        assert_eq!(logger.sinks()[1].range(), LevelRange::CONSOLE_ERR);
    }

    #[test]
    fn test_logger_names_sorted() {
        let c = captured();
        c.factory.get_logger("zeta").unwrap();
        c.factory.get_logger("alpha").unwrap();
        assert_eq!(c.factory.logger_names(), vec!["alpha", "zeta"]);
    }
}
