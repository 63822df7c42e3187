//! Sinks: an appender composed with a level range and a record template

use super::{
    appender::SharedAppender, error::Result, format::FormatTemplate, level_range::LevelRange,
    log_entry::LogEntry, log_level::LogLevel,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Identity of one attached sink, unique within a factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(pub(crate) u64);

impl SinkId {
    pub const fn new(value: u64) -> Self {
        SinkId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SinkKind {
    ConsoleOut,
    ConsoleErr,
    File(PathBuf),
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::ConsoleOut => f.write_str("console-out"),
            SinkKind::ConsoleErr => f.write_str("console-err"),
            SinkKind::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

pub struct Sink {
    id: SinkId,
    kind: SinkKind,
    range: LevelRange,
    template: FormatTemplate,
    colorize: bool,
    appender: SharedAppender,
}

impl Sink {
    pub fn new(
        id: SinkId,
        kind: SinkKind,
        range: LevelRange,
        template: FormatTemplate,
        appender: SharedAppender,
    ) -> Self {
        Self {
            id,
            kind,
            range,
            template,
            colorize: false,
            appender,
        }
    }

    /// Color the `{level}` placeholder with ANSI escapes
    #[must_use]
    pub fn with_colors(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub fn id(&self) -> SinkId {
        self.id
    }

    pub fn kind(&self) -> &SinkKind {
        &self.kind
    }

    pub fn range(&self) -> LevelRange {
        self.range
    }

    pub fn template(&self) -> &FormatTemplate {
        &self.template
    }

    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.range.contains(level)
    }

    /// Render and write one record; the appender lock is held for the whole line
    pub fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = self.template.render(entry, self.colorize);
        self.appender.lock().append(&line)
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    /// Whether both sinks write through the same underlying appender
    pub fn shares_appender_with(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.appender, &other.appender)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("range", &self.range)
            .field("template", &self.template.as_str())
            .finish()
    }
}
