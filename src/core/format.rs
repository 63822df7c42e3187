//! Record templates
//!
//! A template is a string with named placeholders, parsed once and rendered
//! for every record a sink accepts:
//!
//! ```
//! use logger_factory::core::{FormatTemplate, LogEntry, LogLevel, TimestampFormat};
//!
//! let template = FormatTemplate::parse("{level:<8}| {logger}: {message}")
//!     .unwrap()
//!     .with_timestamp_format(TimestampFormat::Iso8601);
//! let entry = LogEntry::new("svc", LogLevel::WARN, "disk almost full");
//! assert_eq!(template.render(&entry, false), "WARN    | svc: disk almost full");
//! ```
//!
//! Placeholders: `timestamp`, `level`, `message`, `file` (basename),
//! `path` (full source path), `line`, `module`, `logger`, `thread`.
//! A width may follow a colon (`{level:7}`, `{line:>4}`); `{{` and `}}`
//! produce literal braces.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Default template for console sinks
pub const DEFAULT_CONSOLE_FORMAT: &str = "{timestamp} {level} - {message} [{file}:{line}]";

/// Default template for file sinks
pub const DEFAULT_FILE_FORMAT: &str = "{timestamp} {level} - {message} \t[{file}:{line}]";

const MISSING: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Level,
    Message,
    File,
    Path,
    Line,
    Module,
    Logger,
    Thread,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "timestamp" => Field::Timestamp,
            "level" => Field::Level,
            "message" => Field::Message,
            "file" => Field::File,
            "path" => Field::Path,
            "line" => Field::Line,
            "module" => Field::Module,
            "logger" => Field::Logger,
            "thread" => Field::Thread,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Padding {
    align: Align,
    width: usize,
}

impl Padding {
    fn apply(&self, value: &str) -> String {
        match self.align {
            Align::Left => format!("{:<width$}", value, width = self.width),
            Align::Right => format!("{:>width$}", value, width = self.width),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        padding: Option<Padding>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatTemplate {
    source: String,
    segments: Vec<Segment>,
    #[serde(skip)]
    timestamp_format: TimestampFormat,
}

impl FormatTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut spec = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        spec.push(c);
                    }
                    if !closed {
                        return Err(LoggerError::template(template, "unclosed '{'"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Self::parse_placeholder(template, &spec)?);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(LoggerError::template(template, "unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
            timestamp_format: TimestampFormat::default(),
        })
    }

    fn parse_placeholder(template: &str, spec: &str) -> Result<Segment> {
        let (name, width) = match spec.split_once(':') {
            Some((name, width)) => (name.trim(), Some(width.trim())),
            None => (spec.trim(), None),
        };
        let field = Field::from_name(name).ok_or_else(|| {
            LoggerError::template(template, format!("unknown placeholder '{}'", name))
        })?;

        let padding = match width {
            None | Some("") => None,
            Some(width) => {
                let (align, digits) = match width.as_bytes()[0] {
                    b'<' => (Align::Left, &width[1..]),
                    b'>' => (Align::Right, &width[1..]),
                    _ => (Align::Left, width),
                };
                let width = digits.parse::<usize>().map_err(|_| {
                    LoggerError::template(template, format!("invalid width '{}'", digits))
                })?;
                Some(Padding { align, width })
            }
        };

        Ok(Segment::Field { field, padding })
    }

    /// Template used for console sinks unless overridden
    pub fn console_default() -> Self {
        Self::parse(DEFAULT_CONSOLE_FORMAT).expect("default console template is valid")
    }

    /// Template used for file sinks unless overridden
    pub fn file_default() -> Self {
        Self::parse(DEFAULT_FILE_FORMAT).expect("default file template is valid")
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render one record as a single line, without a trailing newline
    pub fn render(&self, entry: &LogEntry, colorize: bool) -> String {
        let mut out = String::with_capacity(self.source.len() + entry.message.len() + 32);

        for segment in &self.segments {
            let (field, padding) = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Field { field, padding } => (*field, padding),
            };

            let value: Cow<'_, str> = match field {
                Field::Timestamp => Cow::Owned(self.timestamp_format.format(&entry.timestamp)),
                Field::Level => Cow::Owned(entry.level.to_string()),
                Field::Message => Cow::Borrowed(entry.message.as_str()),
                Field::File => Cow::Borrowed(entry.file_name().unwrap_or(MISSING)),
                Field::Path => Cow::Borrowed(entry.file.as_deref().unwrap_or(MISSING)),
                Field::Line => match entry.line {
                    Some(line) => Cow::Owned(line.to_string()),
                    None => Cow::Borrowed(MISSING),
                },
                Field::Module => Cow::Borrowed(entry.module_path.as_deref().unwrap_or(MISSING)),
                Field::Logger => Cow::Borrowed(entry.logger.as_str()),
                Field::Thread => Cow::Borrowed(entry.thread()),
            };

            let value = match padding {
                Some(padding) => Cow::Owned(padding.apply(&value)),
                None => value,
            };

            let text: &str = &value;
            if colorize && field == Field::Level {
                out.push_str(&text.color(entry.level.color_code()).to_string());
            } else {
                out.push_str(text);
            }
        }

        out
    }
}

impl fmt::Display for FormatTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for FormatTemplate {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FormatTemplate {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FormatTemplate> for String {
    fn from(template: FormatTemplate) -> Self {
        template.source
    }
}
