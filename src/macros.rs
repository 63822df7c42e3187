//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and record the call
//! site's file, line and module path.
//!
//! # Examples
//!
//! ```
//! use logger_factory::prelude::*;
//! use logger_factory::info;
//!
//! let factory = LoggerFactory::builder()
//!     .console_out_appender(MemoryAppender::new("stdout"))
//!     .build();
//! let logger = factory.get_logger("server").unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logger_factory::prelude::*;
/// # let logger = Logger::new("doc", Vec::new());
/// use logger_factory::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::new(25), "Custom level {}", 25);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_in_module($level, format!($($arg)+), module_path!())
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logger_factory::prelude::*;
/// # let logger = Logger::new("doc", Vec::new());
/// use logger_factory::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use logger_factory::prelude::*;
/// # let logger = Logger::new("doc", Vec::new());
/// use logger_factory::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::CRITICAL, $($arg)+)
    };
}
