//! Appender trait for log output destinations

use super::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// A writable destination for rendered log lines
///
/// `append` receives one record already rendered by the sink's template,
/// without a trailing newline.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Appender shared between every sink that writes to the same stream
pub type SharedAppender = Arc<Mutex<Box<dyn Appender>>>;

pub fn shared<A: Appender + 'static>(appender: A) -> SharedAppender {
    Arc::new(Mutex::new(Box::new(appender)))
}
