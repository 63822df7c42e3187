//! In-memory appender
//!
//! Collects rendered lines instead of writing them anywhere. Clones share
//! the same buffer, so one clone can be handed to a factory while another
//! is kept to inspect what was written.

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone)]
pub struct MemoryAppender {
    name: String,
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryAppender {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of every line appended so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
