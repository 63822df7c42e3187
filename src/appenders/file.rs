//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    name: String,
    writer: Option<BufWriter<File>>,
}

impl FileAppender {
    /// Open `path` for appending, creating the file if it does not exist
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", &path, e))?;

        Ok(Self {
            name: format!("file:{}", path.display()),
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut output = String::with_capacity(line.len() + 1);
        output.push_str(line);
        output.push('\n');

        // Flushed per record so readers of the file never see a partial line
        writer
            .write_all(output.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| LoggerError::io_operation("writing log file", &self.path, e))
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer
                .flush()
                .map_err(|e| LoggerError::io_operation("flushing log file", &self.path, e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
