// Logger - timestamped diagnostics for the CLI layer
//
// Writes "[HH:MM:SS] [LEVEL] message" lines to an in-memory buffer and
// optionally to a file. The computation components never log; this exists
// for the thin caller layer around them.

use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information
    Debug,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::None => "",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Buffer/file logger
pub struct Logger {
    /// Current log level
    level: LogLevel,

    /// In-memory line buffer
    buffer: Vec<String>,

    /// Maximum number of buffered lines (0 = unlimited)
    max_buffer_size: usize,

    /// Optional output file
    output_file: Option<File>,
}

impl Logger {
    /// Create a logger keeping the most recent 1000 lines in memory
    pub fn new(level: LogLevel) -> Self {
        Logger {
            level,
            buffer: Vec::new(),
            max_buffer_size: 1000,
            output_file: None,
        }
    }

    /// Also append every line to a file
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> std::io::Result<Self> {
        self.output_file = Some(File::create(path)?);
        Ok(self)
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Log an informational message
    pub fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a warning
    pub fn warn(&mut self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error
    pub fn error(&mut self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Log a debug message
    pub fn debug(&mut self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        if level > self.level || self.level == LogLevel::None {
            return;
        }

        let line = format!(
            "[{}] [{}] {}",
            Local::now().format("%H:%M:%S"),
            level.tag(),
            message
        );

        if let Some(file) = &mut self.output_file {
            // Logging must not take the process down
            let _ = writeln!(file, "{}", line);
        }

        self.buffer.push(line);
        if self.max_buffer_size > 0 && self.buffer.len() > self.max_buffer_size {
            let excess = self.buffer.len() - self.max_buffer_size;
            self.buffer.drain(0..excess);
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> &[String] {
        &self.buffer
    }

    /// Drop all buffered lines
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_tagged() {
        let mut logger = Logger::new(LogLevel::Debug);
        logger.info("reading fuses");
        logger.error("read failed");

        assert_eq!(logger.lines().len(), 2);
        assert!(logger.lines()[0].ends_with("[INFO] reading fuses"));
        assert!(logger.lines()[1].ends_with("[ERROR] read failed"));
    }

    #[test]
    fn test_level_filtering() {
        let mut logger = Logger::new(LogLevel::Warning);
        logger.debug("not kept");
        logger.info("not kept");
        logger.warn("kept");
        logger.error("kept");

        assert_eq!(logger.lines().len(), 2);
    }

    #[test]
    fn test_none_level_silences_everything() {
        let mut logger = Logger::new(LogLevel::None);
        logger.error("still dropped");
        assert!(logger.lines().is_empty());
    }

    #[test]
    fn test_buffer_is_bounded() {
        let mut logger = Logger::new(LogLevel::Info);
        logger.max_buffer_size = 3;

        for i in 0..5 {
            logger.info(&format!("line {}", i));
        }

        assert_eq!(logger.lines().len(), 3);
        assert!(logger.lines()[0].ends_with("line 2"));
        assert!(logger.lines()[2].ends_with("line 4"));
    }
}
