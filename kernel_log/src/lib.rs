//! # Kernel Log
//!
//! An in-memory sink for the `log` facade.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not printf-style. Every entry keeps
//! its level and target, so a halt can be audited after the fact: the
//! system logs the termination code before it hands control to the
//! platform, and this sink keeps that record.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};
use spin::Mutex;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Fine-grained tracing
    Trace,
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Emitting component (`"system"`, `"kernel"`, ...)
    pub target: String,
    /// Log message
    pub message: String,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            message: message.into(),
        }
    }
}

/// `log::Log` implementation that keeps entries in memory
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
    max_level: LevelFilter,
}

impl MemoryLogger {
    /// Creates a logger accepting everything up to `max_level`
    pub const fn new(max_level: LevelFilter) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            max_level,
        }
    }

    /// Installs this logger as the process-wide `log` sink
    pub fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }

    /// Snapshot of all recorded entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Returns true if an entry matches `predicate`
    pub fn contains<F>(&self, predicate: F) -> bool
    where
        F: Fn(&LogEntry) -> bool,
    {
        self.entries.lock().iter().any(predicate)
    }

    /// Counts entries at `level` or above
    pub fn count_at_least(&self, level: LogLevel) -> usize {
        self.entries.lock().iter().filter(|e| e.level >= level).count()
    }

    /// Drops all recorded entries
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Log for MemoryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry::new(
            record.level().into(),
            record.target(),
            record.args().to_string(),
        );
        self.entries.lock().push(entry);
    }

    fn flush(&self) {}
}
