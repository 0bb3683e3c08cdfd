//! Custom logging module.
//!
//! Provides a logger implementation that captures log entries into a shared
//! buffer. The render loop drains the buffer into application state each
//! frame so entries show up in the log pane.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Handle for reading entries captured by the logger.
///
#[derive(Clone)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<String>>>,
}

impl CapturedLogs {
    /// Remove and return all entries captured since the last drain.
    ///
    pub fn drain(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(mut buffer) => buffer.drain(..).collect(),
            Err(_) => vec![],
        }
    }
}

/// Logger that captures formatted records into a shared buffer.
///
struct BufferLogger {
    buffer: Arc<Mutex<Vec<String>>>,
}

impl Log for BufferLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut buffer) = self.buffer.lock() {
                buffer.push(format_log(record));
            }
        }
    }

    fn flush(&self) {}
}

/// Install the capturing logger as the global logger and return the handle
/// for draining its entries.
///
pub fn init(level: LevelFilter) -> Result<CapturedLogs, AppError> {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let logger = BufferLogger {
        buffer: Arc::clone(&buffer),
    };
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(CapturedLogs { buffer })
}
