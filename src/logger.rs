//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log
//! entries into a shared buffer; the render loop drains the buffer into
//! application state for display in the debug view.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Cap on buffered entries between drains.
const BUFFER_CAPACITY: usize = 500;

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

/// Shared handle onto the captured log entries.
///
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    /// Take all captured entries out of the buffer.
    ///
    pub fn drain(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(mut entries) => entries.drain(..).collect(),
            // A poisoned buffer just stops capturing; logging is non-critical.
            Err(_) => vec![],
        }
    }
}

/// Custom logger that captures entries into the shared buffer.
///
struct CaptureLogger {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut entries) = self.entries.lock() {
                if entries.len() >= BUFFER_CAPACITY {
                    entries.remove(0);
                }
                entries.push(format_log(record));
            }
        }
    }

    fn flush(&self) {
        // No-op
    }
}

/// Install the capture logger as the global logger and return the buffer
/// handle for the render loop to drain.
///
pub fn init(level: LevelFilter) -> AppResult<LogBuffer> {
    let entries = Arc::new(Mutex::new(vec![]));
    let logger = CaptureLogger {
        entries: Arc::clone(&entries),
    };
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(LogBuffer { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_pair() -> (CaptureLogger, LogBuffer) {
        // The global max level gates `enabled`; tests never install the
        // global logger, so raise the level directly.
        log::set_max_level(LevelFilter::Trace);
        let entries = Arc::new(Mutex::new(vec![]));
        (
            CaptureLogger {
                entries: Arc::clone(&entries),
            },
            LogBuffer { entries },
        )
    }

    #[test]
    fn format_log_includes_level_and_message() {
        let formatted = format_log(
            &Record::builder()
                .args(format_args!("something happened"))
                .level(Level::Warn)
                .build(),
        );
        assert!(formatted.contains("WARN"));
        assert!(formatted.contains("something happened"));
    }

    #[test]
    fn drain_empties_buffer() {
        let (logger, buffer) = capture_pair();
        logger.log(
            &Record::builder()
                .args(format_args!("first"))
                .level(Level::Error)
                .build(),
        );
        let drained = buffer.drain();
        assert_eq!(drained.len(), 1);
        assert!(drained[0].contains("first"));
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn buffer_is_capped() {
        let (logger, buffer) = capture_pair();
        for _ in 0..(BUFFER_CAPACITY + 10) {
            logger.log(
                &Record::builder()
                    .args(format_args!("entry"))
                    .level(Level::Error)
                    .build(),
            );
        }
        assert_eq!(buffer.drain().len(), BUFFER_CAPACITY);
    }
}
