//! Leveled logger capability.
//!
//! [`Logger`] is the seam other components log through; the message is a
//! closure that only runs once the level passes the logger's minimum.
//! [`QueuedLogger`] hands records to a single consumer thread and the
//! [`LogSink`] it drives, [`TracingSink`] being the console default.

pub mod level;
pub mod queued;
pub mod sink;

pub use level::LogLevel;
pub use queued::QueuedLogger;
pub use sink::{LogSink, TracingSink};

/// A formatted message at a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

pub trait Logger: Send + Sync {
    fn minimum_log_level(&self) -> LogLevel;

    /// Forward an already formatted message to the sink.
    fn deliver(&self, level: LogLevel, message: String);
}

pub trait LoggerExt: Logger {
    /// Log `message()` at `level`; the closure is not called when filtered out.
    fn log<F>(&self, message: F, level: LogLevel)
    where
        F: FnOnce() -> String,
    {
        if level >= self.minimum_log_level() {
            self.deliver(level, message());
        }
    }
}

impl<L: Logger + ?Sized> LoggerExt for L {}
