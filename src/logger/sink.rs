use tracing::{debug, error, info, trace, warn};

use crate::logger::{LogLevel, LogRecord};
use crate::utils::constants::LOG_TARGET;

/// Destination of delivered log records. Runs on the logger's consumer thread.
pub trait LogSink: Send + 'static {
    fn write(&mut self, record: LogRecord);
}

impl<F> LogSink for F
where
    F: FnMut(LogRecord) + Send + 'static,
{
    fn write(&mut self, record: LogRecord) {
        self(record)
    }
}

/// Console sink: re-emits records as `tracing` events, so the installed
/// subscriber decides formatting and output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&mut self, record: LogRecord) {
        let message = record.message;
        match record.level {
            LogLevel::Verbose => trace!(target: LOG_TARGET, "{}", message),
            LogLevel::Debug => debug!(target: LOG_TARGET, "{}", message),
            LogLevel::Info => info!(target: LOG_TARGET, "{}", message),
            LogLevel::Warning => warn!(target: LOG_TARGET, "{}", message),
            LogLevel::Error => error!(target: LOG_TARGET, "{}", message),
        }
    }
}
