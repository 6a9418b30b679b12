use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::warn;

use crate::logger::{LogLevel, LogRecord, LogSink, Logger, TracingSink};

static CONSUMER_THREAD_NAME: &str = "platform-auth-log";

/// Logger that returns immediately and delivers records to its sink from a
/// single consumer thread, in the order each producer sent them.
///
/// Dropping the logger closes the queue and waits for it to drain. If the sink
/// panics, the consumer stops and later records are counted as dropped.
#[derive(Debug)]
pub struct QueuedLogger {
    minimum_log_level: LogLevel,
    sender: Option<UnboundedSender<LogRecord>>,
    consumer: Option<JoinHandle<()>>,
    dropped_records: AtomicUsize,
}

impl QueuedLogger {
    pub fn new<S: LogSink>(minimum_log_level: LogLevel, mut sink: S) -> io::Result<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<LogRecord>();

        let consumer = thread::Builder::new()
            .name(CONSUMER_THREAD_NAME.to_owned())
            .spawn(move || {
                while let Some(record) = receiver.blocking_recv() {
                    sink.write(record);
                }
            })?;

        Ok(Self {
            minimum_log_level,
            sender: Some(sender),
            consumer: Some(consumer),
            dropped_records: AtomicUsize::new(0),
        })
    }

    /// Default console logger, forwarding to `tracing`.
    pub fn console(minimum_log_level: LogLevel) -> io::Result<Self> {
        Self::new(minimum_log_level, TracingSink)
    }

    /// Close the queue and block until every accepted record reached the sink.
    pub fn shutdown(self) {
        drop(self)
    }

    /// Records refused because the consumer thread is gone.
    pub fn dropped_records(&self) -> usize {
        self.dropped_records.load(Ordering::Relaxed)
    }
}

impl Logger for QueuedLogger {
    fn minimum_log_level(&self) -> LogLevel {
        self.minimum_log_level
    }

    fn deliver(&self, level: LogLevel, message: String) {
        let Some(sender) = &self.sender else {
            return;
        };
        // send only fails once the consumer died with the receiver
        if sender.send(LogRecord { level, message }).is_err()
            && self.dropped_records.fetch_add(1, Ordering::Relaxed) == 0
        {
            warn!(thread = CONSUMER_THREAD_NAME, "log consumer stopped, dropping records");
        }
    }
}

impl Drop for QueuedLogger {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(consumer) = self.consumer.take() {
            if consumer.join().is_err() {
                warn!(
                    thread = CONSUMER_THREAD_NAME,
                    dropped = self.dropped_records(),
                    "log sink panicked, queued records were lost"
                );
            }
        }
    }
}
