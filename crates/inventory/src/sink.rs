//! Log sink: where the store sends its informational records.

use chrono::{DateTime, Utc};
use tracing::Level;

/// Destination for log records emitted by the store.
///
/// Records are informational only; no store operation reads them back.
pub trait LogSink {
    fn record(&mut self, level: Level, message: &str);
}

impl<S> LogSink for &mut S
where
    S: LogSink + ?Sized,
{
    fn record(&mut self, level: Level, message: &str) {
        (**self).record(level, message)
    }
}

/// Forwards records to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&mut self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "stockkeep::inventory", "{message}"),
            Level::WARN => tracing::warn!(target: "stockkeep::inventory", "{message}"),
            Level::INFO => tracing::info!(target: "stockkeep::inventory", "{message}"),
            Level::DEBUG => tracing::debug!(target: "stockkeep::inventory", "{message}"),
            _ => tracing::trace!(target: "stockkeep::inventory", "{message}"),
        }
    }
}

/// Discards every record.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&mut self, _level: Level, _message: &str) {}
}

/// One recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl core::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.recorded_at.to_rfc3339(), self.message)
    }
}

/// Collects records in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<LogRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.message.as_str())
    }

    /// Drain collected records, leaving the sink empty.
    pub fn take(&mut self) -> Vec<LogRecord> {
        core::mem::take(&mut self.records)
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, level: Level, message: &str) {
        self.records.push(LogRecord {
            level,
            message: message.to_string(),
            recorded_at: Utc::now(),
        });
    }
}
