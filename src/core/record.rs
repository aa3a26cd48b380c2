//! Log record structure and creation

use super::log_level::LogLevel;
use super::meta::LogMeta;
use super::timestamp::TimestampFormat;
use chrono::Utc;

/// Immutable snapshot of one log call.
///
/// The message is carried verbatim; any escaping belongs to the
/// formatter that needs it. Enrichers consume and return records by
/// value, so a record handed to the formatters never changes again.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Creation time, already rendered to text
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// Logical subsystem label ("core", "http", ...)
    pub context: Option<String>,
    /// Correlation id linking records of one request
    pub trace_id: Option<String>,
    pub meta: Option<LogMeta>,
}

impl LogRecord {
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

/// Stamps out records with a consistent clock format.
#[derive(Debug, Clone, Default)]
pub struct RecordFactory {
    timestamp_format: TimestampFormat,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Create a record stamped with the current time.
    pub fn create(&self, level: LogLevel, message: String, meta: Option<LogMeta>) -> LogRecord {
        LogRecord {
            timestamp: self.timestamp_format.format(&Utc::now()),
            level,
            message,
            context: None,
            trace_id: None,
            meta,
        }
    }
}
