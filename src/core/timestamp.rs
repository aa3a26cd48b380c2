//! Timestamp formatting utilities
//!
//! Provides standardized, configurable timestamp formats for log records.
//! Supports ISO 8601, RFC 3339, Unix timestamps, and custom formats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Standardized timestamp format options
///
/// Supports various timestamp formats commonly used in logging systems
/// and compatible with log aggregation tools (Elasticsearch, Splunk, Loki, etc.)
///
/// # Examples
///
/// ```
/// use obskit::core::TimestampFormat;
/// use std::time::SystemTime;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format_system_time(&SystemTime::now());
/// // Output: "2025-01-08T10:30:45.123Z"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// This is the default format, widely supported by log aggregation systems.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    ///
    /// Provides higher precision for ordering concurrent log records.
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use obskit::core::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format a `SystemTime` according to this format
    ///
    /// Convenience method that converts `SystemTime` to `DateTime<Utc>` first.
    #[must_use]
    pub fn format_system_time(&self, timestamp: &SystemTime) -> String {
        let datetime: DateTime<Utc> = (*timestamp).into();
        self.format(&datetime)
    }
}
