//! Human-readable formatter

use crate::core::formatter::Formatter;
use crate::core::record::LogRecord;
use crate::core::sanitize::sanitize_meta;
use colored::Colorize;

/// Emits `[timestamp] LEVEL [context] (trace=id) message`, absent
/// segments omitted, followed by two-space-indented meta JSON when
/// the record carries meta.
///
/// Control characters in the message are escaped so one record stays
/// one line; the meta block below it is the only multi-line part.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFormatter {
    colored: bool,
}

impl PrettyFormatter {
    pub fn new() -> Self {
        Self { colored: false }
    }

    /// Color the level tag with ANSI codes.
    #[must_use]
    pub fn with_colors(mut self) -> Self {
        self.colored = true;
        self
    }

    /// Escape line breaks and tabs so injected text cannot forge
    /// additional log lines.
    fn escape_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}

impl Formatter for PrettyFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let level_tag = if self.colored {
            record
                .level
                .to_string()
                .color(record.level.color_code())
                .to_string()
        } else {
            record.level.to_string()
        };

        let mut parts = vec![format!("[{}]", record.timestamp), level_tag];

        if let Some(ref context) = record.context {
            parts.push(format!("[{}]", context));
        }
        if let Some(ref trace_id) = record.trace_id {
            parts.push(format!("(trace={})", trace_id));
        }
        parts.push(Self::escape_message(&record.message));

        let mut line = parts.join(" ");

        if let Some(ref meta) = record.meta {
            let rendered =
                serde_json::to_string_pretty(&sanitize_meta(meta)).unwrap_or_default();
            line.push('\n');
            line.push_str(&rendered);
        }

        line
    }

    fn name(&self) -> &str {
        "pretty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::meta::LogMeta;

    fn record(level: LogLevel, message: &str) -> LogRecord {
        LogRecord {
            timestamp: "2025-01-08T10:30:45.123Z".to_string(),
            level,
            message: message.to_string(),
            context: None,
            trace_id: None,
            meta: None,
        }
    }

    #[test]
    fn test_minimal_line() {
        let formatter = PrettyFormatter::new();
        let line = formatter.format(&record(LogLevel::Info, "hello"));
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] INFO hello");
    }

    #[test]
    fn test_all_segments() {
        let formatter = PrettyFormatter::new();
        let rec = record(LogLevel::Error, "boom")
            .with_context("http")
            .with_trace_id("t-1");
        let line = formatter.format(&rec);
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] ERROR [http] (trace=t-1) boom");
    }

    #[test]
    fn test_absent_segments_are_omitted() {
        let formatter = PrettyFormatter::new();
        let line = formatter.format(&record(LogLevel::Warn, "w").with_trace_id("t-9"));
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] WARN (trace=t-9) w");
    }

    #[test]
    fn test_message_control_chars_are_escaped() {
        let formatter = PrettyFormatter::new();
        let line = formatter.format(&record(LogLevel::Info, "one\ntwo\tthree"));
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] INFO one\\ntwo\\tthree");
    }

    #[test]
    fn test_meta_renders_as_indented_json() {
        let formatter = PrettyFormatter::new();
        let mut rec = record(LogLevel::Debug, "with meta");
        rec.meta = Some(LogMeta::new().with("k", 1));
        let line = formatter.format(&rec);
        assert_eq!(
            line,
            "[2025-01-08T10:30:45.123Z] DEBUG with meta\n{\n  \"k\": 1\n}"
        );
    }

    #[test]
    fn test_colored_output_keeps_segments() {
        // colors only decorate the level tag, everything else is untouched
        let formatter = PrettyFormatter::new().with_colors();
        let line = formatter.format(&record(LogLevel::Info, "painted"));
        assert!(line.starts_with("[2025-01-08T10:30:45.123Z] "));
        assert!(line.ends_with(" painted"));
        assert!(line.contains("INFO"));
    }
}
