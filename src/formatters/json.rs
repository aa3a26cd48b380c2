//! JSON line formatter

use crate::core::formatter::Formatter;
use crate::core::record::LogRecord;
use crate::core::sanitize::sanitize_meta;

/// Emits one JSON object per record, newline terminated.
///
/// Wire shape: `timestamp`, `level`, `message`, then `context` and
/// `meta` when present. The trace id is deliberately not part of the
/// JSON shape; correlation-aware consumers read it out of `meta` when
/// callers put it there.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(record.timestamp.clone()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.as_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );

        if let Some(ref context) = record.context {
            json_obj.insert(
                "context".to_string(),
                serde_json::Value::String(context.clone()),
            );
        }

        if let Some(ref meta) = record.meta {
            json_obj.insert("meta".to_string(), sanitize_meta(meta));
        }

        let mut line =
            serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default();
        line.push('\n');
        line
    }

    fn name(&self) -> &str {
        "json"
    }
}
