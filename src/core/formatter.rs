//! Formatter trait for record serialization

use super::record::LogRecord;

/// Turns a record into one formatted chunk of text.
///
/// Formatting is synchronous and total: every record has an output,
/// whatever its meta contains.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
    fn name(&self) -> &str;
}
