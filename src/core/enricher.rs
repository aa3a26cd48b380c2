//! Record enrichment pipeline
//!
//! Enrichers run in configuration order between record creation and
//! formatting. Each consumes the record and returns it, possibly with
//! more fields filled in; none of them can fail.

use super::context::RequestContext;
use super::record::LogRecord;
use std::sync::Arc;

pub trait Enricher: Send + Sync {
    fn enrich(&self, record: LogRecord) -> LogRecord;
}

/// Stamps a fixed context label on records that lack one.
///
/// Explicit per-record context always wins; an unlabeled enricher is
/// a no-op.
pub struct StaticContextEnricher {
    label: Option<String>,
}

impl StaticContextEnricher {
    pub fn new(label: Option<String>) -> Self {
        Self { label }
    }
}

impl Enricher for StaticContextEnricher {
    fn enrich(&self, mut record: LogRecord) -> LogRecord {
        if record.context.is_none() {
            if let Some(label) = &self.label {
                record.context = Some(label.clone());
            }
        }
        record
    }
}

/// Copies the ambient trace id onto the record when one is in flight.
///
/// Outside any request scope this is a no-op; missing correlation is
/// never an error.
pub struct CorrelationEnricher {
    source: Arc<dyn RequestContext>,
}

impl CorrelationEnricher {
    pub fn new(source: Arc<dyn RequestContext>) -> Self {
        Self { source }
    }
}

impl Enricher for CorrelationEnricher {
    fn enrich(&self, mut record: LogRecord) -> LogRecord {
        if record.trace_id.is_none() {
            if let Some(trace_id) = self.source.trace_id() {
                record.trace_id = Some(trace_id);
            }
        }
        record
    }
}
