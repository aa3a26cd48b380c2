//! Core logging types and traits

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod enricher;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod meta;
pub mod record;
pub mod registry;
pub mod sanitize;
pub mod timestamp;
pub mod transport;

pub use config::{Environment, LoggerConfig};
pub use context::{ContextScope, EmptyContext, RequestContext, ScopedRequestContext};
pub use dispatcher::{LogDispatcher, TransportErrorCallback};
pub use enricher::{CorrelationEnricher, Enricher, StaticContextEnricher};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use meta::{shared, ErrorInfo, LogMeta, MetaValue, SharedValue};
pub use record::{LogRecord, RecordFactory};
pub use registry::{build_formatter, build_transport, FormatKind, TransportKind};
pub use sanitize::{sanitize, sanitize_meta};
pub use timestamp::TimestampFormat;
pub use transport::Transport;
