//! # obskit
//!
//! Observability core for long-running services: a structured logging
//! pipeline with pluggable formatters and transports, an RFC 7807
//! problem-details error model, and error handling that drives orderly
//! process shutdown.
//!
//! ## Features
//!
//! - **Structured Logging**: JSON or pretty lines with cycle-safe meta sanitization
//! - **Multiple Transports**: Console, pretty, and a buffered background writer
//! - **Problem Details**: RFC 7807 error model with catastrophic classification
//! - **Orderly Shutdown**: Signal-, panic- and error-driven teardown, at most once

pub mod core;
pub mod formatters;
pub mod macros;
pub mod problem;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        build_formatter, build_transport, sanitize, sanitize_meta, shared, ContextScope,
        CorrelationEnricher, EmptyContext, Enricher, Environment, ErrorInfo, FormatKind,
        Formatter, LogDispatcher, LogLevel, LogMeta, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, MetaValue, RecordFactory, RequestContext, Result,
        ScopedRequestContext, SharedValue, StaticContextEnricher, TimestampFormat, Transport,
        TransportErrorCallback, TransportKind,
    };
    pub use crate::formatters::{JsonFormatter, PrettyFormatter};
    pub use crate::problem::{
        install_panic_hook, normalize, AppError, ErrorHandler, Problem, RaisedError,
        ShutdownHandle, ShutdownReason, ABOUT_BLANK,
    };
    #[cfg(unix)]
    pub use crate::problem::install_signal_handlers;
    pub use crate::transports::{
        BufferedTransport, ConsoleTransport, PrettyTransport, DEFAULT_BUFFER_SIZE,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use crate::core::{
    build_formatter, build_transport, sanitize, sanitize_meta, shared, ContextScope,
    CorrelationEnricher, EmptyContext, Enricher, Environment, ErrorInfo, FormatKind, Formatter,
    LogDispatcher, LogLevel, LogMeta, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    MetaValue, RecordFactory, RequestContext, Result, ScopedRequestContext, SharedValue,
    StaticContextEnricher, TimestampFormat, Transport, TransportErrorCallback, TransportKind,
};
pub use crate::formatters::{JsonFormatter, PrettyFormatter};
pub use crate::problem::{
    install_panic_hook, normalize, AppError, ErrorHandler, Problem, RaisedError, ShutdownHandle,
    ShutdownReason, ABOUT_BLANK,
};
#[cfg(unix)]
pub use crate::problem::install_signal_handlers;
pub use crate::transports::{
    BufferedTransport, ConsoleTransport, PrettyTransport, DEFAULT_BUFFER_SIZE,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
