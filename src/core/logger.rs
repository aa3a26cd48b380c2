//! Logger facade and builder

use super::{
    config::{Environment, LoggerConfig},
    context::{EmptyContext, RequestContext},
    dispatcher::{LogDispatcher, TransportErrorCallback},
    enricher::{CorrelationEnricher, Enricher, StaticContextEnricher},
    error::Result,
    formatter::Formatter,
    log_level::LogLevel,
    meta::LogMeta,
    record::RecordFactory,
    registry::{build_formatter, build_transport, FormatKind, TransportKind},
    timestamp::TimestampFormat,
    transport::Transport,
};
use crate::transports::ConsoleTransport;
use std::sync::Arc;

/// Front door of the logging pipeline.
///
/// A log call flows: floor check, record creation, enrichment,
/// formatting, dispatch. The floor check is first so disabled levels
/// cost one comparison and nothing else.
///
/// Loggers are cheap to share: `child` loggers reuse the formatter
/// and transports of their parent, and all methods take `&self`.
pub struct Logger {
    config: LoggerConfig,
    factory: RecordFactory,
    correlation: Arc<dyn RequestContext>,
    enrichers: Vec<Box<dyn Enricher>>,
    formatter: Arc<dyn Formatter>,
    dispatcher: Arc<LogDispatcher>,
}

impl Logger {
    /// Baseline logger: info floor, JSON lines to console.
    #[must_use]
    pub fn new() -> Self {
        let config = LoggerConfig::baseline();
        let mut dispatcher = LogDispatcher::new();
        dispatcher.add(
            Box::new(ConsoleTransport::new()),
            config.transport_level(TransportKind::Console),
        );
        Self::assemble(
            config,
            RecordFactory::new(),
            Arc::new(EmptyContext),
            Arc::from(build_formatter(FormatKind::Json)),
            Arc::new(dispatcher),
        )
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use obskit::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .environment(Environment::Development)
    ///     .level(LogLevel::Debug)
    ///     .build()
    ///     .unwrap();
    /// logger.debug("wired up");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn assemble(
        config: LoggerConfig,
        factory: RecordFactory,
        correlation: Arc<dyn RequestContext>,
        formatter: Arc<dyn Formatter>,
        dispatcher: Arc<LogDispatcher>,
    ) -> Self {
        // Standard pipeline order: context label first, then correlation
        let enrichers: Vec<Box<dyn Enricher>> = vec![
            Box::new(StaticContextEnricher::new(config.context.clone())),
            Box::new(CorrelationEnricher::new(Arc::clone(&correlation))),
        ];
        Self {
            config,
            factory,
            correlation,
            enrichers,
            formatter,
            dispatcher,
        }
    }

    /// True when a record at `level` would reach at least the global
    /// floor. Callers can skip expensive meta assembly behind this.
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level.is_enabled(self.config.level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_inner(level, message.into(), None);
    }

    /// Log with a structured meta payload
    pub fn log_with_meta(&self, level: LogLevel, message: impl Into<String>, meta: LogMeta) {
        self.log_inner(level, message.into(), Some(meta));
    }

    fn log_inner(&self, level: LogLevel, message: String, meta: Option<LogMeta>) {
        if !self.is_level_enabled(level) {
            return;
        }

        let mut record = self.factory.create(level, message, meta);
        for enricher in &self.enrichers {
            record = enricher.enrich(record);
        }
        let line = self.formatter.format(&record);
        self.dispatcher.dispatch(level, &line);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn trace_with(&self, message: impl Into<String>, meta: LogMeta) {
        self.log_with_meta(LogLevel::Trace, message, meta);
    }

    pub fn debug_with(&self, message: impl Into<String>, meta: LogMeta) {
        self.log_with_meta(LogLevel::Debug, message, meta);
    }

    pub fn info_with(&self, message: impl Into<String>, meta: LogMeta) {
        self.log_with_meta(LogLevel::Info, message, meta);
    }

    pub fn warn_with(&self, message: impl Into<String>, meta: LogMeta) {
        self.log_with_meta(LogLevel::Warn, message, meta);
    }

    pub fn error_with(&self, message: impl Into<String>, meta: LogMeta) {
        self.log_with_meta(LogLevel::Error, message, meta);
    }

    pub fn fatal_with(&self, message: impl Into<String>, meta: LogMeta) {
        self.log_with_meta(LogLevel::Fatal, message, meta);
    }

    /// Derive a logger for a subsystem.
    ///
    /// The child shares the parent's formatter and transports, so it
    /// is cheap and its output lands in the same places; only the
    /// context label differs.
    #[must_use]
    pub fn child(&self, context: impl Into<String>) -> Logger {
        let mut config = self.config.clone();
        config.context = Some(context.into());
        Self::assemble(
            config,
            self.factory.clone(),
            Arc::clone(&self.correlation),
            Arc::clone(&self.formatter),
            Arc::clone(&self.dispatcher),
        )
    }

    /// Push everything queued so far to the underlying sinks.
    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }

    /// Shut down every transport. Safe to call more than once;
    /// logging afterwards is a silent no-op.
    pub fn shutdown(&self) -> Result<()> {
        self.dispatcher.shutdown()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use obskit::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .format(FormatKind::Json)
///     .transports(vec![TransportKind::Console])
///     .context("api")
///     .build()
///     .unwrap();
/// logger.info("ready");
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    timestamp_format: TimestampFormat,
    correlation: Option<Arc<dyn RequestContext>>,
    on_transport_error: Option<TransportErrorCallback>,
    extra_transports: Vec<(Box<dyn Transport>, LogLevel)>,
}

impl LoggerBuilder {
    /// Create a new builder with baseline configuration
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::baseline(),
            timestamp_format: TimestampFormat::default(),
            correlation: None,
            on_transport_error: None,
            extra_transports: Vec::new(),
        }
    }

    /// Replace the whole configuration, e.g. one deserialized from an
    /// application config file.
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from the profile for an environment. Call this before the
    /// field setters; it replaces the configuration wholesale.
    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config = LoggerConfig::for_environment(environment);
        self
    }

    /// Set the global level floor
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Set the output format
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: FormatKind) -> Self {
        self.config.format = format;
        self
    }

    /// Replace the transport list; order is delivery order
    #[must_use = "builder methods return a new value"]
    pub fn transports(mut self, transports: Vec<TransportKind>) -> Self {
        self.config.transports = transports;
        self
    }

    /// Set a per-transport level floor
    #[must_use = "builder methods return a new value"]
    pub fn transport_level(mut self, kind: TransportKind, level: LogLevel) -> Self {
        self.config.transport_levels.insert(kind, level);
        self
    }

    /// Set the default context label
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.config.context = Some(context.into());
        self
    }

    /// Emit records without a default context label
    #[must_use = "builder methods return a new value"]
    pub fn without_context(mut self) -> Self {
        self.config.context = None;
        self
    }

    /// Set the clock format stamped on records
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Wire the correlation source records read their trace id from
    #[must_use = "builder methods return a new value"]
    pub fn correlation(mut self, source: Arc<dyn RequestContext>) -> Self {
        self.correlation = Some(source);
        self
    }

    /// Set a callback for transport failures
    ///
    /// The default callback writes an operator alert to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_transport_error(mut self, callback: TransportErrorCallback) -> Self {
        self.on_transport_error = Some(callback);
        self
    }

    /// Register a pre-built transport with its own level floor.
    ///
    /// Registered transports are appended after the configured kinds.
    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: Box<dyn Transport>, min_level: LogLevel) -> Self {
        self.extra_transports.push((transport, min_level));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let formatter: Arc<dyn Formatter> = Arc::from(build_formatter(self.config.format));

        let mut dispatcher = LogDispatcher::new();
        if let Some(callback) = self.on_transport_error {
            dispatcher = dispatcher.with_error_callback(callback);
        }
        for kind in &self.config.transports {
            let transport = build_transport(*kind)?;
            dispatcher.add(transport, self.config.transport_level(*kind));
        }
        for (transport, min_level) in self.extra_transports {
            dispatcher.add(transport, min_level);
        }

        let correlation: Arc<dyn RequestContext> = self
            .correlation
            .unwrap_or_else(|| Arc::new(EmptyContext));
        let factory = RecordFactory::new().with_timestamp_format(self.timestamp_format);

        Ok(Logger::assemble(
            self.config,
            factory,
            correlation,
            formatter,
            Arc::new(dispatcher),
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
