//! Error normalization, reporting and process shutdown
//!
//! This module provides:
//! - `RaisedError`: Tagged union of everything a process can raise
//! - `normalize`: Classification of a raised error into an `AppError`
//! - `ErrorHandler`: Reports normalized errors and drives shutdown
//! - `ShutdownReason` / `ShutdownHandle`: Lifecycle vocabulary
//!
//! Every failure funnels through `normalize` before it is logged or
//! surfaced, so nothing leaves this boundary in its raw shape. A
//! catastrophic error triggers shutdown: close the listener, flush the
//! logs, terminate. Shutdown runs at most once no matter how many
//! failures race into it.

use super::app_error::{AppError, ABOUT_BLANK};
use crate::core::config::Environment;
use crate::core::context::{EmptyContext, RequestContext};
use crate::core::logger::Logger;
use crate::core::meta::{LogMeta, MetaValue};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Anything a process can raise at the handler.
///
/// Classification is over this closed set of shapes; there is no
/// downcast probing of arbitrary trait objects.
#[derive(Debug)]
pub enum RaisedError {
    /// An intentional, fully specified application error
    App(AppError),
    /// A native error with a message and possibly a cause chain
    Native(Box<dyn std::error::Error + Send + Sync>),
    /// Anything else, already stringified
    Opaque(String),
}

impl RaisedError {
    /// Wrap a concrete error as a native raised error.
    pub fn native(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        RaisedError::Native(Box::new(error))
    }
}

impl From<AppError> for RaisedError {
    fn from(error: AppError) -> Self {
        RaisedError::App(error)
    }
}

impl From<String> for RaisedError {
    fn from(value: String) -> Self {
        RaisedError::Opaque(value)
    }
}

impl From<&str> for RaisedError {
    fn from(value: &str) -> Self {
        RaisedError::Opaque(value.to_string())
    }
}

/// Normalize a raised error into problem shape.
///
/// App errors pass through unchanged. Native errors wrap as status
/// 500 with `about:blank`; their cause chain becomes `detail` only
/// outside production so internals never leak from a production
/// process. Opaque values wrap the same way with no detail. Nothing
/// is catastrophic unless it said so itself.
pub fn normalize(raised: RaisedError, production: bool) -> AppError {
    match raised {
        RaisedError::App(error) => error,
        RaisedError::Native(error) => {
            let mut app = AppError::new(ABOUT_BLANK, error.to_string(), 500);
            if !production {
                app = app.with_detail(error_chain(&*error));
            }
            app
        }
        RaisedError::Opaque(value) => AppError::new(ABOUT_BLANK, value, 500),
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(&format!("\ncaused by: {}", cause));
        source = cause.source();
    }
    chain
}

/// Why the process is going down. Displays as the conventional signal
/// name, or `catastrophic` for error-driven shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
    UserDefined,
    Catastrophic,
}

impl ShutdownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Interrupt => "SIGINT",
            ShutdownReason::Terminate => "SIGTERM",
            ShutdownReason::UserDefined => "SIGUSR2",
            ShutdownReason::Catastrophic => "catastrophic",
        }
    }

    /// Process exit code: non-zero only for error-driven shutdown.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShutdownReason::Catastrophic => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resource to close before the process exits, typically the
/// listening socket of the host server.
pub trait ShutdownHandle: Send + Sync {
    fn close(&self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

type Terminator = Box<dyn Fn(i32) + Send + Sync>;

/// Terminal stage of the failure path.
///
/// Normalizes whatever was raised, reports it through the logger, and
/// decides whether the process keeps serving or shuts down. The
/// listener handle and the terminator are injected at construction so
/// the whole path is exercisable in tests.
pub struct ErrorHandler {
    logger: Arc<Logger>,
    context: Arc<dyn RequestContext>,
    environment: Environment,
    listener: Option<Box<dyn ShutdownHandle>>,
    terminator: Terminator,
    shutting_down: AtomicBool,
}

impl ErrorHandler {
    pub fn new(logger: Arc<Logger>, environment: Environment) -> Self {
        Self {
            logger,
            context: Arc::new(EmptyContext),
            environment,
            listener: None,
            terminator: Box::new(|code| std::process::exit(code)),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Wire the request context problems read their request id from.
    #[must_use]
    pub fn with_context(mut self, context: Arc<dyn RequestContext>) -> Self {
        self.context = context;
        self
    }

    /// Register the resource to close during shutdown.
    #[must_use]
    pub fn with_listener(mut self, listener: Box<dyn ShutdownHandle>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Replace the process terminator. Tests install a capturing
    /// closure here instead of `process::exit`.
    #[must_use]
    pub fn with_terminator(mut self, terminator: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    /// Normalize under this handler's environment.
    pub fn normalize(&self, raised: RaisedError) -> AppError {
        normalize(raised, self.environment.is_production())
    }

    /// Handle a raised error: normalize, report, and shut down when
    /// the error is catastrophic. Returns the normalized error for
    /// callers that keep running.
    pub fn handle(&self, raised: RaisedError) -> AppError {
        self.handle_inner(raised, false)
    }

    /// Handle a condition the process cannot survive, whatever its
    /// own classification says. Used by the panic hook.
    pub fn handle_fatal(&self, raised: RaisedError) -> AppError {
        self.handle_inner(raised, true)
    }

    fn handle_inner(&self, raised: RaisedError, force_catastrophic: bool) -> AppError {
        let mut error = self.normalize(raised);
        if force_catastrophic {
            error.catastrophic = true;
        }
        self.report(&error);
        if error.catastrophic {
            self.shutdown(ShutdownReason::Catastrophic);
        }
        error
    }

    fn report(&self, error: &AppError) {
        let problem = error.to_problem(self.context.as_ref());
        let payload = serde_json::to_value(&problem)
            .map(MetaValue::from)
            .unwrap_or(MetaValue::Null);
        self.logger
            .error_with("Problem occurred", LogMeta::new().with("problem", payload));
    }

    /// True once shutdown has begun.
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Shut the process down: log the reason, close the listener,
    /// flush the logs, terminate. First caller wins; later calls
    /// return immediately.
    pub fn shutdown(&self, reason: ShutdownReason) {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return;
        }

        self.logger.warn(format!("Shutting down ({})", reason));

        if let Some(listener) = &self.listener {
            if let Err(error) = listener.close() {
                // close failure must not block exit
                self.logger.error_with(
                    "Failed to close listener",
                    LogMeta::new().with("error", error.to_string()),
                );
            }
        }

        if let Err(error) = self.logger.flush() {
            eprintln!("[LOGGER WARNING] Flush during shutdown failed: {}", error);
        }
        if let Err(error) = self.logger.shutdown() {
            eprintln!("[LOGGER WARNING] Logger shutdown failed: {}", error);
        }

        (self.terminator)(reason.exit_code());
    }
}
