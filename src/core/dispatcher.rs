//! Fan-out of formatted lines to the configured transports

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::registry::TransportKind;
use super::transport::Transport;
use std::sync::Arc;

/// Callback invoked when a transport rejects or panics on a line.
pub type TransportErrorCallback = Arc<dyn Fn(&LoggerError, TransportKind) + Send + Sync>;

struct TransportEntry {
    instance: Box<dyn Transport>,
    min_level: LogLevel,
}

/// Delivers each formatted line to every transport whose floor it
/// passes, in configuration order.
///
/// **Per-Transport Failure Isolation**: each delivery is wrapped in
/// `catch_unwind`, so one failing or panicking transport never
/// prevents the remaining transports from receiving the line.
pub struct LogDispatcher {
    entries: Vec<TransportEntry>,
    on_error: TransportErrorCallback,
}

impl LogDispatcher {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            on_error: Arc::new(|error, kind| {
                eprintln!("[LOGGER ERROR] Transport '{}' failed: {}", kind, error);
            }),
        }
    }

    #[must_use]
    pub fn with_error_callback(mut self, callback: TransportErrorCallback) -> Self {
        self.on_error = callback;
        self
    }

    /// Register a transport with its level floor. Registration order
    /// is delivery order.
    pub fn add(&mut self, transport: Box<dyn Transport>, min_level: LogLevel) {
        self.entries.push(TransportEntry {
            instance: transport,
            min_level,
        });
    }

    pub fn transport_count(&self) -> usize {
        self.entries.len()
    }

    /// Deliver one line at the given level.
    ///
    /// Never fails from the caller's point of view; transport errors
    /// and panics are reported through the error callback.
    pub fn dispatch(&self, level: LogLevel, line: &str) {
        for entry in &self.entries {
            if level < entry.min_level {
                continue;
            }

            let kind = entry.instance.kind();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                entry.instance.log(line)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    (self.on_error)(&e, kind);
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    let error = LoggerError::transport_panic(kind.as_str(), panic_msg);
                    (self.on_error)(&error, kind);
                }
            }
        }
    }

    /// Flush every transport.
    ///
    /// All transports are attempted even when one fails; the first
    /// error is returned after the last attempt.
    pub fn flush(&self) -> Result<()> {
        self.for_each_settling(|transport| transport.flush())
    }

    /// Shut down every transport, same settling rules as `flush`.
    pub fn shutdown(&self) -> Result<()> {
        self.for_each_settling(|transport| transport.shutdown())
    }

    fn for_each_settling<F>(&self, op: F) -> Result<()>
    where
        F: Fn(&dyn Transport) -> Result<()>,
    {
        let mut first_error = None;
        for entry in &self.entries {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                op(entry.instance.as_ref())
            }));
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    Err(LoggerError::transport_panic(
                        entry.instance.kind().as_str(),
                        panic_msg,
                    ))
                }
            };
            if let Err(e) = outcome {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for LogDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
