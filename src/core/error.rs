//! Error types for the observability core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Buffered transport queue full with buffer details
    #[error("Transport queue full: {current}/{max} lines buffered")]
    QueueFull { current: usize, max: usize },

    /// Queue overflow with dropped line count
    #[error("Transport queue overflow: dropped {dropped_count} lines")]
    QueueOverflow { dropped_count: usize },

    /// Transport already shut down
    #[error("Transport already shut down")]
    TransportStopped,

    /// Flush acknowledgement did not arrive in time
    #[error("Flush timed out after {timeout_ms}ms")]
    FlushTimeout { timeout_ms: u64 },

    /// Worker thread did not stop in time
    #[error("Shutdown timed out after {timeout_ms}ms")]
    ShutdownTimeout { timeout_ms: u64 },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Transport write failure with transport name
    #[error("Transport error ({transport}): {message}")]
    TransportError { transport: String, message: String },

    /// A transport panicked while handling a line
    #[error("Transport panicked ({transport}): {message}")]
    TransportPanic { transport: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a queue full error with buffer details
    pub fn queue_full(current: usize, max: usize) -> Self {
        LoggerError::QueueFull { current, max }
    }

    /// Create a queue overflow error
    pub fn queue_overflow(dropped_count: usize) -> Self {
        LoggerError::QueueOverflow { dropped_count }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a transport write error
    pub fn transport(transport: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create a transport panic error
    pub fn transport_panic(transport: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportPanic {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
