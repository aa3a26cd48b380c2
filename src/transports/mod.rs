//! Transport implementations

pub mod buffered;
pub mod console;
pub mod pretty;

pub use buffered::{BufferedTransport, DEFAULT_BUFFER_SIZE, DEFAULT_SHUTDOWN_TIMEOUT};
pub use console::ConsoleTransport;
pub use pretty::PrettyTransport;

// Re-export the trait alongside its implementations
pub use crate::core::Transport;
