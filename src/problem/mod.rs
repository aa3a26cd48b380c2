//! Problem-details error model and process lifecycle

pub mod app_error;
pub mod handler;
pub mod signals;

pub use app_error::{AppError, Problem, ABOUT_BLANK};
pub use handler::{normalize, ErrorHandler, RaisedError, ShutdownHandle, ShutdownReason};
pub use signals::install_panic_hook;
#[cfg(unix)]
pub use signals::install_signal_handlers;
