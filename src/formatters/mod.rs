//! Formatter implementations

pub mod json;
pub mod pretty;

pub use json::JsonFormatter;
pub use pretty::PrettyFormatter;

// Re-export the trait alongside its implementations
pub use crate::core::Formatter;
