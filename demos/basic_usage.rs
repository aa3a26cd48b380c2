//! Basic logger usage example
//!
//! Demonstrates the builder, level floors, structured meta, and child
//! loggers with the pretty console format.
//!
//! Run with: cargo run --example basic_usage

use obskit::prelude::*;

fn main() -> Result<()> {
    println!("=== obskit - Basic Usage Example ===\n");

    // Build a logger with the pretty format and everything enabled
    let logger = Logger::builder()
        .format(FormatKind::Pretty)
        .level(LogLevel::Trace)
        .context("app")
        .build()?;

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Structured meta payloads:");
    logger.info_with(
        "Request handled",
        LogMeta::new()
            .with("method", "GET")
            .with("path", "/users/42")
            .with("status", 200)
            .with("duration_ms", 12.5),
    );

    println!("\n3. Child loggers per subsystem:");
    let db = logger.child("db");
    let http = logger.child("http");
    db.info("Connection pool ready");
    http.info("Listening on :8080");

    println!("\n4. Level floors:");
    // The floor is fixed at build time; quieter loggers are built, not mutated
    let quiet = Logger::builder()
        .format(FormatKind::Pretty)
        .level(LogLevel::Warn)
        .context("app")
        .build()?;
    println!("   Floor set to WARN - trace through info won't show:");
    quiet.debug("Debug message (hidden)");
    quiet.info("Info message (hidden)");
    quiet.warn("Warning message (visible)");
    quiet.error("Error message (visible)");

    // Flush to ensure all logs are written
    logger.flush()?;
    quiet.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
