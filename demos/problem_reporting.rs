//! Problem reporting example
//!
//! Demonstrates the RFC 7807 problem model, error normalization, and
//! the error handler's shutdown decision.
//!
//! Run with: cargo run --example problem_reporting

use obskit::prelude::*;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct RefusedError;

#[derive(Debug, thiserror::Error)]
#[error("upstream unavailable")]
struct UpstreamError {
    #[source]
    source: RefusedError,
}

fn main() -> Result<()> {
    println!("=== obskit - Problem Reporting Example ===\n");

    // Correlation context shared by the logger and the problem model
    let ctx = ScopedRequestContext::new();
    let logger = Arc::new(
        Logger::builder()
            .format(FormatKind::Pretty)
            .level(LogLevel::Debug)
            .context("api")
            .correlation(Arc::new(ctx.clone()))
            .build()?,
    );

    println!("1. Building problem documents by hand:");
    let not_found = AppError::not_found("User Not Found").with_detail("no user with id 42");
    let _scope = ctx.enter("req-1", "trace-1");
    let problem = not_found.to_problem(&ctx);
    println!(
        "   {}",
        serde_json::to_string_pretty(&problem).unwrap_or_default()
    );

    println!("\n2. Normalizing foreign errors:");
    let native = RaisedError::native(UpstreamError {
        source: RefusedError,
    });
    // Development keeps the cause chain in the detail field
    let dev = normalize(native, false);
    println!("   development detail: {:?}", dev.detail);
    let opaque = normalize(RaisedError::from("worker gave up"), true);
    println!(
        "   production: status {} title {:?} detail {:?}",
        opaque.status, opaque.title, opaque.detail
    );

    println!("\n3. Handling errors through the handler:");
    // The terminator is replaced so this example survives the shutdown
    let handler = ErrorHandler::new(Arc::clone(&logger), Environment::Development)
        .with_context(Arc::new(ctx.clone()))
        .with_terminator(|code| println!("   (process would exit with code {})", code));

    // A client error is reported and the process keeps serving
    let normalized = handler.handle(RaisedError::from(AppError::bad_request("Invalid Payload")));
    println!("   after client error: status {}, still serving", normalized.status);
    logger.info("Still accepting requests");

    println!("\n4. A catastrophic error drives full shutdown:");
    handler.handle(RaisedError::from(
        AppError::internal("Storage Corrupted").catastrophic(),
    ));
    println!("   shutting down: {}", handler.is_shutting_down());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
