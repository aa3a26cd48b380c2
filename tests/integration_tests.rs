//! Integration tests for the observability core
//!
//! These tests verify:
//! - Full pipeline wiring: facade -> enrichers -> formatter -> transports
//! - Log injection prevention
//! - Buffered transport delivery, flush and shutdown draining
//! - Per-transport level floors and failure isolation
//! - Correlation flow into log lines and problem documents
//! - Error handler lifecycle decisions

use obskit::core::config::Environment;
use obskit::core::context::ScopedRequestContext;
use obskit::core::error::Result;
use obskit::core::log_level::LogLevel;
use obskit::core::logger::Logger;
use obskit::core::meta::LogMeta;
use obskit::core::registry::{FormatKind, TransportKind};
use obskit::core::transport::Transport;
use obskit::problem::{AppError, ErrorHandler, RaisedError};
use obskit::transports::BufferedTransport;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).to_string()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct CaptureTransport {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureTransport {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                lines: Arc::clone(&lines),
            },
            lines,
        )
    }
}

impl Transport for CaptureTransport {
    fn log(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Console
    }
}

fn buffered_json_logger(buf: &SharedBuf) -> Logger {
    let transport = BufferedTransport::with_writer(Box::new(buf.clone()))
        .expect("Failed to spawn buffered transport");
    Logger::builder()
        .transports(vec![])
        .transport(Box::new(transport), LogLevel::Trace)
        .level(LogLevel::Trace)
        .context("api")
        .build()
        .expect("Failed to build logger")
}

#[test]
fn test_json_pipeline_end_to_end() {
    let buf = SharedBuf::default();
    let logger = buffered_json_logger(&buf);

    logger.info_with(
        "request handled",
        LogMeta::new().with("status", 200).with("path", "/users"),
    );
    logger.flush().expect("Failed to flush");

    let content = buf.contents();
    let parsed: serde_json::Value =
        serde_json::from_str(content.trim()).expect("Output must be valid JSON");

    assert_eq!(parsed["level"], "info");
    assert_eq!(parsed["message"], "request handled");
    assert_eq!(parsed["context"], "api");
    assert_eq!(parsed["meta"]["status"], 200);
    assert_eq!(parsed["meta"]["path"], "/users");

    // timestamp is real and machine-parseable
    let timestamp = parsed["timestamp"].as_str().expect("timestamp present");
    chrono::DateTime::parse_from_rfc3339(timestamp).expect("timestamp parses");
}

#[test]
fn test_log_injection_prevention() {
    // Newlines in a message must not produce extra log lines
    let buf = SharedBuf::default();
    let logger = buffered_json_logger(&buf);

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    logger.info(malicious_message);
    logger.flush().expect("Failed to flush");

    let content = buf.contents();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");

    // and the message survives the round trip intact
    let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["message"], malicious_message);
}

#[test]
fn test_shutdown_drains_buffered_lines() {
    let buf = SharedBuf::default();
    let logger = buffered_json_logger(&buf);

    for i in 0..150 {
        logger.info(format!("Message {}", i));
    }
    logger.shutdown().expect("Failed to shut down");

    let content = buf.contents();
    assert_eq!(content.lines().count(), 150, "Should have 150 log entries");
    assert!(content.contains("Message 0"));
    assert!(content.contains("Message 149"));
}

#[test]
fn test_per_transport_level_floors() {
    let (verbose, verbose_lines) = CaptureTransport::new();
    let (quiet, quiet_lines) = CaptureTransport::new();

    let logger = Logger::builder()
        .transports(vec![])
        .transport(Box::new(verbose), LogLevel::Debug)
        .transport(Box::new(quiet), LogLevel::Warn)
        .level(LogLevel::Debug)
        .build()
        .unwrap();

    logger.info("info line");
    logger.error("error line");

    assert_eq!(verbose_lines.lock().len(), 2);
    assert_eq!(quiet_lines.lock().len(), 1);
    assert!(quiet_lines.lock()[0].contains("error line"));
}

#[test]
fn test_transport_failure_isolation() {
    struct FailingTransport;

    impl Transport for FailingTransport {
        fn log(&self, _line: &str) -> Result<()> {
            Err(obskit::core::error::LoggerError::transport(
                "console",
                "simulated failure",
            ))
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn shutdown(&self) -> Result<()> {
            Ok(())
        }

        fn kind(&self) -> TransportKind {
            TransportKind::Console
        }
    }

    let (sink, lines) = CaptureTransport::new();
    let failures = Arc::new(Mutex::new(Vec::new()));
    let failures_clone = Arc::clone(&failures);

    let logger = Logger::builder()
        .transports(vec![])
        .transport(Box::new(FailingTransport), LogLevel::Trace)
        .transport(Box::new(sink), LogLevel::Trace)
        .on_transport_error(Arc::new(move |error, kind| {
            failures_clone.lock().push((error.to_string(), kind));
        }))
        .build()
        .unwrap();

    logger.info("must survive");

    assert_eq!(lines.lock().len(), 1, "later transport still receives the line");
    let seen = failures.lock();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.contains("simulated failure"));
    assert_eq!(seen[0].1, TransportKind::Console);
}

#[test]
fn test_pretty_format_output_shape() {
    let (sink, lines) = CaptureTransport::new();

    let logger = Logger::builder()
        .transports(vec![])
        .transport(Box::new(sink), LogLevel::Trace)
        .format(FormatKind::Pretty)
        .context("boot")
        .build()
        .unwrap();

    logger.info_with("server listening", LogMeta::new().with("port", 8080));

    let lines = lines.lock();
    let first = lines[0].lines().next().unwrap();
    assert!(first.starts_with('['));
    assert!(first.contains("INFO"));
    assert!(first.contains("[boot]"));
    assert!(first.ends_with("server listening"));
    // meta lands indented on following lines
    assert!(lines[0].lines().any(|l| l.starts_with("  ") && l.contains("8080")));
}

#[test]
fn test_correlation_flows_into_problem_documents() {
    let ctx = ScopedRequestContext::new();
    let (sink, lines) = CaptureTransport::new();

    let logger = Logger::builder()
        .transports(vec![])
        .transport(Box::new(sink), LogLevel::Trace)
        .correlation(Arc::new(ctx.clone()))
        .build()
        .unwrap();
    let handler = ErrorHandler::new(Arc::new(logger), Environment::Production)
        .with_context(Arc::new(ctx.clone()))
        .with_terminator(|_| {});

    let _scope = ctx.enter("req-abc", "trace-abc");
    handler.handle(RaisedError::from(AppError::not_found("No such user")));

    let lines = lines.lock();
    let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(parsed["level"], "error");
    assert_eq!(parsed["message"], "Problem occurred");
    assert_eq!(parsed["meta"]["problem"]["status"], 404);
    assert_eq!(
        parsed["meta"]["problem"]["extensions"]["requestId"],
        "req-abc"
    );
    // JSON lines carry correlation through the problem document only
    assert!(parsed.get("trace").is_none());
    assert!(parsed.get("traceId").is_none());
}

#[test]
fn test_catastrophic_error_drives_full_shutdown() {
    let buf = SharedBuf::default();
    let logger = buffered_json_logger(&buf);

    let exits = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&exits);
    let handler = ErrorHandler::new(Arc::new(logger), Environment::Production)
        .with_terminator(move |code| recorded.lock().push(code));

    handler.handle(RaisedError::from(
        AppError::internal("storage unreachable").catastrophic(),
    ));

    assert_eq!(exits.lock().as_slice(), &[1]);

    // both the report and the shutdown notice were flushed out
    let content = buf.contents();
    let messages: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(messages[0]["message"], "Problem occurred");
    assert_eq!(messages[1]["message"], "Shutting down (catastrophic)");
}

#[test]
fn test_concurrent_logging_is_lossless() {
    let buf = SharedBuf::default();
    let logger = Arc::new(buffered_json_logger(&buf));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..50 {
                    logger.info(format!("worker {} message {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.flush().expect("Failed to flush");

    let content = buf.contents();
    assert_eq!(content.lines().count(), 200);
    for line in content.lines() {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
        assert_eq!(parsed["level"], "info");
    }
}

#[test]
fn test_file_backed_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let transport = BufferedTransport::file(&log_file).expect("Failed to open log file");
    let logger = Logger::builder()
        .transports(vec![])
        .transport(Box::new(transport), LogLevel::Trace)
        .context("disk")
        .build()
        .unwrap();

    logger.info("first");
    logger.warn("second");
    logger.error("third");
    logger.shutdown().expect("Failed to shut down");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let levels: Vec<String> = content
        .lines()
        .map(|l| {
            let parsed: serde_json::Value = serde_json::from_str(l).unwrap();
            parsed["level"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(levels, vec!["info", "warn", "error"]);
}

#[test]
fn test_child_logger_shares_transports() {
    let buf = SharedBuf::default();
    let logger = buffered_json_logger(&buf);
    let child = logger.child("http");

    logger.info("from parent");
    child.info("from child");
    logger.flush().expect("Failed to flush");

    let content = buf.contents();
    let contexts: Vec<String> = content
        .lines()
        .map(|l| {
            let parsed: serde_json::Value = serde_json::from_str(l).unwrap();
            parsed["context"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(contexts, vec!["api", "http"]);
}
