//! Stress tests for the logging pipeline under load
//!
//! These tests verify:
//! - No lines are lost while the queue stays below capacity
//! - Overflow drops and counts instead of blocking callers
//! - Shutdown drains queued lines even with producers still running
//! - Multi-transport fan-out holds up under concurrent logging

use obskit::core::error::Result;
use obskit::core::log_level::LogLevel;
use obskit::core::logger::Logger;
use obskit::core::registry::TransportKind;
use obskit::core::transport::Transport;
use obskit::transports::{BufferedTransport, DEFAULT_SHUTDOWN_TIMEOUT};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
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

/// Writer that stalls on every write, to force queue overflow.
struct SleepyWriter {
    delay: Duration,
}

impl Write for SleepyWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::thread::sleep(self.delay);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct CountingTransport {
    count: Arc<Mutex<usize>>,
}

impl Transport for CountingTransport {
    fn log(&self, _line: &str) -> Result<()> {
        *self.count.lock() += 1;
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

/// Every line logged below queue capacity must reach the writer
#[test]
fn test_no_loss_below_capacity() {
    let buf = SharedBuf::default();
    let transport = BufferedTransport::with_writer(Box::new(buf.clone())).unwrap();
    let logger = Arc::new(
        Logger::builder()
            .transports(vec![])
            .transport(Box::new(transport), LogLevel::Trace)
            .level(LogLevel::Trace)
            .build()
            .unwrap(),
    );

    let mut handles = vec![];
    for thread_id in 0..8 {
        let logger_clone = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                logger_clone.info(format!("T{} message {}", thread_id, i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = buf.contents();
    assert_eq!(content.lines().count(), 800, "Expected all 800 lines delivered");
    for line in content.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("every line is valid JSON");
    }
}

/// A stalled writer must cost the caller nothing: lines are dropped
/// and counted, never awaited
#[test]
fn test_overflow_drops_instead_of_blocking() {
    let writer = SleepyWriter {
        delay: Duration::from_millis(20),
    };
    let transport = Arc::new(
        BufferedTransport::with_config(Box::new(writer), 4, DEFAULT_SHUTDOWN_TIMEOUT).unwrap(),
    );

    let start = Instant::now();
    let mut handles = vec![];
    for _ in 0..4 {
        let transport_clone = Arc::clone(&transport);
        handles.push(std::thread::spawn(move || {
            for i in 0..500 {
                transport_clone.log(&format!("burst {}", i)).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    let elapsed = start.elapsed();

    // 2000 lines against a 20ms-per-line writer would block for about
    // 40 seconds; non-blocking submission finishes orders of magnitude
    // faster even on a loaded CI machine
    assert!(
        elapsed < Duration::from_secs(10),
        "log() blocked the callers: took {:?}",
        elapsed
    );
    assert!(transport.dropped_count() > 0, "Expected overflow drops");
}

/// Shutdown while producers are still logging must drain what was
/// queued and turn the rest into silent no-ops
#[test]
fn test_shutdown_with_live_producers() {
    let buf = SharedBuf::default();
    let transport = BufferedTransport::with_writer(Box::new(buf.clone())).unwrap();
    let logger = Arc::new(
        Logger::builder()
            .transports(vec![])
            .transport(Box::new(transport), LogLevel::Trace)
            .level(LogLevel::Trace)
            .build()
            .unwrap(),
    );

    let mut handles = vec![];
    for thread_id in 0..4 {
        let logger_clone = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..200 {
                logger_clone.info(format!("T{} live {}", thread_id, i));
            }
        }));
    }

    // Shut down somewhere in the middle of the burst
    std::thread::sleep(Duration::from_millis(5));
    logger.shutdown().expect("Failed to shut down");

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Whatever made it through must be whole lines
    let content = buf.contents();
    for line in content.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("no torn lines");
    }
}

/// Adapted burst pattern: every burst marker must survive because the
/// queue never fills
#[test]
fn test_rapid_burst_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("burst.log");

    let transport = BufferedTransport::file(&log_file).expect("Failed to open log file");
    let logger = Logger::builder()
        .transports(vec![])
        .transport(Box::new(transport), LogLevel::Trace)
        .level(LogLevel::Trace)
        .build()
        .unwrap();

    for burst in 0..10 {
        for i in 0..20 {
            logger.trace(format!("Burst {} trace {}", burst, i));
        }
        logger.fatal(format!("Burst {} complete", burst));
    }
    logger.shutdown().expect("Failed to shut down");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 210);
    for burst in 0..10 {
        assert!(
            content.contains(&format!("Burst {} complete", burst)),
            "Burst {} completion marker missing!",
            burst
        );
    }
}

/// Concurrent logging through a wide fan-out delivers every line to
/// every transport
#[test]
fn test_fanout_under_concurrent_load() {
    let counts: Vec<Arc<Mutex<usize>>> = (0..8).map(|_| Arc::new(Mutex::new(0))).collect();

    let mut builder = Logger::builder().transports(vec![]).level(LogLevel::Trace);
    for count in &counts {
        builder = builder.transport(
            Box::new(CountingTransport {
                count: Arc::clone(count),
            }),
            LogLevel::Trace,
        );
    }
    let logger = Arc::new(builder.build().unwrap());

    let mut handles = vec![];
    for _ in 0..4 {
        let logger_clone = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                logger_clone.warn(format!("fanout {}", i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    for count in &counts {
        assert_eq!(*count.lock(), 400, "every transport sees every line");
    }
}
