//! Line-synchronous console transport

use crate::core::registry::TransportKind;
use crate::core::{Result, Transport};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes to stdout and flushes after every line.
///
/// The per-line flush keeps human-readable output intact through
/// abrupt exits, at the cost of write batching. Intended for
/// development; production traffic belongs on the console or
/// buffered transports.
pub struct PrettyTransport {
    stopped: AtomicBool,
}

impl PrettyTransport {
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
        }
    }
}

impl Default for PrettyTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for PrettyTransport {
    fn log(&self, line: &str) -> Result<()> {
        if self.stopped.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // every log call already flushed
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        self.stopped.store(true, Ordering::Release);
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_after_shutdown_is_a_noop() {
        let transport = PrettyTransport::new();
        transport.shutdown().unwrap();
        assert!(transport.log("dropped silently").is_ok());
    }

    #[test]
    fn test_flush_and_shutdown_are_idempotent() {
        let transport = PrettyTransport::new();
        assert!(transport.flush().is_ok());
        assert!(transport.shutdown().is_ok());
        assert!(transport.shutdown().is_ok());
    }

    #[test]
    fn test_kind() {
        assert_eq!(PrettyTransport::new().kind(), TransportKind::Pretty);
    }
}
