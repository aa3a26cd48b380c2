//! Console transport implementation

use crate::core::registry::TransportKind;
use crate::core::{Result, Transport};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes formatted lines to stdout.
///
/// Lines missing a trailing newline get one, so a formatter that does
/// not terminate its output still produces one record per line.
pub struct ConsoleTransport {
    stopped: AtomicBool,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ConsoleTransport {
    fn log(&self, line: &str) -> Result<()> {
        if self.stopped.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        self.stopped.store(true, Ordering::Release);
        self.flush()
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Console
    }
}
