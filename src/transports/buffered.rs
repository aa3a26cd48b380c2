//! Buffered transport with a background writer thread

use crate::core::registry::TransportKind;
use crate::core::{LoggerError, Result, Transport};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Default queue capacity in lines.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default shutdown timeout for transport cleanup (5 seconds)
///
/// This timeout is used when the transport is dropped without explicit
/// shutdown. For custom timeout control, use
/// [`BufferedTransport::with_config`] instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How long `flush` waits for the worker acknowledgement.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

enum Command {
    Line(String),
    Flush(Sender<()>),
}

/// Bounded queue feeding a background writer thread.
///
/// `log` never blocks the caller: when the queue is full the line is
/// dropped and counted, with an operator alert on the first drop and
/// every 1000th. `flush` round-trips an acknowledgement through the
/// worker so the caller knows everything queued so far hit the writer.
pub struct BufferedTransport {
    sender: RwLock<Option<Sender<Command>>>,
    handle: RwLock<Option<thread::JoinHandle<()>>>,
    dropped: Arc<AtomicU64>,
    shutdown_timeout: Duration,
}

impl BufferedTransport {
    /// Buffered stdout with default capacity.
    pub fn stdout() -> Result<Self> {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    /// Append to a file, creating parent directories as needed.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        parent.display().to_string(),
                        e,
                    )
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        Self::with_writer(Box::new(BufWriter::new(file)))
    }

    /// Feed an arbitrary writer. Useful for captured output in tests.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Result<Self> {
        Self::with_config(writer, DEFAULT_BUFFER_SIZE, DEFAULT_SHUTDOWN_TIMEOUT)
    }

    pub fn with_config(
        writer: Box<dyn Write + Send>,
        buffer_size: usize,
        shutdown_timeout: Duration,
    ) -> Result<Self> {
        let (sender, receiver) = bounded(buffer_size);
        let dropped = Arc::new(AtomicU64::new(0));
        let dropped_clone = Arc::clone(&dropped);

        let handle = thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || Self::worker_loop(writer, receiver, dropped_clone))?;

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            handle: RwLock::new(Some(handle)),
            dropped,
            shutdown_timeout,
        })
    }

    /// Lines lost to queue overflow or writer failure.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn worker_loop(
        mut writer: Box<dyn Write + Send>,
        receiver: Receiver<Command>,
        dropped: Arc<AtomicU64>,
    ) {
        // Batch draining reduces writer flushes under bursty load
        const BATCH_SIZE: usize = 50;

        let mut batch: Vec<String> = Vec::with_capacity(BATCH_SIZE);

        loop {
            // Block for the first command
            match receiver.recv() {
                Ok(Command::Line(line)) => batch.push(line),
                Ok(Command::Flush(ack)) => {
                    Self::write_batch(&mut writer, &mut batch, &dropped);
                    let _ = ack.send(());
                    continue;
                }
                Err(_) => {
                    // Channel closed, write remaining batch and exit
                    Self::write_batch(&mut writer, &mut batch, &dropped);
                    break;
                }
            }

            // Drain whatever arrived meanwhile, up to the batch size
            while batch.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(Command::Line(line)) => batch.push(line),
                    Ok(Command::Flush(ack)) => {
                        Self::write_batch(&mut writer, &mut batch, &dropped);
                        let _ = ack.send(());
                    }
                    Err(_) => break,
                }
            }

            Self::write_batch(&mut writer, &mut batch, &dropped);
        }
    }

    fn write_batch(
        writer: &mut Box<dyn Write + Send>,
        batch: &mut Vec<String>,
        dropped: &AtomicU64,
    ) {
        for (idx, line) in batch.iter().enumerate() {
            if let Err(e) = Self::write_line(writer, line) {
                let lost = (batch.len() - idx) as u64;
                dropped.fetch_add(lost, Ordering::Relaxed);
                eprintln!(
                    "[LOGGER ERROR] Buffered writer failed: {}. {} lines lost.",
                    e, lost
                );
                break;
            }
        }
        batch.clear();

        if let Err(e) = writer.flush() {
            eprintln!("[LOGGER ERROR] Buffered writer flush failed: {}", e);
        }
    }

    fn write_line(writer: &mut Box<dyn Write + Send>, line: &str) -> std::io::Result<()> {
        writer.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Drop a line with alert notification
    fn alert_and_drop(&self) {
        let dropped_count = self.dropped.fetch_add(1, Ordering::Relaxed);

        // Alert on first drop and periodically thereafter
        let should_alert = dropped_count == 0 || (dropped_count + 1).is_multiple_of(1000);

        if should_alert {
            eprintln!(
                "[LOGGER WARNING] Transport queue full, {} lines dropped. \
                 Consider increasing the buffer size.",
                dropped_count + 1
            );
        }
    }
}

impl Transport for BufferedTransport {
    fn log(&self, line: &str) -> Result<()> {
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            // Transport shut down, silently ignore
            return Ok(());
        };

        match sender.try_send(Command::Line(line.to_string())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.alert_and_drop();
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => {
                // Worker exiting, silently ignore
                Ok(())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        // Clone the sender out so a blocking wait never holds the lock
        let sender = match self.sender.read().as_ref() {
            Some(sender) => sender.clone(),
            None => return Err(LoggerError::TransportStopped),
        };

        let (ack_tx, ack_rx) = bounded(1);
        sender
            .send(Command::Flush(ack_tx))
            .map_err(|_| LoggerError::TransportStopped)?;

        ack_rx
            .recv_timeout(FLUSH_TIMEOUT)
            .map_err(|_| LoggerError::FlushTimeout {
                timeout_ms: FLUSH_TIMEOUT.as_millis() as u64,
            })?;
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        // Close the channel to signal the worker; taking the sender
        // also makes every later call observe the stopped state.
        let sender = self.sender.write().take();
        if sender.is_none() {
            // Already shut down
            return Ok(());
        }
        drop(sender);

        let handle = self.handle.write().take();
        if let Some(handle) = handle {
            let start = std::time::Instant::now();

            // Wait for the worker to finish draining all lines
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Buffered worker thread panicked during shutdown: {:?}",
                            e
                        );
                        return Err(LoggerError::transport_panic(
                            "buffered",
                            "worker thread panicked during shutdown",
                        ));
                    }
                    break;
                }

                if start.elapsed() >= self.shutdown_timeout {
                    eprintln!(
                        "[LOGGER WARNING] Buffered worker thread did not finish within timeout. \
                         Some lines may be lost."
                    );
                    return Err(LoggerError::ShutdownTimeout {
                        timeout_ms: self.shutdown_timeout.as_millis() as u64,
                    });
                }

                // Small sleep to avoid busy-waiting
                thread::sleep(Duration::from_millis(10));
            }
        }

        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Buffered
    }
}

impl Drop for BufferedTransport {
    fn drop(&mut self) {
        // Backstop for transports dropped without explicit shutdown;
        // drains pending lines within the configured timeout.
        let _ = self.shutdown();
    }
}
