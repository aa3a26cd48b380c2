//! Transport trait for formatted log output destinations

use super::error::Result;
use super::registry::TransportKind;

/// Sink for formatted log lines.
///
/// All methods take `&self` so one instance can be driven from many
/// threads; implementations carry their own interior locking.
/// `shutdown` is idempotent and `log` after shutdown is a no-op.
pub trait Transport: Send + Sync {
    fn log(&self, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn shutdown(&self) -> Result<()>;
    fn kind(&self) -> TransportKind;
}
