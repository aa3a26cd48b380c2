//! Closed catalog of formats and transports
//!
//! The set of formats and transports is a compile-time enum, not a
//! runtime string map: a kind that parses is a kind that builds, and
//! unknown names die at configuration parse time with the offending
//! text in the error.

use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::transport::Transport;
use crate::formatters::{JsonFormatter, PrettyFormatter};
use crate::transports::{BufferedTransport, ConsoleTransport, PrettyTransport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable line plus indented meta
    Pretty,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Json => "json",
            FormatKind::Pretty => "pretty",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(FormatKind::Json),
            "pretty" => Ok(FormatKind::Pretty),
            _ => Err(LoggerError::config(
                "format",
                format!("unknown format: '{}'", s),
            )),
        }
    }
}

/// Transport selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Plain stdout
    Console,
    /// Stdout, flushed per line
    Pretty,
    /// Bounded queue with a background writer thread
    Buffered,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Console => "console",
            TransportKind::Pretty => "pretty",
            TransportKind::Buffered => "buffered",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(TransportKind::Console),
            "pretty" => Ok(TransportKind::Pretty),
            "buffered" => Ok(TransportKind::Buffered),
            _ => Err(LoggerError::config(
                "transport",
                format!("unknown transport: '{}'", s),
            )),
        }
    }
}

/// Instantiate the formatter for a kind. Total by construction.
pub fn build_formatter(kind: FormatKind) -> Box<dyn Formatter> {
    match kind {
        FormatKind::Json => Box::new(JsonFormatter::new()),
        FormatKind::Pretty => Box::new(PrettyFormatter::new()),
    }
}

/// Instantiate the transport for a kind.
///
/// Only the buffered transport can fail here (worker spawn).
pub fn build_transport(kind: TransportKind) -> Result<Box<dyn Transport>> {
    match kind {
        TransportKind::Console => Ok(Box::new(ConsoleTransport::new())),
        TransportKind::Pretty => Ok(Box::new(PrettyTransport::new())),
        TransportKind::Buffered => Ok(Box::new(BufferedTransport::stdout()?)),
    }
}
