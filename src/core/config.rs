//! Logger configuration
//!
//! Plain serde-friendly data with baseline defaults and an
//! environment profile, so host applications can embed the logger
//! section in their own config files.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::registry::{FormatKind, TransportKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime environment of the host process.
///
/// Parsing is lenient: anything that is not `production` counts as
/// development, so a missing or misspelled environment variable fails
/// to the verbose side instead of the quiet one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Global level floor
    pub level: LogLevel,
    pub format: FormatKind,
    /// Fan-out order is configuration order
    pub transports: Vec<TransportKind>,
    /// Default context label stamped on unlabeled records
    pub context: Option<String>,
    /// Per-transport floors; transports not listed use `level`
    pub transport_levels: BTreeMap<TransportKind, LogLevel>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl LoggerConfig {
    /// Production-leaning defaults: info floor, JSON lines to console.
    pub fn baseline() -> Self {
        let mut transport_levels = BTreeMap::new();
        transport_levels.insert(TransportKind::Console, LogLevel::Debug);
        transport_levels.insert(TransportKind::Buffered, LogLevel::Info);
        Self {
            level: LogLevel::Info,
            format: FormatKind::Json,
            transports: vec![TransportKind::Console],
            context: Some("core".to_string()),
            transport_levels,
        }
    }

    /// Baseline with the environment profile applied.
    ///
    /// Development swaps in human-readable output; production keeps
    /// the machine-readable baseline untouched.
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self::baseline();
        if !environment.is_production() {
            config.format = FormatKind::Pretty;
            config.transports = vec![TransportKind::Pretty];
        }
        config
    }

    /// Effective floor for one transport.
    pub fn transport_level(&self, kind: TransportKind) -> LogLevel {
        self.transport_levels
            .get(&kind)
            .copied()
            .unwrap_or(self.level)
    }

    /// Reject configurations the registry cannot build.
    pub fn validate(&self) -> Result<()> {
        let mut seen = Vec::new();
        for kind in &self.transports {
            if seen.contains(kind) {
                return Err(LoggerError::config(
                    "transports",
                    format!("duplicate transport: '{}'", kind),
                ));
            }
            seen.push(*kind);
        }
        Ok(())
    }
}
