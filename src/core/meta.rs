//! Structured meta payloads for log records
//!
//! This module provides:
//! - `MetaValue`: A JSON-superset value tree attached to log records
//! - `LogMeta`: Ordered string-keyed map of meta values
//! - `ErrorInfo`: Serializable error snapshot (name, message, stack)
//!
//! `MetaValue` deliberately covers more than JSON does: timestamps,
//! compiled patterns, maps with arbitrary keys, sets, and shared
//! mutable nodes all occur in real diagnostic payloads. The sanitizer
//! in [`crate::core::sanitize`] reduces all of them to plain JSON.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared mutable meta node.
///
/// The only way to alias a value in two places or to build a cycle;
/// everything else in the tree is owned.
pub type SharedValue = Arc<RwLock<MetaValue>>;

/// Wrap a value in a shared node.
pub fn shared(value: MetaValue) -> SharedValue {
    Arc::new(RwLock::new(value))
}

/// Serializable snapshot of an error: name, message, optional stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Value type for structured log meta
#[derive(Debug, Clone)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Point in time; serializes as ISO 8601 text
    Timestamp(DateTime<Utc>),
    /// Compiled pattern; serializes as its source text
    Pattern(Regex),
    Array(Vec<MetaValue>),
    /// Insertion-ordered map allowing non-string keys
    Map(Vec<(MetaValue, MetaValue)>),
    /// Serializes as a JSON array
    Set(Vec<MetaValue>),
    Error(ErrorInfo),
    Object(BTreeMap<String, MetaValue>),
    /// Aliasable node; the only place cycles can occur
    Shared(SharedValue),
    /// Placeholder for a value with no JSON representation; the tag
    /// names what it was. Serializes as null.
    Opaque(&'static str),
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::String(s)
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::String(s.to_string())
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Int(i)
    }
}

impl From<i32> for MetaValue {
    fn from(i: i32) -> Self {
        MetaValue::Int(i as i64)
    }
}

impl From<u32> for MetaValue {
    fn from(i: u32) -> Self {
        MetaValue::Int(i as i64)
    }
}

impl From<f64> for MetaValue {
    fn from(f: f64) -> Self {
        MetaValue::Float(f)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for MetaValue {
    fn from(dt: DateTime<Utc>) -> Self {
        MetaValue::Timestamp(dt)
    }
}

impl From<Regex> for MetaValue {
    fn from(re: Regex) -> Self {
        MetaValue::Pattern(re)
    }
}

impl From<ErrorInfo> for MetaValue {
    fn from(info: ErrorInfo) -> Self {
        MetaValue::Error(info)
    }
}

impl From<Vec<MetaValue>> for MetaValue {
    fn from(values: Vec<MetaValue>) -> Self {
        MetaValue::Array(values)
    }
}

impl From<SharedValue> for MetaValue {
    fn from(node: SharedValue) -> Self {
        MetaValue::Shared(node)
    }
}

impl From<serde_json::Value> for MetaValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => MetaValue::Null,
            serde_json::Value::Bool(b) => MetaValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    MetaValue::Int(i)
                } else {
                    MetaValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => MetaValue::String(s),
            serde_json::Value::Array(items) => {
                MetaValue::Array(items.into_iter().map(MetaValue::from).collect())
            }
            serde_json::Value::Object(map) => MetaValue::Object(
                map.into_iter().map(|(k, v)| (k, MetaValue::from(v))).collect(),
            ),
        }
    }
}

/// Ordered string-keyed meta map attached to a log record
#[derive(Debug, Clone, Default)]
pub struct LogMeta {
    fields: BTreeMap<String, MetaValue>,
}

impl LogMeta {
    /// Create a new empty meta map
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the meta map
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<MetaValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the meta map (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<MetaValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    /// Check if the meta map has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for LogMeta
where
    K: Into<String>,
    V: Into<MetaValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
