//! Cycle-safe reduction of meta values to plain JSON
//!
//! The sanitizer is total: it never fails, never panics, and never
//! loops, whatever shape the input tree takes. Values JSON cannot
//! express degrade to a defined JSON form instead of erroring.

use crate::core::meta::{LogMeta, MetaValue};
use crate::core::timestamp::TimestampFormat;
use serde_json::Value;
use std::collections::HashSet;

/// Marker emitted when a shared node is its own ancestor.
const CIRCULAR: &str = "[Circular]";

/// Reduce a meta value to plain JSON.
///
/// Shared nodes already on the current ancestor path become the string
/// `"[Circular]"`. A shared node reachable twice through siblings is
/// not a cycle and serializes normally at both positions.
pub fn sanitize(value: &MetaValue) -> Value {
    let mut visited = HashSet::new();
    sanitize_inner(value, &mut visited)
}

/// Reduce a whole meta map to a JSON object.
pub fn sanitize_meta(meta: &LogMeta) -> Value {
    let mut visited = HashSet::new();
    let mut obj = serde_json::Map::new();
    for (key, value) in meta.iter() {
        obj.insert(key.clone(), sanitize_inner(value, &mut visited));
    }
    Value::Object(obj)
}

fn sanitize_inner(value: &MetaValue, visited: &mut HashSet<usize>) -> Value {
    match value {
        MetaValue::Null => Value::Null,
        MetaValue::Bool(b) => Value::Bool(*b),
        MetaValue::Int(i) => Value::Number((*i).into()),
        // NaN and infinities have no JSON spelling
        MetaValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        MetaValue::String(s) => Value::String(s.clone()),
        MetaValue::Timestamp(dt) => Value::String(TimestampFormat::Iso8601.format(dt)),
        MetaValue::Pattern(re) => Value::String(re.as_str().to_string()),
        MetaValue::Array(items) | MetaValue::Set(items) => Value::Array(
            items
                .iter()
                .map(|item| sanitize_inner(item, visited))
                .collect(),
        ),
        MetaValue::Map(entries) => {
            let mut obj = serde_json::Map::new();
            for (key, val) in entries {
                let key_text = match key {
                    MetaValue::String(s) => s.clone(),
                    other => {
                        let sanitized_key = sanitize_inner(other, visited);
                        serde_json::to_string(&sanitized_key).unwrap_or_default()
                    }
                };
                obj.insert(key_text, sanitize_inner(val, visited));
            }
            Value::Object(obj)
        }
        MetaValue::Error(info) => {
            let mut obj = serde_json::Map::new();
            obj.insert("name".to_string(), Value::String(info.name.clone()));
            obj.insert("message".to_string(), Value::String(info.message.clone()));
            if let Some(stack) = &info.stack {
                obj.insert("stack".to_string(), Value::String(stack.clone()));
            }
            Value::Object(obj)
        }
        MetaValue::Object(map) => {
            let mut obj = serde_json::Map::new();
            for (key, val) in map {
                obj.insert(key.clone(), sanitize_inner(val, visited));
            }
            Value::Object(obj)
        }
        MetaValue::Shared(node) => {
            let identity = std::sync::Arc::as_ptr(node) as usize;
            if visited.contains(&identity) {
                return Value::String(CIRCULAR.to_string());
            }
            // Enter/exit discipline keeps the set scoped to the
            // current ancestor path, so sibling reuse stays legal.
            visited.insert(identity);
            let result = {
                let inner = node.read();
                sanitize_inner(&inner, visited)
            };
            visited.remove(&identity);
            result
        }
        MetaValue::Opaque(_) => Value::Null,
    }
}
