//! Helpers for dynamic (`serde_json::Value`) elements.
//!
//! The planner and CLI pipe JSON documents through `Enumerable<Value>`. These
//! helpers give those values a total order, field access, and the string key
//! form used for grouping.

use std::cmp::Ordering;

use serde_json::Value;

/// Name of the JSON type, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve a dotted field path. `"."` (or an empty path) is the value itself;
/// a missing field resolves to `Null`.
pub fn field(value: &Value, path: &str) -> Value {
    let path = path.trim();
    if path.is_empty() || path == "." {
        return value.clone();
    }

    let mut cur = value;
    for part in path.split('.') {
        cur = match cur {
            Value::Object(map) => match map.get(part) {
                Some(v) => v,
                None => return Value::Null,
            },
            Value::Array(items) => match part.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(v) => v,
                None => return Value::Null,
            },
            _ => return Value::Null,
        };
    }
    cur.clone()
}

/// String key form of a value: strings render bare, everything else as JSON.
///
/// Grouping and lookups over dynamic values use this as the key, so `1` and
/// `"1"` land in the same group.
pub fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compare two JSON values.
///
/// Values of different types are ordered by type:
/// null < boolean < number < string < array < object.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                match compare(l, r) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        // Objects have no natural order; fall back to their rendering.
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        // Mixed types: order by type rank
        _ => type_order(a).cmp(&type_order(b)),
    }
}

fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    if let (Some(l), Some(r)) = (x.as_i64(), y.as_i64()) {
        return l.cmp(&r);
    }
    if let (Some(l), Some(r)) = (x.as_u64(), y.as_u64()) {
        return l.cmp(&r);
    }
    let l = x.as_f64().unwrap_or(f64::NAN);
    let r = y.as_f64().unwrap_or(f64::NAN);
    if l.is_nan() && r.is_nan() {
        Ordering::Equal
    } else if l.is_nan() {
        Ordering::Greater
    } else if r.is_nan() {
        Ordering::Less
    } else {
        l.partial_cmp(&r).unwrap_or(Ordering::Equal)
    }
}

fn type_order(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
