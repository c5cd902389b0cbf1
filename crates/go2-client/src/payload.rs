//! Request/response payload shaping.
//!
//! The API speaks camelCase; Rust callers speak snake_case. Outgoing objects
//! are renamed key by key with `null` entries dropped, and incoming objects are
//! read with [`get_first`] so either convention is accepted.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// Convert a snake_case string to camelCase.
pub fn snake_to_camel(value: &str) -> String {
    let mut parts = value.split('_');
    let mut out = String::with_capacity(value.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert top-level snake_case keys to camelCase and drop `null` values.
///
/// Nested objects are left untouched.
pub fn map_snake_keys(data: Map<String, Value>) -> Map<String, Value> {
    data.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (snake_to_camel(&key), value))
        .collect()
}

/// Serialize `value` to an object and run it through [`map_snake_keys`].
pub fn to_wire<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map_snake_keys(map)),
        other => Err(Error::new(ErrorKind::Json(format!(
            "expected an object to send, got {other}"
        )))),
    }
}

/// Return the value of the first key present in `data`.
///
/// A key that is present with a `null` value still wins.
pub fn get_first<'a>(data: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| data.get(*key))
}
