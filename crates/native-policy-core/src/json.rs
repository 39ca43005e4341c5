//! JSON text parsing and field access shared by the ledger and CLI readers.
//!
//! Scripts nest without bound, so text is parsed with serde_json's recursion
//! limit disabled. `serde_stacker` grows the stack onto the heap while the
//! parser descends.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::KeyHash;

/// Parse a complete JSON document with no nesting limit.
///
/// Trailing non-whitespace after the document is an error.
pub fn parse_json(text: &str) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

pub(crate) fn field<'a>(
    obj: &'a Map<String, Value>,
    kind: &str,
    name: &str,
) -> Result<&'a Value, CoreError> {
    obj.get(name)
        .ok_or_else(|| CoreError::MalformedScript(format!("{kind} script is missing `{name}`")))
}

pub(crate) fn u64_field(obj: &Map<String, Value>, kind: &str, name: &str) -> Result<u64, CoreError> {
    field(obj, kind, name)?.as_u64().ok_or_else(|| {
        CoreError::MalformedScript(format!(
            "{kind} script field `{name}` must be a non-negative integer"
        ))
    })
}

pub(crate) fn key_hash_field(
    obj: &Map<String, Value>,
    kind: &str,
    name: &str,
) -> Result<KeyHash, CoreError> {
    let raw = field(obj, kind, name)?.as_str().ok_or_else(|| {
        CoreError::MalformedScript(format!("{kind} script field `{name}` must be a string"))
    })?;
    KeyHash::from_hex(raw).map_err(|e| CoreError::InvalidKeyHash(format!("{raw}: {e}")))
}

pub(crate) fn array_field<'a>(
    obj: &'a Map<String, Value>,
    kind: &str,
    name: &str,
) -> Result<&'a [Value], CoreError> {
    field(obj, kind, name)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| {
            CoreError::MalformedScript(format!("{kind} script field `{name}` must be an array"))
        })
}
