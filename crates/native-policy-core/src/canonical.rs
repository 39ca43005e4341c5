//! Canonical CBOR encoding for native scripts.
//!
//! Every script maps to an array whose first element is its integer tag:
//!
//! | Script        | Encoding                         |
//! |---------------|----------------------------------|
//! | Signature     | `[0, key_hash]`                  |
//! | AllOf         | `[1, [scripts...]]`              |
//! | AnyOf         | `[2, [scripts...]]`              |
//! | AtLeast       | `[3, required, [scripts...]]`    |
//! | InvalidBefore | `[4, slot]`                      |
//! | InvalidAfter  | `[5, slot]`                      |
//!
//! Bytes are produced with RFC 8949 Core Deterministic Encoding:
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - Map keys sorted by encoded byte comparison
//! - Floats in the shortest width (16, 32 or 64 bits) that keeps the value
//!
//! Policy ids hash these bytes, so a single differing byte is a different
//! policy. Child order is kept exactly as given.

use ciborium::value::Integer;
pub use ciborium::value::Value;

use crate::error::CoreError;
use crate::script::{NativeScript, ScriptTag};
use crate::types::KeyHash;

/// Turns a CBOR value tree into bytes.
///
/// Implementations must be canonical: one value, one byte sequence.
pub trait CanonicalCodec {
    fn encode(&self, value: &Value) -> Vec<u8>;
}

impl<C: CanonicalCodec + ?Sized> CanonicalCodec for &C {
    fn encode(&self, value: &Value) -> Vec<u8> {
        (**self).encode(value)
    }
}

/// RFC 8949 deterministic CBOR writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeterministicCbor;

impl CanonicalCodec for DeterministicCbor {
    fn encode(&self, value: &Value) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_value_to(&mut buf, value);
        buf
    }
}

/// Map a script to its tagged CBOR structure.
pub fn script_to_cbor_value(script: &NativeScript) -> Value {
    let tag = Value::Integer(script.tag().to_u8().into());

    match script {
        NativeScript::Signature { key_hash } => {
            Value::Array(vec![tag, Value::Bytes(key_hash.0.to_vec())])
        }
        NativeScript::AllOf { scripts } | NativeScript::AnyOf { scripts } => {
            Value::Array(vec![tag, scripts_to_cbor_array(scripts)])
        }
        NativeScript::AtLeast { required, scripts } => Value::Array(vec![
            tag,
            Value::Integer((*required).into()),
            scripts_to_cbor_array(scripts),
        ]),
        NativeScript::InvalidBefore { slot } | NativeScript::InvalidAfter { slot } => {
            Value::Array(vec![tag, Value::Integer((*slot).into())])
        }
    }
}

fn scripts_to_cbor_array(scripts: &[NativeScript]) -> Value {
    Value::Array(scripts.iter().map(script_to_cbor_value).collect())
}

/// Encode a script with the given codec.
pub fn encode_script<C: CanonicalCodec + ?Sized>(script: &NativeScript, codec: &C) -> Vec<u8> {
    codec.encode(&script_to_cbor_value(script))
}

/// Encode a script to canonical CBOR bytes.
pub fn canonical_script_bytes(script: &NativeScript) -> Vec<u8> {
    encode_script(script, &DeterministicCbor)
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => {
            encode_integer(buf, *i);
        }
        Value::Bytes(b) => {
            encode_bytes(buf, b);
        }
        Value::Text(s) => {
            encode_text(buf, s);
        }
        Value::Array(arr) => {
            encode_array(buf, arr);
        }
        Value::Map(entries) => {
            encode_map_canonical(buf, entries);
        }
        Value::Tag(tag, inner) => {
            encode_uint(buf, 6, *tag);
            encode_value_to(buf, inner);
        }
        Value::Bool(b) => {
            buf.push(if *b { 0xf5 } else { 0xf4 });
        }
        Value::Null => {
            buf.push(0xf6);
        }
        // Floats, plus anything ciborium adds later. Floats come out at the
        // shortest lossless width.
        other => {
            let written = ciborium::into_writer(other, &mut *buf);
            debug_assert!(written.is_ok(), "writing to a Vec cannot fail");
        }
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        // Major type 0: unsigned integer
        encode_uint(buf, 0, n as u64);
    } else {
        // Major type 1: -1 encodes as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item);
    }
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

/// Decode a script from canonical CBOR bytes.
///
/// The input must be exactly the canonical encoding of the decoded script:
/// non-minimal integers, indefinite lengths and trailing bytes are rejected
/// with [`CoreError::NonCanonical`].
pub fn decode_script(bytes: &[u8]) -> Result<NativeScript, CoreError> {
    let cursor = std::io::Cursor::new(bytes);
    let value: Value =
        ciborium::from_reader(cursor).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    let script = cbor_value_to_script(&value)?;

    if canonical_script_bytes(&script) != bytes {
        return Err(CoreError::NonCanonical);
    }

    Ok(script)
}

/// Convert a tagged CBOR structure back to a script.
fn cbor_value_to_script(value: &Value) -> Result<NativeScript, CoreError> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(CoreError::DecodingError("expected script array".into())),
    };

    let (tag_value, fields) = items
        .split_first()
        .ok_or_else(|| CoreError::DecodingError("empty script array".into()))?;

    let tag = match tag_value {
        Value::Integer(i) => u8::try_from(*i).ok().and_then(ScriptTag::from_u8),
        _ => None,
    }
    .ok_or_else(|| CoreError::DecodingError(format!("unknown script tag: {:?}", tag_value)))?;

    match (tag, fields) {
        (ScriptTag::Signature, [Value::Bytes(b)]) => {
            let key_hash = KeyHash::try_from(b.as_slice()).map_err(|_| {
                CoreError::InvalidKeyHash(format!("expected 28 bytes, got {}", b.len()))
            })?;
            Ok(NativeScript::Signature { key_hash })
        }
        (ScriptTag::AllOf, [Value::Array(children)]) => Ok(NativeScript::AllOf {
            scripts: cbor_values_to_scripts(children)?,
        }),
        (ScriptTag::AnyOf, [Value::Array(children)]) => Ok(NativeScript::AnyOf {
            scripts: cbor_values_to_scripts(children)?,
        }),
        (ScriptTag::AtLeast, [Value::Integer(n), Value::Array(children)]) => {
            Ok(NativeScript::AtLeast {
                required: cbor_uint(*n, "required")?,
                scripts: cbor_values_to_scripts(children)?,
            })
        }
        (ScriptTag::InvalidBefore, [Value::Integer(n)]) => Ok(NativeScript::InvalidBefore {
            slot: cbor_uint(*n, "slot")?,
        }),
        (ScriptTag::InvalidAfter, [Value::Integer(n)]) => Ok(NativeScript::InvalidAfter {
            slot: cbor_uint(*n, "slot")?,
        }),
        (tag, _) => Err(CoreError::DecodingError(format!(
            "invalid fields for {:?} script",
            tag
        ))),
    }
}

fn cbor_values_to_scripts(values: &[Value]) -> Result<Vec<NativeScript>, CoreError> {
    values.iter().map(cbor_value_to_script).collect()
}

fn cbor_uint(i: Integer, name: &str) -> Result<u64, CoreError> {
    u64::try_from(i)
        .map_err(|_| CoreError::DecodingError(format!("{name} must be an unsigned integer")))
}
