//! Test fixtures and helpers.
//!
//! Deterministic key hashes, common policy shapes, and a CLI-format renderer
//! that is written independently of the converter it is used to check.

use native_policy_core::{KeyHash, NativeScript};
use serde_json::{json, Value};

/// A deterministic key hash: 28 copies of `byte`.
pub fn key_hash(byte: u8) -> KeyHash {
    KeyHash::from_bytes([byte; 28])
}

/// `count` distinct deterministic key hashes, starting at `0x01`.
pub fn key_hashes(count: u8) -> Vec<KeyHash> {
    (1..=count).map(key_hash).collect()
}

/// A random key hash.
pub fn random_key_hash() -> KeyHash {
    KeyHash::from_bytes(rand::random())
}

/// An `required`-of-`count` multisig over [`key_hashes`].
pub fn multisig(required: u64, count: u8) -> NativeScript {
    NativeScript::at_least(
        required,
        key_hashes(count).into_iter().map(NativeScript::signature),
    )
}

/// A multisig that is only valid inside `[start, end)`.
pub fn timelocked_multisig(required: u64, count: u8, start: u64, end: u64) -> NativeScript {
    NativeScript::all([
        multisig(required, count),
        NativeScript::invalid_before(start),
        NativeScript::invalid_after(end),
    ])
}

/// Render a script in CLI format.
pub fn cli_json(script: &NativeScript) -> Value {
    match script {
        NativeScript::Signature { key_hash } => json!({
            "type": "sig",
            "keyHash": key_hash.to_hex(),
        }),
        NativeScript::AllOf { scripts } => json!({
            "type": "all",
            "scripts": scripts.iter().map(cli_json).collect::<Vec<_>>(),
        }),
        NativeScript::AnyOf { scripts } => json!({
            "type": "any",
            "scripts": scripts.iter().map(cli_json).collect::<Vec<_>>(),
        }),
        NativeScript::AtLeast { required, scripts } => json!({
            "type": "atLeast",
            "required": required,
            "scripts": scripts.iter().map(cli_json).collect::<Vec<_>>(),
        }),
        NativeScript::InvalidBefore { slot } => json!({ "type": "after", "slot": slot }),
        NativeScript::InvalidAfter { slot } => json!({ "type": "before", "slot": slot }),
    }
}
