//! # Native Policy
//!
//! Build policy ids for native scripts: multi-signature and time-locked
//! authorization rules attached to ledger transactions.
//!
//! ## Overview
//!
//! A [`PolicyScript`] is created from one of:
//!
//! - **A script**: a [`NativeScript`] tree built in code
//! - **CLI JSON**: the `{"type": "sig", ...}` format, converted on the way in
//! - **Ledger JSON**: the `{"pubKeyHash": ...}` / `{"all": [...]}` format
//! - **CBOR**: canonical bytes taken from a transaction
//!
//! At construction it is encoded to canonical CBOR and hashed into a 28-byte
//! policy id. Both are fixed from then on.
//!
//! ## Usage
//!
//! ```rust
//! use native_policy::{KeyHash, NativeScript, PolicyScript};
//!
//! let script = NativeScript::at_least(
//!     1,
//!     [
//!         NativeScript::signature(KeyHash::from_bytes([0x11; 28])),
//!         NativeScript::invalid_before(1000),
//!     ],
//! );
//! let policy = PolicyScript::new(script);
//! assert_eq!(policy.policy_id().as_bytes().len(), 28);
//!
//! let cli = PolicyScript::from_legacy_str(
//!     r#"{"type": "atLeast", "required": 1, "scripts": [
//!         {"type": "sig", "keyHash": "11111111111111111111111111111111111111111111111111111111"},
//!         {"type": "after", "slot": 1000}
//!     ]}"#,
//! )
//! .unwrap();
//! assert_eq!(cli.policy_id(), policy.policy_id());
//! ```
//!
//! ## Re-exports
//!
//! - `native_policy::core` - Script model, CLI conversion, canonical CBOR, digests

pub mod error;
pub mod policy;

// Re-export component crate
pub use native_policy_core as core;

// Re-export main types for convenience
pub use error::{PolicyError, Result};
pub use policy::{DigestAlgorithm, PolicyConfig, PolicyScript};

// Re-export commonly used core types
pub use native_policy_core::{
    Blake2b224, Blake3Xof28, CanonicalCodec, CoreError, Digest28, DeterministicCbor, KeyHash,
    LegacyScript, NativeScript, PolicyId, ScriptTag, ValidationError,
};
