//! # Native Policy Core
//!
//! Pure primitives for native policy scripts: the script model, conversion
//! from the CLI format, canonical CBOR encoding, and policy-id derivation.
//!
//! This crate contains no I/O and no logging. It is pure computation over
//! script trees.
//!
//! ## Key Types
//!
//! - [`NativeScript`] - The recursive script model
//! - [`LegacyScript`] - The CLI input format, see [`legacy::convert`]
//! - [`PolicyId`] - 28-byte identifier: `digest28(0x00 || canonical bytes)`
//! - [`KeyHash`] - 28-byte hash of a verification key
//!
//! ## Canonicalization
//!
//! Scripts are encoded as deterministic CBOR. See [`canonical`] module.
//! The codec and the digest are injected through [`CanonicalCodec`] and
//! [`Digest28`].

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod json;
pub mod legacy;
pub mod script;
pub mod types;
pub mod validation;

pub use canonical::{
    canonical_script_bytes, decode_script, encode_script, script_to_cbor_value, CanonicalCodec,
    DeterministicCbor, Value as CborValue,
};
pub use crypto::{Blake2b224, Blake3Xof28, Digest28};
pub use error::{CoreError, ValidationError};
pub use json::parse_json;
pub use legacy::{convert, convert_json, LegacyScript};
pub use script::{NativeScript, ScriptTag};
pub use types::{policy_preimage, KeyHash, PolicyId, HASH28_LEN, POLICY_ID_PREFIX};
pub use validation::{threshold_violations, validate_script};
