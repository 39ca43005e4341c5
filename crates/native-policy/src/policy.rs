//! PolicyScript: a native script frozen together with its encoding and id.
//!
//! All derived artifacts are computed once, in the constructor. There are no
//! setters; a `PolicyScript` never changes after it is built.

use bytes::Bytes;
use serde_json::Value;

use native_policy_core::{
    convert, decode_script, encode_script, parse_json, threshold_violations, Blake2b224,
    Blake3Xof28, CanonicalCodec, Digest28, DeterministicCbor, LegacyScript, NativeScript,
    PolicyId, HASH28_LEN,
};

use crate::error::Result;

/// Which 28-byte digest derives the policy id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// Blake2b-224. Ledger-compatible.
    #[default]
    Blake2b224,
    /// Truncated Blake3 XOF. Not ledger-compatible.
    Blake3Xof28,
}

impl Digest28 for DigestAlgorithm {
    fn digest28(&self, data: &[u8]) -> [u8; HASH28_LEN] {
        match self {
            Self::Blake2b224 => Blake2b224.digest28(data),
            Self::Blake3Xof28 => Blake3Xof28.digest28(data),
        }
    }
}

/// Configuration for building policies.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Digest used for the policy id.
    pub digest: DigestAlgorithm,
    /// Reject `AtLeast` nodes whose threshold exceeds their child count.
    pub strict_thresholds: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::default(),
            strict_thresholds: false,
        }
    }
}

/// A native script with its canonical bytes and policy id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyScript {
    script: NativeScript,
    cbor: Bytes,
    policy_id: PolicyId,
}

impl PolicyScript {
    /// Build from a script with deterministic CBOR and Blake2b-224.
    pub fn new(script: NativeScript) -> Self {
        Self::with_backend(script, &DeterministicCbor, &Blake2b224)
    }

    /// Build from a script with an injected codec and digest.
    pub fn with_backend<C, D>(script: NativeScript, codec: &C, digest: &D) -> Self
    where
        C: CanonicalCodec + ?Sized,
        D: Digest28 + ?Sized,
    {
        let cbor = encode_script(&script, codec);
        let policy_id = PolicyId::derive(&cbor, digest);

        tracing::debug!(
            policy_id = %policy_id,
            cbor_len = cbor.len(),
            root = ?script.tag(),
            "built policy script"
        );

        Self {
            script,
            cbor: Bytes::from(cbor),
            policy_id,
        }
    }

    /// Build from a script according to `config`.
    ///
    /// Inconsistent `AtLeast` thresholds are encoded as given unless
    /// `config.strict_thresholds` is set, in which case the first one found
    /// is returned as an error.
    pub fn with_config(script: NativeScript, config: &PolicyConfig) -> Result<Self> {
        let violations = threshold_violations(&script);

        if config.strict_thresholds {
            if let Some(first) = violations.into_iter().next() {
                return Err(first.into());
            }
        } else {
            for violation in &violations {
                tracing::warn!("encoding unsatisfiable threshold: {}", violation);
            }
        }

        Ok(Self::with_backend(script, &DeterministicCbor, &config.digest))
    }

    /// Build from a CLI-format script.
    pub fn from_legacy(legacy: &LegacyScript) -> Self {
        Self::new(convert(legacy))
    }

    /// Build from a CLI-format JSON value.
    ///
    /// Fails with `UnsupportedScriptType` when any node lacks a known `type`.
    pub fn from_legacy_json(value: &Value) -> Result<Self> {
        let legacy = LegacyScript::from_json(value)?;
        Ok(Self::from_legacy(&legacy))
    }

    /// Build from CLI-format JSON text. Nesting depth is unbounded.
    pub fn from_legacy_str(json: &str) -> Result<Self> {
        let value = parse_json(json)?;
        Self::from_legacy_json(&value)
    }

    /// Build from ledger-format JSON text (`{"pubKeyHash": ...}`, `{"all": [...]}`, ...).
    ///
    /// Each object must hold exactly one script case; mixed keys fail with
    /// `MalformedScript`.
    pub fn from_script_str(json: &str) -> Result<Self> {
        let value = parse_json(json)?;
        let script = NativeScript::from_json(&value)?;
        Ok(Self::new(script))
    }

    /// Build from canonical CBOR bytes. The stored bytes equal `bytes`.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        let script = decode_script(bytes)?;
        Ok(Self::new(script))
    }

    /// The canonical CBOR encoding of the script.
    pub fn cbor(&self) -> &[u8] {
        &self.cbor
    }

    /// The canonical CBOR encoding as hex.
    pub fn cbor_hex(&self) -> String {
        hex::encode(&self.cbor)
    }

    /// The 28-byte policy id.
    pub fn policy_id(&self) -> PolicyId {
        self.policy_id
    }

    /// The script this policy was built from.
    pub fn script(&self) -> &NativeScript {
        &self.script
    }

    /// The script in ledger JSON shape.
    pub fn script_json(&self) -> Value {
        self.script.to_json()
    }

    /// Take the script, bytes and id apart.
    pub fn into_parts(self) -> (NativeScript, Bytes, PolicyId) {
        (self.script, self.cbor, self.policy_id)
    }
}

impl From<NativeScript> for PolicyScript {
    fn from(script: NativeScript) -> Self {
        Self::new(script)
    }
}

impl From<&LegacyScript> for PolicyScript {
    fn from(legacy: &LegacyScript) -> Self {
        Self::from_legacy(legacy)
    }
}
