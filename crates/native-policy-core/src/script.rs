//! The native script model.
//!
//! A native script is a small recursive policy language over key witnesses
//! and validity intervals. Child order inside `AllOf`, `AnyOf` and `AtLeast`
//! is significant: it is carried verbatim into the canonical encoding and
//! therefore into the policy id.
//!
//! With serde the model reads and writes the ledger JSON shape:
//!
//! ```json
//! { "n": 2, "k": [ { "pubKeyHash": "..." }, { "invalidAfter": 5000 } ] }
//! ```
//!
//! Every object carries exactly one case's keys. Objects with extra or
//! mixed keys are rejected rather than read as the first matching case.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::error::CoreError;
use crate::json::{array_field, key_hash_field, u64_field};
use crate::types::KeyHash;

/// The integer tag that leads every encoded script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScriptTag {
    Signature = 0,
    AllOf = 1,
    AnyOf = 2,
    AtLeast = 3,
    InvalidBefore = 4,
    InvalidAfter = 5,
}

impl ScriptTag {
    /// Convert to u8 for serialization.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from u8.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Signature),
            1 => Some(Self::AllOf),
            2 => Some(Self::AnyOf),
            3 => Some(Self::AtLeast),
            4 => Some(Self::InvalidBefore),
            5 => Some(Self::InvalidAfter),
            _ => None,
        }
    }

    /// Check if scripts with this tag carry child scripts.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::AllOf | Self::AnyOf | Self::AtLeast)
    }

    /// Check if this is a validity-interval bound.
    pub fn is_timelock(self) -> bool {
        matches!(self, Self::InvalidBefore | Self::InvalidAfter)
    }
}

/// A native script: exactly one of six cases, nested without bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeScript {
    /// Satisfied by a witness whose key hashes to `key_hash`.
    Signature { key_hash: KeyHash },

    /// Satisfied iff every child is satisfied.
    AllOf { scripts: Vec<NativeScript> },

    /// Satisfied iff at least one child is satisfied.
    AnyOf { scripts: Vec<NativeScript> },

    /// Satisfied iff at least `required` children are satisfied.
    ///
    /// `required <= scripts.len()` is not enforced here.
    AtLeast {
        required: u64,
        scripts: Vec<NativeScript>,
    },

    /// Satisfied only at or after `slot`.
    InvalidBefore { slot: u64 },

    /// Satisfied only before `slot`.
    InvalidAfter { slot: u64 },
}

impl NativeScript {
    pub fn signature(key_hash: impl Into<KeyHash>) -> Self {
        Self::Signature {
            key_hash: key_hash.into(),
        }
    }

    pub fn all(scripts: impl IntoIterator<Item = NativeScript>) -> Self {
        Self::AllOf {
            scripts: scripts.into_iter().collect(),
        }
    }

    pub fn any(scripts: impl IntoIterator<Item = NativeScript>) -> Self {
        Self::AnyOf {
            scripts: scripts.into_iter().collect(),
        }
    }

    pub fn at_least(required: u64, scripts: impl IntoIterator<Item = NativeScript>) -> Self {
        Self::AtLeast {
            required,
            scripts: scripts.into_iter().collect(),
        }
    }

    pub fn invalid_before(slot: u64) -> Self {
        Self::InvalidBefore { slot }
    }

    pub fn invalid_after(slot: u64) -> Self {
        Self::InvalidAfter { slot }
    }

    /// The discriminator of this script.
    pub fn tag(&self) -> ScriptTag {
        match self {
            Self::Signature { .. } => ScriptTag::Signature,
            Self::AllOf { .. } => ScriptTag::AllOf,
            Self::AnyOf { .. } => ScriptTag::AnyOf,
            Self::AtLeast { .. } => ScriptTag::AtLeast,
            Self::InvalidBefore { .. } => ScriptTag::InvalidBefore,
            Self::InvalidAfter { .. } => ScriptTag::InvalidAfter,
        }
    }

    /// Direct children, in order. Empty for leaf scripts.
    pub fn children(&self) -> &[NativeScript] {
        match self {
            Self::AllOf { scripts } | Self::AnyOf { scripts } | Self::AtLeast { scripts, .. } => {
                scripts
            }
            Self::Signature { .. } | Self::InvalidBefore { .. } | Self::InvalidAfter { .. } => &[],
        }
    }
}

impl NativeScript {
    /// Parse a ledger-shape JSON value.
    ///
    /// The key set of every object must be exactly one of `pubKeyHash`,
    /// `all`, `any`, `n` with `k`, `invalidBefore` or `invalidAfter`.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let obj = value.as_object().ok_or_else(|| {
            CoreError::MalformedScript(format!("expected a script object, got {value}"))
        })?;

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();

        match keys.as_slice() {
            ["pubKeyHash"] => Ok(Self::Signature {
                key_hash: key_hash_field(obj, "signature", "pubKeyHash")?,
            }),
            ["all"] => Ok(Self::AllOf {
                scripts: children_field(obj, "all", "all")?,
            }),
            ["any"] => Ok(Self::AnyOf {
                scripts: children_field(obj, "any", "any")?,
            }),
            ["k", "n"] => Ok(Self::AtLeast {
                required: u64_field(obj, "atLeast", "n")?,
                scripts: children_field(obj, "atLeast", "k")?,
            }),
            ["invalidBefore"] => Ok(Self::InvalidBefore {
                slot: u64_field(obj, "invalidBefore", "invalidBefore")?,
            }),
            ["invalidAfter"] => Ok(Self::InvalidAfter {
                slot: u64_field(obj, "invalidAfter", "invalidAfter")?,
            }),
            other => Err(CoreError::MalformedScript(format!(
                "unrecognized script keys {other:?}"
            ))),
        }
    }

    /// Render in the ledger JSON shape.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Signature { key_hash } => json!({ "pubKeyHash": key_hash.to_hex() }),
            Self::AllOf { scripts } => json!({ "all": children_json(scripts) }),
            Self::AnyOf { scripts } => json!({ "any": children_json(scripts) }),
            Self::AtLeast { required, scripts } => {
                json!({ "n": required, "k": children_json(scripts) })
            }
            Self::InvalidBefore { slot } => json!({ "invalidBefore": slot }),
            Self::InvalidAfter { slot } => json!({ "invalidAfter": slot }),
        }
    }
}

fn children_field(
    obj: &Map<String, Value>,
    kind: &str,
    name: &str,
) -> Result<Vec<NativeScript>, CoreError> {
    array_field(obj, kind, name)?
        .iter()
        .map(NativeScript::from_json)
        .collect()
}

fn children_json(scripts: &[NativeScript]) -> Vec<Value> {
    scripts.iter().map(NativeScript::to_json).collect()
}

impl Serialize for NativeScript {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NativeScript {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        NativeScript::from_json(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kh(b: u8) -> KeyHash {
        KeyHash::from_bytes([b; 28])
    }

    #[test]
    fn test_tag_roundtrip() {
        for v in 0u8..=5 {
            let tag = ScriptTag::from_u8(v).unwrap();
            assert_eq!(tag.to_u8(), v);
        }
        assert_eq!(ScriptTag::from_u8(6), None);
    }

    #[test]
    fn test_tag_categories() {
        assert!(ScriptTag::AtLeast.is_composite());
        assert!(!ScriptTag::Signature.is_composite());
        assert!(ScriptTag::InvalidAfter.is_timelock());
        assert!(!ScriptTag::AnyOf.is_timelock());
    }

    #[test]
    fn test_constructors_match_variants() {
        assert_eq!(NativeScript::signature(kh(1)).tag(), ScriptTag::Signature);
        assert_eq!(NativeScript::all([]).tag(), ScriptTag::AllOf);
        assert_eq!(NativeScript::any([]).tag(), ScriptTag::AnyOf);
        assert_eq!(NativeScript::at_least(0, []).tag(), ScriptTag::AtLeast);
        assert_eq!(NativeScript::invalid_before(1).tag(), ScriptTag::InvalidBefore);
        assert_eq!(NativeScript::invalid_after(1).tag(), ScriptTag::InvalidAfter);
    }

    #[test]
    fn test_children_preserve_order() {
        let script = NativeScript::at_least(
            1,
            [NativeScript::signature(kh(2)), NativeScript::signature(kh(1))],
        );
        let children = script.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], NativeScript::signature(kh(2)));
        assert!(NativeScript::invalid_after(3).children().is_empty());
    }

    #[test]
    fn test_ledger_json_shape() {
        let script = NativeScript::all([
            NativeScript::signature(kh(0x11)),
            NativeScript::at_least(1, [NativeScript::invalid_before(10)]),
            NativeScript::any([NativeScript::invalid_after(20)]),
        ]);

        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(
            value,
            json!({
                "all": [
                    { "pubKeyHash": "11".repeat(28) },
                    { "n": 1, "k": [ { "invalidBefore": 10 } ] },
                    { "any": [ { "invalidAfter": 20 } ] },
                ]
            })
        );

        let back: NativeScript = serde_json::from_value(value).unwrap();
        assert_eq!(back, script);
    }

    #[test]
    fn test_ledger_json_rejects_unknown_shape() {
        let result = serde_json::from_value::<NativeScript>(json!({ "threshold": 2 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_ledger_json_rejects_mixed_keys() {
        let cases = [
            json!({ "pubKeyHash": "11".repeat(28), "all": [] }),
            json!({ "invalidBefore": 1, "invalidAfter": 2 }),
            json!({ "n": 1, "k": [], "any": [] }),
            json!({ "all": [], "note": "extra" }),
            json!({ "n": 1 }),
            json!({}),
        ];
        for case in cases {
            let err = NativeScript::from_json(&case).unwrap_err();
            assert!(matches!(err, CoreError::MalformedScript(_)), "{case}");
            assert!(serde_json::from_value::<NativeScript>(case).is_err());
        }
    }

    #[test]
    fn test_ledger_json_rejects_mixed_keys_when_nested() {
        let value = json!({ "any": [ { "invalidAfter": 5, "pubKeyHash": "22".repeat(28) } ] });
        assert!(matches!(
            NativeScript::from_json(&value),
            Err(CoreError::MalformedScript(_))
        ));
    }

    #[test]
    fn test_ledger_json_field_errors() {
        assert!(matches!(
            NativeScript::from_json(&json!({ "pubKeyHash": "abcd" })),
            Err(CoreError::InvalidKeyHash(_))
        ));
        assert!(matches!(
            NativeScript::from_json(&json!({ "invalidBefore": -1 })),
            Err(CoreError::MalformedScript(_))
        ));
        assert!(matches!(
            NativeScript::from_json(&json!({ "n": 1, "k": {} })),
            Err(CoreError::MalformedScript(_))
        ));
        assert!(matches!(
            NativeScript::from_json(&json!([])),
            Err(CoreError::MalformedScript(_))
        ));
    }

    #[test]
    fn test_to_json_matches_serialize() {
        let script = NativeScript::at_least(2, [NativeScript::signature(kh(3))]);
        assert_eq!(serde_json::to_value(&script).unwrap(), script.to_json());
        assert_eq!(NativeScript::from_json(&script.to_json()).unwrap(), script);
    }
}
