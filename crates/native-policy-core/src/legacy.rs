//! The CLI ("legacy") script format and its conversion into [`NativeScript`].
//!
//! CLI tools describe scripts with a `type` discriminant:
//!
//! ```json
//! { "type": "atLeast", "required": 1, "scripts": [
//!     { "type": "sig", "keyHash": "..." },
//!     { "type": "after", "slot": 1000 }
//! ] }
//! ```
//!
//! Timelocks are named by direction: `after` becomes `InvalidBefore` and
//! `before` becomes `InvalidAfter`. The slot value is carried unchanged.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::json::{array_field, key_hash_field, u64_field};
use crate::script::NativeScript;
use crate::types::KeyHash;

/// Discriminant field name.
const TYPE_FIELD: &str = "type";

/// A script in CLI format. Input only; convert it with [`convert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum LegacyScript {
    #[serde(rename = "sig")]
    Sig {
        #[serde(rename = "keyHash")]
        key_hash: KeyHash,
    },
    #[serde(rename = "all")]
    All { scripts: Vec<LegacyScript> },
    #[serde(rename = "any")]
    Any { scripts: Vec<LegacyScript> },
    #[serde(rename = "atLeast")]
    AtLeast {
        required: u64,
        scripts: Vec<LegacyScript>,
    },
    #[serde(rename = "after")]
    After { slot: u64 },
    #[serde(rename = "before")]
    Before { slot: u64 },
}

impl LegacyScript {
    /// Parse a CLI-format JSON value.
    ///
    /// Fails with [`CoreError::UnsupportedScriptType`] when any node in the tree
    /// has no `type` or an unknown one, and with [`CoreError::MalformedScript`]
    /// or [`CoreError::InvalidKeyHash`] when a known type has bad fields.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let obj = value
            .as_object()
            .ok_or(CoreError::UnsupportedScriptType(None))?;

        let kind = match obj.get(TYPE_FIELD) {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(CoreError::UnsupportedScriptType(Some(other.to_string()))),
            None => return Err(CoreError::UnsupportedScriptType(None)),
        };

        match kind {
            "sig" => Ok(Self::Sig {
                key_hash: key_hash_field(obj, kind, "keyHash")?,
            }),
            "all" => Ok(Self::All {
                scripts: scripts_field(obj, kind)?,
            }),
            "any" => Ok(Self::Any {
                scripts: scripts_field(obj, kind)?,
            }),
            "atLeast" => Ok(Self::AtLeast {
                required: u64_field(obj, kind, "required")?,
                scripts: scripts_field(obj, kind)?,
            }),
            "after" => Ok(Self::After {
                slot: u64_field(obj, kind, "slot")?,
            }),
            "before" => Ok(Self::Before {
                slot: u64_field(obj, kind, "slot")?,
            }),
            other => Err(CoreError::UnsupportedScriptType(Some(other.to_string()))),
        }
    }
}

/// Reads through a buffered [`Value`]. Nesting depth is whatever `deserializer`
/// allows; use [`parse_json`](crate::json::parse_json) to read deep text.
impl<'de> Deserialize<'de> for LegacyScript {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        LegacyScript::from_json(&value).map_err(de::Error::custom)
    }
}

fn scripts_field(obj: &Map<String, Value>, kind: &str) -> Result<Vec<LegacyScript>, CoreError> {
    array_field(obj, kind, "scripts")?
        .iter()
        .map(LegacyScript::from_json)
        .collect()
}

/// Convert a CLI-format script into the canonical model.
pub fn convert(legacy: &LegacyScript) -> NativeScript {
    match legacy {
        LegacyScript::Sig { key_hash } => NativeScript::Signature {
            key_hash: *key_hash,
        },
        LegacyScript::All { scripts } => NativeScript::AllOf {
            scripts: scripts.iter().map(convert).collect(),
        },
        LegacyScript::Any { scripts } => NativeScript::AnyOf {
            scripts: scripts.iter().map(convert).collect(),
        },
        LegacyScript::AtLeast { required, scripts } => NativeScript::AtLeast {
            required: *required,
            scripts: scripts.iter().map(convert).collect(),
        },
        LegacyScript::After { slot } => NativeScript::InvalidBefore { slot: *slot },
        LegacyScript::Before { slot } => NativeScript::InvalidAfter { slot: *slot },
    }
}

/// Parse and convert a CLI-format JSON value in one step.
pub fn convert_json(value: &Value) -> Result<NativeScript, CoreError> {
    LegacyScript::from_json(value).map(|legacy| convert(&legacy))
}

impl From<&LegacyScript> for NativeScript {
    fn from(legacy: &LegacyScript) -> Self {
        convert(legacy)
    }
}

impl From<LegacyScript> for NativeScript {
    fn from(legacy: LegacyScript) -> Self {
        convert(&legacy)
    }
}
