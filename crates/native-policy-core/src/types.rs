//! Strong type definitions for native policy scripts.
//!
//! Key hashes and policy ids are both 28-byte values; they are distinct
//! newtypes so one can never be passed where the other is expected.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::crypto::Digest28;

/// Length in bytes of key hashes and policy ids.
pub const HASH28_LEN: usize = 28;

/// Prefix byte prepended to canonical script bytes before hashing.
///
/// Reserved for the native-script namespace of policy ids.
pub const POLICY_ID_PREFIX: u8 = 0x00;

/// A 28-byte hash of a verification key, as required by a `Signature` script.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyHash(pub [u8; HASH28_LEN]);

impl KeyHash {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; HASH28_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; HASH28_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != HASH28_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; HASH28_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for KeyHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH28_LEN]> for KeyHash {
    fn from(bytes: [u8; HASH28_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for KeyHash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; HASH28_LEN] = slice.try_into()?;
        Ok(Self(arr))
    }
}

impl Serialize for KeyHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for KeyHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyHash::from_hex(&s).map_err(de::Error::custom)
    }
}

/// A 28-byte policy identifier: `digest28(0x00 || canonical_script_bytes)`.
///
/// Two scripts with byte-identical canonical encodings have the same PolicyId.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolicyId(pub [u8; HASH28_LEN]);

impl PolicyId {
    /// Derive the policy id of already-encoded canonical script bytes.
    pub fn derive<D: Digest28 + ?Sized>(canonical: &[u8], digest: &D) -> Self {
        Self(digest.digest28(&policy_preimage(canonical)))
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; HASH28_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; HASH28_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != HASH28_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; HASH28_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PolicyId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH28_LEN]> for PolicyId {
    fn from(bytes: [u8; HASH28_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for PolicyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PolicyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PolicyId::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Build the hash preimage for a policy id: `0x00 || canonical`.
pub fn policy_preimage(canonical: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + canonical.len());
    buf.push(POLICY_ID_PREFIX);
    buf.extend_from_slice(canonical);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Blake2b224;

    #[test]
    fn test_key_hash_hex_roundtrip() {
        let kh = KeyHash::from_bytes([0x42; 28]);
        let hex = kh.to_hex();
        assert_eq!(hex.len(), 56);
        let recovered = KeyHash::from_hex(&hex).unwrap();
        assert_eq!(kh, recovered);
    }

    #[test]
    fn test_key_hash_rejects_wrong_length() {
        let short = hex::encode([0u8; 32]);
        assert!(KeyHash::from_hex(&short).is_err());
        assert!(KeyHash::from_hex("zz").is_err());
    }

    #[test]
    fn test_key_hash_serde_is_hex_string() {
        let kh = KeyHash::from_bytes([0xab; 28]);
        let json = serde_json::to_string(&kh).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(28)));
        let back: KeyHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kh);
    }

    #[test]
    fn test_policy_id_debug() {
        let id = PolicyId::from_bytes([0xcd; 28]);
        let debug = format!("{:?}", id);
        assert_eq!(debug, "PolicyId(cdcdcdcdcdcdcdcd)");
    }

    #[test]
    fn test_preimage_has_zero_prefix() {
        let preimage = policy_preimage(&[0x82, 0x04, 0x01]);
        assert_eq!(preimage, vec![0x00, 0x82, 0x04, 0x01]);
    }

    #[test]
    fn test_policy_id_derive_hashes_preimage() {
        let bytes = [0x82, 0x04, 0x01];
        let id = PolicyId::derive(&bytes, &Blake2b224);
        let manual = Blake2b224.digest28(&policy_preimage(&bytes));
        assert_eq!(id.0, manual);
        assert_ne!(id.0, Blake2b224.digest28(&bytes));
    }
}
