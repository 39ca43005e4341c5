//! 28-byte digest primitives used for policy ids.
//!
//! The digest is injected through [`Digest28`] so policy-id derivation does
//! not hard-wire a hash function. [`Blake2b224`] is what the ledger uses.

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};

use crate::types::HASH28_LEN;

/// A hash function producing exactly 28 bytes.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait Digest28 {
    fn digest28(&self, data: &[u8]) -> [u8; HASH28_LEN];
}

impl<D: Digest28 + ?Sized> Digest28 for &D {
    fn digest28(&self, data: &[u8]) -> [u8; HASH28_LEN] {
        (**self).digest28(data)
    }
}

/// Blake2b with a 224-bit output. Produces ledger-compatible policy ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2b224;

impl Digest28 for Blake2b224 {
    fn digest28(&self, data: &[u8]) -> [u8; HASH28_LEN] {
        let hash = Blake2b::<U28>::digest(data);
        let mut out = [0u8; HASH28_LEN];
        out.copy_from_slice(&hash);
        out
    }
}

/// The first 28 bytes of the Blake3 extendable output.
///
/// Not ledger-compatible. Useful for content addressing scripts outside the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Xof28;

impl Digest28 for Blake3Xof28 {
    fn digest28(&self, data: &[u8]) -> [u8; HASH28_LEN] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(data);
        let mut out = [0u8; HASH28_LEN];
        hasher.finalize_xof().fill(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake2b224_known_answer() {
        // blake2b-224 of the empty string
        let out = Blake2b224.digest28(b"");
        assert_eq!(
            hex::encode(out),
            "836cc68931c2e4e3e838602eca1902591d216837bafddfe6f0c8cb07"
        );
    }

    #[test]
    fn test_blake2b224_deterministic() {
        let h1 = Blake2b224.digest28(b"test data");
        let h2 = Blake2b224.digest28(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Blake2b224.digest28(b"different data"));
    }

    #[test]
    fn test_blake3_xof_is_prefix_of_full_hash() {
        let out = Blake3Xof28.digest28(b"test data");
        let full = blake3::hash(b"test data");
        assert_eq!(&out[..], &full.as_bytes()[..HASH28_LEN]);
    }

    #[test]
    fn test_digests_differ() {
        assert_ne!(Blake2b224.digest28(b"abc"), Blake3Xof28.digest28(b"abc"));
    }

    #[test]
    fn test_digest_through_reference() {
        let digest: &dyn Digest28 = &Blake2b224;
        assert_eq!(digest.digest28(b"x"), Blake2b224.digest28(b"x"));
    }
}
