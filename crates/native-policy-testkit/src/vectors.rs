//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the canonical CBOR and the Blake2b-224 policy id of a
//! script. Any implementation that derives policy ids for the same scripts
//! must reproduce these bytes exactly.

use serde::Serialize;

use native_policy::PolicyScript;
use native_policy_core::NativeScript;

use crate::fixtures::key_hash;

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The script, in ledger JSON shape when serialized.
    pub script: NativeScript,
    /// Expected canonical CBOR (hex).
    pub expected_cbor: &'static str,
    /// Expected policy id (hex).
    pub expected_policy_id: &'static str,
}

fn sig(byte: u8) -> NativeScript {
    NativeScript::signature(key_hash(byte))
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "signature with zero key hash",
            script: sig(0x00),
            expected_cbor: "8200581c00000000000000000000000000000000000000000000000000000000",
            expected_policy_id: "9dcfe5a661b6bc3af0999d06416d95842ba7c693dc0e246f5e0a5e33",
        },
        GoldenVector {
            name: "all of A, B",
            script: NativeScript::all([sig(0x11), sig(0x22)]),
            expected_cbor: "8201828200581c111111111111111111111111111111111111111111111111111111118200581c22222222222222222222222222222222222222222222222222222222",
            expected_policy_id: "6c81737a61d80ff7e74862f5fc6c4f984b5d6e5020038afb4dcdac82",
        },
        GoldenVector {
            name: "all of B, A",
            script: NativeScript::all([sig(0x22), sig(0x11)]),
            expected_cbor: "8201828200581c222222222222222222222222222222222222222222222222222222228200581c11111111111111111111111111111111111111111111111111111111",
            expected_policy_id: "1b1a4ffa1e8b2ef3d6d59597a730343ceb6ea764f3a90c44376c8603",
        },
        GoldenVector {
            name: "any of A, B",
            script: NativeScript::any([sig(0x11), sig(0x22)]),
            expected_cbor: "8202828200581c111111111111111111111111111111111111111111111111111111118200581c22222222222222222222222222222222222222222222222222222222",
            expected_policy_id: "254e553a131b6c13c02d1b4c849da6eb8803ce5984a1426827f21399",
        },
        GoldenVector {
            name: "2 of A, B, C",
            script: NativeScript::at_least(2, [sig(0x11), sig(0x22), sig(0x33)]),
            expected_cbor: "830302838200581c111111111111111111111111111111111111111111111111111111118200581c222222222222222222222222222222222222222222222222222222228200581c33333333333333333333333333333333333333333333333333333333",
            expected_policy_id: "492dbb553f43194ca4bce6297218119d9fb498c650ef7180c119b9ee",
        },
        GoldenVector {
            name: "invalid before slot 1000",
            script: NativeScript::invalid_before(1000),
            expected_cbor: "82041903e8",
            expected_policy_id: "592fb0f9d8ed15c06858118d134d5c4b7c77320507810fee9ac2ddf9",
        },
        GoldenVector {
            name: "invalid after slot 5000000",
            script: NativeScript::invalid_after(5_000_000),
            expected_cbor: "82051a004c4b40",
            expected_policy_id: "a18f847a798feae7c5a7af426a03d65e1f21158de5fe3602b1711dfc",
        },
        GoldenVector {
            name: "empty all",
            script: NativeScript::all([]),
            expected_cbor: "820180",
            expected_policy_id: "d441227553a0f1a965fee7d60a0f724b368dd1bddbc208730fccebcf",
        },
        GoldenVector {
            name: "1 of A, B until slot 2^32",
            script: NativeScript::all([
                NativeScript::at_least(1, [sig(0x11), sig(0x22)]),
                NativeScript::invalid_after(1 << 32),
            ]),
            expected_cbor: "820182830301828200581c111111111111111111111111111111111111111111111111111111118200581c2222222222222222222222222222222222222222222222222222222282051b0000000100000000",
            expected_policy_id: "5eb650a12cecf4a92c98503744027253fa2ff9d248dbb559b06f95d1",
        },
    ]
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, actual_policy_id_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .into_iter()
        .map(|v| {
            let policy = PolicyScript::new(v.script.clone());
            let id = policy.policy_id().to_hex();
            let matches = policy.cbor_hex() == v.expected_cbor && id == v.expected_policy_id;
            (v.name.to_string(), matches, id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, id) in verify_all_vectors() {
            assert!(matches, "vector '{}' produced policy id {}", name, id);
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        for (i, a) in vectors.iter().enumerate() {
            for b in &vectors[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_vectors_export_as_json() {
        let json = serde_json::to_value(all_vectors()).unwrap();
        let first = &json[0];
        assert_eq!(first["script"]["pubKeyHash"], "00".repeat(28));
        assert_eq!(first["expected_cbor"].as_str().unwrap().len(), 64);
    }
}
