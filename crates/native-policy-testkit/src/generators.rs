//! Proptest generators for property-based testing.

use proptest::prelude::*;

use native_policy_core::{KeyHash, LegacyScript, NativeScript};

/// Generate a random KeyHash.
pub fn key_hash() -> impl Strategy<Value = KeyHash> {
    any::<[u8; 28]>().prop_map(KeyHash::from_bytes)
}

/// Generate a slot number across all integer widths.
pub fn slot() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..24, 24u64..=0xffff_ffff, any::<u64>()]
}

/// Generate a threshold, sometimes larger than the child count.
pub fn required() -> impl Strategy<Value = u64> {
    0u64..6
}

/// Generate a native script tree.
pub fn native_script() -> impl Strategy<Value = NativeScript> {
    let leaf = prop_oneof![
        key_hash().prop_map(NativeScript::signature),
        slot().prop_map(NativeScript::invalid_before),
        slot().prop_map(NativeScript::invalid_after),
    ];

    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|scripts| NativeScript::AllOf { scripts }),
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|scripts| NativeScript::AnyOf { scripts }),
            (required(), prop::collection::vec(inner, 0..5))
                .prop_map(|(required, scripts)| NativeScript::AtLeast { required, scripts }),
        ]
    })
}

/// Generate a CLI-format script tree.
pub fn legacy_script() -> impl Strategy<Value = LegacyScript> {
    let leaf = prop_oneof![
        key_hash().prop_map(|key_hash| LegacyScript::Sig { key_hash }),
        slot().prop_map(|slot| LegacyScript::After { slot }),
        slot().prop_map(|slot| LegacyScript::Before { slot }),
    ];

    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|scripts| LegacyScript::All { scripts }),
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|scripts| LegacyScript::Any { scripts }),
            (required(), prop::collection::vec(inner, 0..5))
                .prop_map(|(required, scripts)| LegacyScript::AtLeast { required, scripts }),
        ]
    })
}

/// Generate two different scripts.
pub fn distinct_pair() -> impl Strategy<Value = (NativeScript, NativeScript)> {
    (native_script(), native_script()).prop_filter("scripts must differ", |(a, b)| a != b)
}
