//! Golden vectors and end-to-end scenarios for policy ids.
//!
//! Every implementation deriving policy ids for native scripts must produce
//! identical:
//! - canonical CBOR bytes
//! - policy id (Blake2b-224 over `0x00 || cbor`)

use native_policy::core::{policy_preimage, script_to_cbor_value, CborValue};
use native_policy::{
    Blake2b224, CoreError, Digest28, KeyHash, NativeScript, PolicyError, PolicyScript,
};
use native_policy_testkit::fixtures::{cli_json, key_hash, multisig, timelocked_multisig};
use native_policy_testkit::vectors::all_vectors;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn sig(byte: u8) -> NativeScript {
    NativeScript::signature(key_hash(byte))
}

#[test]
fn golden_vectors_match() {
    init_tracing();

    for vector in all_vectors() {
        let policy = PolicyScript::new(vector.script.clone());
        assert_eq!(
            policy.cbor_hex(),
            vector.expected_cbor,
            "vector '{}' produced different cbor",
            vector.name
        );
        assert_eq!(
            policy.policy_id().to_hex(),
            vector.expected_policy_id,
            "vector '{}' produced different policy id",
            vector.name
        );
    }
}

#[test]
fn golden_vectors_survive_cli_conversion() {
    for vector in all_vectors() {
        let policy = PolicyScript::from_legacy_json(&cli_json(&vector.script)).unwrap();
        assert_eq!(policy.policy_id().to_hex(), vector.expected_policy_id);
    }
}

#[test]
fn golden_vectors_survive_cbor_decoding() {
    for vector in all_vectors() {
        let bytes = hex::decode(vector.expected_cbor).unwrap();
        let policy = PolicyScript::from_cbor(&bytes).unwrap();
        assert_eq!(policy.script(), &vector.script);
        assert_eq!(policy.policy_id().to_hex(), vector.expected_policy_id);
    }
}

#[test]
fn signature_scenario() {
    let script = NativeScript::signature(KeyHash::from_bytes([0; 28]));
    let policy = PolicyScript::new(script.clone());

    assert_eq!(
        script_to_cbor_value(&script),
        CborValue::Array(vec![
            CborValue::Integer(0.into()),
            CborValue::Bytes(vec![0; 28]),
        ])
    );
    assert_eq!(
        policy.policy_id().0,
        Blake2b224.digest28(&policy_preimage(policy.cbor()))
    );
}

#[test]
fn swapped_children_scenario() {
    let ab = PolicyScript::new(NativeScript::all([sig(0xa), sig(0xb)]));
    let ba = PolicyScript::new(NativeScript::all([sig(0xb), sig(0xa)]));

    assert_ne!(ab.cbor(), ba.cbor());
    assert_ne!(ab.policy_id(), ba.policy_id());
}

#[test]
fn threshold_scenario() {
    let script = NativeScript::at_least(2, [sig(0xa), sig(0xb), sig(0xc)]);
    let value = script_to_cbor_value(&script);

    let CborValue::Array(items) = value else {
        panic!("expected array");
    };
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], CborValue::Integer(3.into()));
    assert_eq!(items[1], CborValue::Integer(2.into()));
    assert_eq!(
        items[2],
        CborValue::Array(vec![
            script_to_cbor_value(&sig(0xa)),
            script_to_cbor_value(&sig(0xb)),
            script_to_cbor_value(&sig(0xc)),
        ])
    );
}

#[test]
fn legacy_after_scenario() {
    let policy = PolicyScript::from_legacy_json(&json!({ "type": "after", "slot": 1000 })).unwrap();
    assert_eq!(policy.script(), &NativeScript::InvalidBefore { slot: 1000 });
    assert_eq!(policy.cbor_hex(), "82041903e8");
}

#[test]
fn legacy_unknown_scenario() {
    let err = PolicyScript::from_legacy_json(&json!({ "type": "unknown" })).unwrap_err();
    assert!(matches!(
        err,
        PolicyError::Script(CoreError::UnsupportedScriptType(_))
    ));
    assert!(err.to_string().contains("unsupported script type"));
}

#[test]
fn cli_file_shape() {
    // The shape produced by CLI tooling for a 2-of-3 multisig with an expiry.
    let text = format!(
        r#"{{
            "type": "all",
            "scripts": [
                {{
                    "type": "atLeast",
                    "required": 2,
                    "scripts": [
                        {{ "type": "sig", "keyHash": "{a}" }},
                        {{ "type": "sig", "keyHash": "{b}" }},
                        {{ "type": "sig", "keyHash": "{c}" }}
                    ]
                }},
                {{ "type": "after", "slot": 100 }},
                {{ "type": "before", "slot": 200 }}
            ]
        }}"#,
        a = key_hash(1).to_hex(),
        b = key_hash(2).to_hex(),
        c = key_hash(3).to_hex(),
    );

    let policy = PolicyScript::from_legacy_str(&text).unwrap();
    assert_eq!(policy.script(), &timelocked_multisig(2, 3, 100, 200));
}

#[test]
fn ledger_json_and_cli_json_agree() {
    let script = multisig(2, 3);
    let from_ledger = PolicyScript::from_script_str(&policy_json(&script)).unwrap();
    let from_cli = PolicyScript::from_legacy_json(&cli_json(&script)).unwrap();
    assert_eq!(from_ledger.policy_id(), from_cli.policy_id());
}

fn policy_json(script: &NativeScript) -> String {
    PolicyScript::new(script.clone()).script_json().to_string()
}
