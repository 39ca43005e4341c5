//! # Native Policy Testkit
//!
//! Testing utilities for native policy scripts.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Scripts with their expected CBOR and policy id
//! - **Generators**: Proptest strategies for script trees
//! - **Fixtures**: Key hashes, common policy shapes, and CLI JSON rendering
//!
//! ## Golden Vectors
//!
//! ```rust
//! use native_policy_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, policy_id) in verify_all_vectors() {
//!     assert!(ok, "{name}: {policy_id}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use native_policy::PolicyScript;
//! use native_policy_testkit::generators::native_script;
//!
//! proptest! {
//!     #[test]
//!     fn policy_id_is_deterministic(script in native_script()) {
//!         let a = PolicyScript::new(script.clone());
//!         let b = PolicyScript::new(script);
//!         prop_assert_eq!(a.policy_id(), b.policy_id());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{cli_json, key_hash, key_hashes, multisig, random_key_hash};
pub use generators::{legacy_script, native_script};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
