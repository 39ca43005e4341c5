//! Optional structural checks for native scripts.
//!
//! Encoding never validates. These checks are for callers that want to
//! refuse scripts the ledger would never consider satisfiable by threshold.

use crate::error::ValidationError;
use crate::script::NativeScript;

/// Check that every `AtLeast` node asks for no more children than it has.
///
/// Walks the whole tree and reports the first offending node in pre-order.
pub fn validate_script(script: &NativeScript) -> Result<(), ValidationError> {
    match threshold_violations(script).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every `AtLeast` node whose threshold exceeds its child count, in pre-order.
pub fn threshold_violations(script: &NativeScript) -> Vec<ValidationError> {
    let mut found = Vec::new();
    collect_violations(script, &mut found);
    found
}

fn collect_violations(script: &NativeScript, found: &mut Vec<ValidationError>) {
    if let NativeScript::AtLeast { required, scripts } = script {
        if *required > scripts.len() as u64 {
            found.push(ValidationError::ThresholdExceedsScripts {
                required: *required,
                available: scripts.len(),
            });
        }
    }

    for child in script.children() {
        collect_violations(child, found);
    }
}
