//! Error types for the Native Policy Core.

use thiserror::Error;

/// Core errors that can occur while reading or converting scripts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The legacy `type` discriminant is missing or not one of the known tags.
    #[error("unsupported script type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnsupportedScriptType(Option<String>),

    #[error("malformed script: {0}")]
    MalformedScript(String),

    #[error("invalid key hash: {0}")]
    InvalidKeyHash(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("script bytes are not in canonical form")]
    NonCanonical,
}

/// Validation errors for script structure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("atLeast requires {required} scripts but only {available} are present")]
    ThresholdExceedsScripts { required: u64, available: usize },
}
