//! Error types for policy construction.

use native_policy_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur while building a [`PolicyScript`](crate::PolicyScript).
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The script could not be read or converted.
    #[error("script error: {0}")]
    Script(#[from] CoreError),

    /// The script failed a check requested by the configuration.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The input was not JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;
