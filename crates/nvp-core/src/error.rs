//! # Error Hierarchy
//!
//! Structured error types for the NVP request family, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation errors are raised synchronously while a request is being
//! constructed. Each variant names the NVP field key that failed and the
//! rule it violated, so a caller can point the user at the exact input to
//! correct without re-running the checks.

use thiserror::Error;

/// Top-level error type for the NVP request family.
#[derive(Error, Debug)]
pub enum NvpError {
    /// A request argument violated its field rule.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The transport collaborator failed to complete the call.
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for request construction.
///
/// Exactly one error is reported per construction attempt: the first rule
/// that fails, in the request type's declared field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("{field} cannot be null")]
    Missing {
        /// NVP key of the field.
        field: &'static str,
    },

    /// A field exceeds the maximum length accepted by the remote API.
    #[error("{field} cannot be longer than {max} characters (got {actual})")]
    TooLong {
        /// NVP key of the field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },

    /// A field does not match its required character pattern.
    #[error("{field} is not valid (expected {expected})")]
    Malformed {
        /// NVP key of the field.
        field: &'static str,
        /// Description of the accepted format.
        expected: &'static str,
    },

    /// A field is well-formed on its own but inconsistent with the request.
    #[error("{field} is not acceptable: {reason}")]
    Conflict {
        /// NVP key of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// The NVP field key the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::TooLong { field, .. }
            | Self::Malformed { field, .. }
            | Self::Conflict { field, .. } => *field,
        }
    }
}
