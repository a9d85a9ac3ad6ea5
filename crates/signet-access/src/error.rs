//! Error types for the access module.

use thiserror::Error;

/// Errors that can occur during wrapping or condition handling.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A condition was built from an empty identity list.
    #[error("a condition must authorize at least one identity")]
    EmptyCondition,

    /// A condition tree is structurally invalid.
    #[error("malformed access condition: {0}")]
    MalformedCondition(String),

    /// A public key is not a well-formed curve point encoding.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// A secret key encoding is invalid.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Wrapping a secret failed.
    #[error("key wrap failed: {0}")]
    WrapFailed(String),

    /// Unwrapping failed: authentication, framing, or encoding.
    #[error("key unwrap failed: {0}")]
    UnwrapFailed(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for access operations.
pub type Result<T> = std::result::Result<T, AccessError>;
