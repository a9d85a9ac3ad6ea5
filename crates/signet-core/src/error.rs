//! Error types for the signet core.

use thiserror::Error;

/// Errors that can occur in core cryptographic operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Key string is not exactly 64 hex characters.
    #[error("invalid content key format: {0}")]
    InvalidKeyFormat(String),

    /// Key bytes are not exactly 32 bytes.
    #[error("invalid content key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// Payload buffer is shorter than the nonce prefix.
    #[error("malformed encrypted payload: {got} bytes is shorter than the {min}-byte nonce")]
    MalformedPayload { min: usize, got: usize },

    /// Authentication failed: ciphertext tampered or wrong key.
    #[error("payload authentication failed")]
    IntegrityFailure,

    /// Cipher construction or encryption failed.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
