//! Error types for the coordinator.

use thiserror::Error;

use signet_access::AccessError;
use signet_core::{CoreError, DocumentFingerprint, Identity};
use signet_store::StoreError;

/// Errors that can occur during coordinator operations.
///
/// `AccessDenied` is the expected, benign outcome for an unauthorized
/// caller; every other variant means the request could not be processed.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Core cryptographic error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Wrapping or condition error.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Envelope creation was asked for zero recipients.
    #[error("an envelope must have at least one recipient")]
    NoRecipients,

    /// The resolver knows no public key for an identity.
    #[error("no public key known for identity {0}")]
    UnknownIdentity(Identity),

    /// No document exists with this fingerprint.
    #[error("no document with fingerprint {0}")]
    DocumentNotFound(DocumentFingerprint),

    /// No record exists for this (document, recipient) pair.
    #[error("no record for {recipient} on document {fingerprint}")]
    RecipientNotFound {
        fingerprint: DocumentFingerprint,
        recipient: Identity,
    },

    /// The stored condition evaluated false for the caller.
    #[error("access denied for {recipient} on document {fingerprint}")]
    AccessDenied {
        fingerprint: DocumentFingerprint,
        recipient: Identity,
    },

    /// The record exists but no wrapped key has been delivered yet.
    #[error("no wrapped key delivered yet for {recipient} on document {fingerprint}")]
    KeyNotDelivered {
        fingerprint: DocumentFingerprint,
        recipient: Identity,
    },

    /// Key delivery was requested before the recipient registered a key.
    #[error("no public key registered for {recipient} on document {fingerprint}")]
    KeyNotProvided {
        fingerprint: DocumentFingerprint,
        recipient: Identity,
    },

    /// A signature-registry backend reported a failure.
    #[error("registry error: {0}")]
    Registry(String),
}

/// Result type for coordinator operations.
pub type Result<T> = std::result::Result<T, CoordinatorError>;
