//! Recipient key records and the delivery state machine.
//!
//! One record exists per (document, recipient) pair. It carries the
//! recipient's access condition, their wrapped copy of the content key once
//! delivered, and a delivery status that only moves forward.

use serde::{Deserialize, Serialize};
use std::fmt;

use signet_access::{AccessCondition, WrappedKey, X25519PublicKey};
use signet_core::{DocumentFingerprint, Identity};

use crate::error::{Result, StoreError};

/// Delivery status of a recipient's key material.
///
/// `Pending -> KeyProvided -> Ready -> Signed`. The derived ordering is the
/// transition order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Invited; no key material exchanged yet.
    Pending,

    /// The recipient has supplied their public key.
    KeyProvided,

    /// The content key has been wrapped and delivered for this recipient.
    Ready,

    /// The recipient has signed the document.
    Signed,
}

impl DeliveryStatus {
    /// Whether a transition to `next` is allowed.
    ///
    /// Transitions are monotonic; re-asserting the current status is an
    /// idempotent no-op, going backward is not allowed.
    pub fn can_advance_to(self, next: DeliveryStatus) -> bool {
        next >= self
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::KeyProvided => "key_provided",
            DeliveryStatus::Ready => "ready",
            DeliveryStatus::Signed => "signed",
        };
        write!(f, "{}", s)
    }
}

/// Per-recipient key-delivery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientKeyRecord {
    /// The document this record belongs to.
    pub fingerprint: DocumentFingerprint,

    /// The invited recipient.
    pub recipient: Identity,

    /// Condition gating release of the wrapped key.
    pub condition: AccessCondition,

    /// Delivery status; the only field that mutates after creation.
    pub status: DeliveryStatus,

    /// The recipient's wrap key, once known.
    pub public_key: Option<X25519PublicKey>,

    /// The content key wrapped for this recipient, once delivered.
    pub wrapped_key: Option<WrappedKey>,

    /// Creation time (unix seconds).
    pub created_at: i64,
}

impl RecipientKeyRecord {
    /// Create a pending record with no key material yet.
    pub fn new(
        fingerprint: DocumentFingerprint,
        recipient: Identity,
        condition: AccessCondition,
        created_at: i64,
    ) -> Self {
        Self {
            fingerprint,
            recipient,
            condition,
            status: DeliveryStatus::Pending,
            public_key: None,
            wrapped_key: None,
            created_at,
        }
    }

    /// Attach key material at creation time (the upfront-wrap flow).
    pub fn with_wrapped_key(mut self, public_key: X25519PublicKey, wrapped: WrappedKey) -> Self {
        self.public_key = Some(public_key);
        self.wrapped_key = Some(wrapped);
        self
    }

    /// Advance the delivery status.
    ///
    /// Backward transitions are rejected; the record is unchanged on error.
    pub fn advance(&mut self, next: DeliveryStatus) -> Result<()> {
        if !self.status.can_advance_to(next) {
            return Err(StoreError::BackwardTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Per-document record correlating creator, recipients, and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Fingerprint of the encrypted payload bytes.
    pub fingerprint: DocumentFingerprint,

    /// The document creator.
    pub creator: Identity,

    /// All invited recipients.
    pub recipients: Vec<Identity>,

    /// Opaque blob-storage handle for the encrypted bytes, once uploaded.
    pub storage_handle: Option<String>,

    /// Creation time (unix seconds).
    pub created_at: i64,
}

impl DocumentRecord {
    /// Create a document record.
    pub fn new(
        fingerprint: DocumentFingerprint,
        creator: Identity,
        recipients: Vec<Identity>,
        created_at: i64,
    ) -> Self {
        Self {
            fingerprint,
            creator,
            recipients,
            storage_handle: None,
            created_at,
        }
    }

    /// Attach the blob-storage handle.
    pub fn with_storage_handle(mut self, handle: impl Into<String>) -> Self {
        self.storage_handle = Some(handle.into());
        self
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
