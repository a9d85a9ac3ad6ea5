//! The key-distribution coordinator.
//!
//! Orchestrates the full lifecycle of one document's key material: generate
//! the content key, encrypt the payload, wrap the key per recipient under an
//! identity-gated condition, track delivery status, and serve key-release
//! requests. The coordinator holds no recipient private keys; unwrapping is
//! always the recipient's local step.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use signet_access::{AccessCondition, WrappedKey, X25519PublicKey};
use signet_core::{ContentKey, DocumentFingerprint, EncryptedPayload, Identity};
use signet_store::{DeliveryStatus, DocumentRecord, RecipientKeyRecord, RecordStore};

use crate::error::{CoordinatorError, Result};
use crate::external::{Clock, IdentityResolver};

/// Everything produced by envelope creation.
///
/// The caller uploads `payload` bytes to blob storage and distributes the
/// wrapped keys; nothing here contains the plaintext content key.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The encrypted document.
    pub payload: EncryptedPayload,

    /// Fingerprint of the framed payload bytes.
    pub fingerprint: DocumentFingerprint,

    /// One wrapped content key per identity, the creator's included.
    pub wrapped_keys: HashMap<Identity, WrappedKey>,
}

/// The main coordinator struct.
///
/// Generic over its collaborators, which are injected at construction:
/// record persistence, identity-to-key resolution, and the time oracle.
pub struct Coordinator<S, R, C> {
    store: Arc<S>,
    resolver: R,
    clock: C,
}

impl<S: RecordStore, R: IdentityResolver, C: Clock> Coordinator<S, R, C> {
    /// Create a new coordinator.
    pub fn new(store: S, resolver: R, clock: C) -> Self {
        Self {
            store: Arc::new(store),
            resolver,
            clock,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Envelope Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an envelope: encrypt a document and wrap its content key for
    /// every recipient (and the creator).
    ///
    /// Each recipient's key is gated on their identity, AND-ed with a time
    /// bound when `expires_at` is given. The creator's own copy never
    /// expires.
    ///
    /// All-or-nothing: every identity is resolved and every wrap completes
    /// before the first record is persisted, so a failure for any one
    /// recipient leaves no partial envelope behind.
    pub async fn create_envelope(
        &self,
        creator: &Identity,
        plaintext: &[u8],
        recipients: &[Identity],
        expires_at: Option<i64>,
    ) -> Result<Envelope> {
        if recipients.is_empty() {
            return Err(CoordinatorError::NoRecipients);
        }

        // Resolve every public key up front; an unknown identity aborts the
        // whole envelope rather than locking out one invitee.
        let creator_key = self.resolver.resolve(creator).await?;
        let mut resolved = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let key = self.resolver.resolve(recipient).await?;
            resolved.push((recipient.clone(), key));
        }

        let content_key = ContentKey::generate();
        let payload = EncryptedPayload::encrypt(plaintext, &content_key)?;
        let fingerprint = DocumentFingerprint::digest(&payload.to_bytes());

        let now = self.clock.now();
        let key_hex = content_key.to_hex();

        let mut wrapped_keys = HashMap::with_capacity(resolved.len() + 1);
        let mut records = Vec::with_capacity(resolved.len() + 1);

        let creator_wrapped = WrappedKey::wrap(&creator_key, &key_hex)?;
        wrapped_keys.insert(creator.clone(), creator_wrapped.clone());
        records.push(
            RecipientKeyRecord::new(
                fingerprint,
                creator.clone(),
                AccessCondition::identity(creator.clone()),
                now,
            )
            .with_wrapped_key(creator_key, creator_wrapped),
        );

        for (recipient, public_key) in &resolved {
            let mut condition = AccessCondition::identity(recipient.clone());
            if let Some(expiry) = expires_at {
                condition = condition.and(AccessCondition::valid_until(expiry));
            }

            let wrapped = WrappedKey::wrap(public_key, &key_hex)?;
            wrapped_keys.insert(recipient.clone(), wrapped.clone());
            records.push(
                RecipientKeyRecord::new(fingerprint, recipient.clone(), condition, now)
                    .with_wrapped_key(*public_key, wrapped),
            );
        }

        for record in &records {
            self.store.put_record(record).await?;
        }
        self.store
            .put_document(&DocumentRecord::new(
                fingerprint,
                creator.clone(),
                recipients.to_vec(),
                now,
            ))
            .await?;

        debug!(
            document = %fingerprint,
            recipients = recipients.len(),
            "envelope created"
        );

        Ok(Envelope {
            payload,
            fingerprint,
            wrapped_keys,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key Release
    // ─────────────────────────────────────────────────────────────────────────

    /// Request release of a wrapped key.
    ///
    /// Evaluates the stored condition against the caller's identity and the
    /// current time. On success the *wrapped* key is returned; unwrapping is
    /// the caller's local step with their own secret.
    pub async fn request_unwrap(
        &self,
        fingerprint: &DocumentFingerprint,
        identity: &Identity,
    ) -> Result<WrappedKey> {
        let record = self
            .store
            .get_record(fingerprint, identity)
            .await?
            .ok_or_else(|| CoordinatorError::RecipientNotFound {
                fingerprint: *fingerprint,
                recipient: identity.clone(),
            })?;

        let authorized = record.condition.evaluate(identity, self.clock.now())?;
        if !authorized {
            warn!(document = %fingerprint, identity = %identity, "key release denied");
            return Err(CoordinatorError::AccessDenied {
                fingerprint: *fingerprint,
                recipient: identity.clone(),
            });
        }

        let wrapped = record
            .wrapped_key
            .ok_or_else(|| CoordinatorError::KeyNotDelivered {
                fingerprint: *fingerprint,
                recipient: identity.clone(),
            })?;

        debug!(document = %fingerprint, identity = %identity, "key released");
        Ok(wrapped)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Invitation Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Invite a recipient to an existing document without key material.
    ///
    /// The deferred flow: the invitee's public key is not known yet, so the
    /// record starts `Pending` and key delivery happens in later steps.
    pub async fn invite_recipient(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
        expires_at: Option<i64>,
    ) -> Result<RecipientKeyRecord> {
        let mut document = self
            .store
            .get_document(fingerprint)
            .await?
            .ok_or(CoordinatorError::DocumentNotFound(*fingerprint))?;

        let mut condition = AccessCondition::identity(recipient.clone());
        if let Some(expiry) = expires_at {
            condition = condition.and(AccessCondition::valid_until(expiry));
        }

        let record =
            RecipientKeyRecord::new(*fingerprint, recipient.clone(), condition, self.clock.now());
        self.store.put_record(&record).await?;

        if !document.recipients.contains(recipient) {
            document.recipients.push(recipient.clone());
            self.store.put_document(&document).await?;
        }

        debug!(document = %fingerprint, identity = %recipient, "recipient invited");
        Ok(record)
    }

    /// A recipient supplies their public key; the record advances to
    /// `KeyProvided`.
    pub async fn register_recipient_key(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
        public_key: X25519PublicKey,
    ) -> Result<RecipientKeyRecord> {
        let mut record = self
            .store
            .get_record(fingerprint, recipient)
            .await?
            .ok_or_else(|| CoordinatorError::RecipientNotFound {
                fingerprint: *fingerprint,
                recipient: recipient.clone(),
            })?;

        record.public_key = Some(public_key);
        record.advance(DeliveryStatus::KeyProvided)?;
        self.store.put_record(&record).await?;

        Ok(record)
    }

    /// The creator wraps the content key for a recipient who has registered
    /// a public key; the record advances to `Ready`.
    pub async fn deliver_wrapped_key(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
        content_key: &ContentKey,
    ) -> Result<RecipientKeyRecord> {
        let mut record = self
            .store
            .get_record(fingerprint, recipient)
            .await?
            .ok_or_else(|| CoordinatorError::RecipientNotFound {
                fingerprint: *fingerprint,
                recipient: recipient.clone(),
            })?;

        let public_key = record
            .public_key
            .ok_or_else(|| CoordinatorError::KeyNotProvided {
                fingerprint: *fingerprint,
                recipient: recipient.clone(),
            })?;

        let wrapped = WrappedKey::wrap(&public_key, &content_key.to_hex())?;
        record.wrapped_key = Some(wrapped);
        record.advance(DeliveryStatus::Ready)?;
        self.store.put_record(&record).await?;

        debug!(document = %fingerprint, identity = %recipient, "wrapped key delivered");
        Ok(record)
    }

    /// Record that a recipient has signed.
    pub async fn mark_signed(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
    ) -> Result<RecipientKeyRecord> {
        self.update_status(fingerprint, recipient, DeliveryStatus::Signed)
            .await
    }

    /// Advance a record's delivery status.
    ///
    /// The store validates that the transition is forward-only.
    pub async fn update_status(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
        status: DeliveryStatus,
    ) -> Result<RecipientKeyRecord> {
        Ok(self
            .store
            .update_status(fingerprint, recipient, status)
            .await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// List all recipient records for a document.
    pub async fn records_for_document(
        &self,
        fingerprint: &DocumentFingerprint,
    ) -> Result<Vec<RecipientKeyRecord>> {
        Ok(self.store.records_for_document(fingerprint).await?)
    }

    /// List a recipient's records across documents (their invitations).
    pub async fn records_for_recipient(
        &self,
        recipient: &Identity,
    ) -> Result<Vec<RecipientKeyRecord>> {
        Ok(self.store.records_for_recipient(recipient).await?)
    }

    /// Get the document record for a fingerprint.
    pub async fn document(
        &self,
        fingerprint: &DocumentFingerprint,
    ) -> Result<Option<DocumentRecord>> {
        Ok(self.store.get_document(fingerprint).await?)
    }

    /// Check payload bytes against a document fingerprint.
    pub fn verify_payload(&self, payload_bytes: &[u8], fingerprint: &DocumentFingerprint) -> bool {
        fingerprint.matches(payload_bytes)
    }
}
