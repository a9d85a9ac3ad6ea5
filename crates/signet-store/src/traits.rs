//! Store traits: the abstract persistence contract for key distribution.
//!
//! These traits keep the coordinator storage-agnostic. The in-memory
//! implementations in this crate serve tests; production backends live in
//! the hosting application.

use async_trait::async_trait;

use signet_core::{DocumentFingerprint, Identity};

use crate::error::Result;
use crate::record::{DeliveryStatus, DocumentRecord, RecipientKeyRecord};

/// Async interface for recipient and document record persistence.
///
/// # Design Notes
///
/// - **Upsert semantics**: `put_record` inserts or replaces by
///   `(fingerprint, recipient)`.
/// - **Monotonic status**: `update_status` enforces forward-only
///   transitions and returns the updated record.
/// - **Synchronization**: implementations must be internally synchronized;
///   one store instance is shared across concurrent coordinator calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Recipient Key Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or replace a recipient record.
    async fn put_record(&self, record: &RecipientKeyRecord) -> Result<()>;

    /// Get the record for one (document, recipient) pair.
    async fn get_record(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
    ) -> Result<Option<RecipientKeyRecord>>;

    /// List all records for a document.
    async fn records_for_document(
        &self,
        fingerprint: &DocumentFingerprint,
    ) -> Result<Vec<RecipientKeyRecord>>;

    /// List all records for a recipient, across documents.
    async fn records_for_recipient(
        &self,
        recipient: &Identity,
    ) -> Result<Vec<RecipientKeyRecord>>;

    /// Advance a record's delivery status.
    ///
    /// Fails with `NotFound` if the record does not exist and
    /// `BackwardTransition` if the move is not forward.
    async fn update_status(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
        status: DeliveryStatus,
    ) -> Result<RecipientKeyRecord>;

    // ─────────────────────────────────────────────────────────────────────────
    // Document Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or replace a document record.
    async fn put_document(&self, record: &DocumentRecord) -> Result<()>;

    /// Get a document record by fingerprint.
    async fn get_document(
        &self,
        fingerprint: &DocumentFingerprint,
    ) -> Result<Option<DocumentRecord>>;
}

/// Blob storage for encrypted payload bytes.
///
/// Handles are opaque strings; the path scheme belongs to the
/// implementation. The coordinator only produces and consumes payload
/// bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes and return a retrieval handle.
    async fn put_blob(&self, bytes: &[u8]) -> Result<String>;

    /// Retrieve bytes by handle.
    async fn get_blob(&self, handle: &str) -> Result<Vec<u8>>;
}
