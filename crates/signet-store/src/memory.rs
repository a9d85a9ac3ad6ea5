//! In-memory implementations of the store traits.
//!
//! Primarily for testing. Same semantics as a persistent backend but
//! everything lives in memory and is lost on drop.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use signet_core::{DocumentFingerprint, Identity};

use crate::error::{Result, StoreError};
use crate::record::{DeliveryStatus, DocumentRecord, RecipientKeyRecord};
use crate::traits::{BlobStore, RecordStore};

/// In-memory record store. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Recipient records indexed by (fingerprint, recipient).
    records: HashMap<(DocumentFingerprint, Identity), RecipientKeyRecord>,

    /// Document records indexed by fingerprint.
    documents: HashMap<DocumentFingerprint, DocumentRecord>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                records: HashMap::new(),
                documents: HashMap::new(),
            }),
        }
    }

    /// Number of recipient records held.
    pub fn record_count(&self) -> usize {
        self.inner.read().unwrap().records.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_record(&self, record: &RecipientKeyRecord) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.records.insert(
            (record.fingerprint, record.recipient.clone()),
            record.clone(),
        );
        Ok(())
    }

    async fn get_record(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
    ) -> Result<Option<RecipientKeyRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .records
            .get(&(*fingerprint, recipient.clone()))
            .cloned())
    }

    async fn records_for_document(
        &self,
        fingerprint: &DocumentFingerprint,
    ) -> Result<Vec<RecipientKeyRecord>> {
        let inner = self.inner.read().unwrap();
        let mut records: Vec<RecipientKeyRecord> = inner
            .records
            .values()
            .filter(|r| r.fingerprint == *fingerprint)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.recipient.cmp(&b.recipient));
        Ok(records)
    }

    async fn records_for_recipient(
        &self,
        recipient: &Identity,
    ) -> Result<Vec<RecipientKeyRecord>> {
        let inner = self.inner.read().unwrap();
        let mut records: Vec<RecipientKeyRecord> = inner
            .records
            .values()
            .filter(|r| r.recipient == *recipient)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }

    async fn update_status(
        &self,
        fingerprint: &DocumentFingerprint,
        recipient: &Identity,
        status: DeliveryStatus,
    ) -> Result<RecipientKeyRecord> {
        let mut inner = self.inner.write().unwrap();
        let record = inner
            .records
            .get_mut(&(*fingerprint, recipient.clone()))
            .ok_or_else(|| {
                StoreError::NotFound(format!("record {}/{}", fingerprint, recipient))
            })?;

        record.advance(status)?;
        Ok(record.clone())
    }

    async fn put_document(&self, record: &DocumentRecord) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.documents.insert(record.fingerprint, record.clone());
        Ok(())
    }

    async fn get_document(
        &self,
        fingerprint: &DocumentFingerprint,
    ) -> Result<Option<DocumentRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.documents.get(fingerprint).cloned())
    }
}

/// In-memory blob store. Handles are content-addressed.
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create a new empty blob store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put_blob(&self, bytes: &[u8]) -> Result<String> {
        let handle = format!("mem://{}", DocumentFingerprint::digest(bytes).to_hex());
        let mut blobs = self.blobs.write().unwrap();
        blobs.insert(handle.clone(), bytes.to_vec());
        Ok(handle)
    }

    async fn get_blob(&self, handle: &str) -> Result<Vec<u8>> {
        let blobs = self.blobs.read().unwrap();
        blobs
            .get(handle)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("blob {}", handle)))
    }
}
