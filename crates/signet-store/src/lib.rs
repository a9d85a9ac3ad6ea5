//! # Signet Store
//!
//! Record model and storage abstraction for key distribution.
//!
//! ## Key Concepts
//!
//! - [`RecipientKeyRecord`]: one per (document, recipient) pair, holding the
//!   access condition, the recipient's wrapped key, and a delivery status
//! - [`DeliveryStatus`]: `Pending -> KeyProvided -> Ready -> Signed`,
//!   forward-only
//! - [`RecordStore`] / [`BlobStore`]: async persistence contracts; the
//!   in-memory implementations serve tests, production backends live in the
//!   hosting application

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::{MemoryBlobStore, MemoryStore};
pub use record::{DeliveryStatus, DocumentRecord, RecipientKeyRecord};
pub use traits::{BlobStore, RecordStore};
