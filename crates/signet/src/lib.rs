//! # Signet
//!
//! Envelope encryption and key distribution for multi-party document
//! signing. Confidentiality comes from key distribution, not server-side
//! access lists: a per-document content key encrypts the document once, and
//! each authorized party receives their own wrapped copy of that key,
//! gated by an identity/time access condition.
//!
//! ## Flow
//!
//! 1. A creator calls [`Coordinator::create_envelope`]: content key
//!    generation, payload encryption, fingerprinting, and per-recipient
//!    key wrapping, all-or-nothing.
//! 2. Recipients later call [`Coordinator::request_unwrap`]; the stored
//!    [`AccessCondition`] is evaluated against their identity and the time
//!    oracle, and on success they receive their [`WrappedKey`] to unwrap
//!    locally.
//! 3. Delivery progress per recipient moves through the monotonic
//!    [`DeliveryStatus`] machine: `pending -> key_provided -> ready ->
//!    signed`.
//!
//! ## Collaborators
//!
//! Storage, identity resolution, and time are injected via the
//! [`RecordStore`], [`IdentityResolver`], and [`Clock`] traits; the
//! coordinator owns no global state.

pub mod coordinator;
pub mod error;
pub mod external;

pub use coordinator::{Coordinator, Envelope};
pub use error::{CoordinatorError, Result};
pub use external::{Clock, IdentityResolver, MapResolver, SignatureRegistry, SystemClock};

// Re-export the crates the API surface is built from.
pub use signet_access::{
    AccessCondition, AccessError, WrappedKey, X25519PublicKey, X25519StaticSecret,
};
pub use signet_core::{
    ContentKey, CoreError, DocumentFingerprint, EncryptedPayload, Identity,
};
pub use signet_store::{
    BlobStore, DeliveryStatus, DocumentRecord, MemoryBlobStore, MemoryStore, RecipientKeyRecord,
    RecordStore, StoreError,
};
