//! # Signet Core
//!
//! Pure primitives for the signet envelope-encryption core: content keys,
//! authenticated payload encryption, and document fingerprints.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`ContentKey`] - The per-document symmetric secret
//! - [`EncryptedPayload`] - ChaCha20-Poly1305 sealed bytes with
//!   `nonce || ciphertext` framing
//! - [`DocumentFingerprint`] - Blake3 content address of a payload
//! - [`Identity`] - Normalized wallet-style identity string

pub mod cipher;
pub mod digest;
pub mod error;
pub mod key;
pub mod types;

pub use cipher::{EncryptedPayload, EncryptionNonce, NONCE_LENGTH};
pub use digest::DocumentFingerprint;
pub use error::{CoreError, Result};
pub use key::{ContentKey, HEX_KEY_LENGTH, KEY_LENGTH};
pub use types::Identity;
