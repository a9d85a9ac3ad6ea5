//! # Signet Access
//!
//! Key wrapping and access-condition evaluation.
//!
//! ## Encryption Model
//!
//! Document confidentiality uses a two-layer key model:
//!
//! 1. **Content Key**: a symmetric key (ChaCha20-Poly1305) encrypts the
//!    document payload once.
//! 2. **Wrapped Keys**: the content key is encrypted per recipient via
//!    ephemeral X25519 agreement, so adding a recipient never requires
//!    re-encrypting the document.
//!
//! ## Access Conditions
//!
//! Key release is gated by an [`AccessCondition`] tree over identity and
//! time predicates. Trees are built validated; evaluation distinguishes
//! "not authorized" (`Ok(false)`) from "broken tree" (an error).
//!
//! ## Usage
//!
//! ```rust
//! use signet_access::{AccessCondition, WrappedKey, X25519StaticSecret};
//! use signet_core::{ContentKey, Identity};
//!
//! let recipient = X25519StaticSecret::generate();
//!
//! // Wrap a content key for the recipient.
//! let content_key = ContentKey::generate();
//! let wrapped = WrappedKey::wrap(&recipient.public_key(), &content_key.to_hex()).unwrap();
//!
//! // Gate it on identity and expiry.
//! let condition = AccessCondition::identity("0xabc")
//!     .and(AccessCondition::valid_until(2_000_000_000));
//! assert!(condition.evaluate(&Identity::new("0xABC"), 1_900_000_000).unwrap());
//!
//! // The recipient recovers the key locally.
//! assert_eq!(wrapped.unwrap(&recipient).unwrap(), content_key.to_hex());
//! ```

pub mod condition;
pub mod crypto;
pub mod error;
pub mod wrap;

pub use condition::AccessCondition;
pub use crypto::{EphemeralKeyPair, SharedKey, X25519PublicKey, X25519StaticSecret};
pub use error::{AccessError, Result};
pub use wrap::WrappedKey;
