//! Content-key wrapping.
//!
//! The per-document content key travels to each recipient as a WrappedKey:
//! the key's hex form encrypted under a wrap key derived from an ephemeral
//! X25519 agreement with that recipient's public key. One WrappedKey exists
//! per (document, recipient) pair.

use serde::{Deserialize, Serialize};

use signet_core::EncryptedPayload;

use crate::crypto::{EphemeralKeyPair, X25519PublicKey, X25519StaticSecret};
use crate::error::{AccessError, Result};

/// A secret encrypted for exactly one recipient.
///
/// Holds the sender's ephemeral public key and the sealed secret. The
/// recipient recomputes the shared key from their static secret and the
/// ephemeral public half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedKey {
    /// Ephemeral X25519 public key (sender's side of the agreement).
    pub ephemeral_public: X25519PublicKey,

    /// The secret, sealed under the derived wrap key.
    pub sealed: EncryptedPayload,
}

impl WrappedKey {
    /// Wrap a UTF-8 secret for a recipient.
    ///
    /// Anyone holding the recipient's public key can wrap; only the matching
    /// static secret can unwrap.
    pub fn wrap(recipient_public: &X25519PublicKey, secret: &str) -> Result<Self> {
        let ephemeral = EphemeralKeyPair::generate();
        let ephemeral_public = ephemeral.public_key();

        let shared = ephemeral.diffie_hellman(recipient_public);
        let wrap_key = shared.derive_wrap_key(recipient_public.as_bytes());

        let sealed = EncryptedPayload::encrypt(secret.as_bytes(), &wrap_key)
            .map_err(|e| AccessError::WrapFailed(e.to_string()))?;

        Ok(Self {
            ephemeral_public,
            sealed,
        })
    }

    /// Unwrap with the recipient's static secret.
    pub fn unwrap(&self, recipient_secret: &X25519StaticSecret) -> Result<String> {
        let shared = recipient_secret.diffie_hellman(&self.ephemeral_public);
        let wrap_key = shared.derive_wrap_key(recipient_secret.public_key().as_bytes());

        let plaintext = self
            .sealed
            .decrypt(&wrap_key)
            .map_err(|e| AccessError::UnwrapFailed(e.to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| AccessError::UnwrapFailed("secret is not valid UTF-8".to_string()))
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| AccessError::Serialization(e.to_string()))
    }

    /// The hex blob form used in transit and storage.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse the hex blob form.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| AccessError::Serialization(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}
