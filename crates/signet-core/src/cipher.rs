//! Authenticated symmetric encryption for document payloads.
//!
//! Payloads are sealed with ChaCha20-Poly1305 under a per-document
//! [`ContentKey`] and framed as `nonce (12 bytes) || ciphertext+tag` for
//! storage and transport.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::key::ContentKey;

/// Nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// A 96-bit nonce for ChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionNonce(pub [u8; NONCE_LENGTH]);

impl EncryptionNonce {
    /// Generate a new random nonce.
    ///
    /// A fresh nonce is drawn for every encryption call; a repeat under the
    /// same key would break confidentiality.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; NONCE_LENGTH];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_LENGTH] {
        &self.0
    }
}

/// An encrypted document payload.
///
/// Immutable once produced. The ciphertext includes the Poly1305
/// authentication tag; tampering is detected at decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// Nonce used for this encryption (unique per call).
    pub nonce: EncryptionNonce,

    /// The encrypted data, including the authentication tag.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Encrypt plaintext under the given content key with a fresh nonce.
    pub fn encrypt(plaintext: &[u8], key: &ContentKey) -> Result<Self> {
        let nonce = EncryptionNonce::generate();
        let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::EncryptionFailure(e.to_string()))?;

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| CoreError::EncryptionFailure(e.to_string()))?;

        Ok(Self { nonce, ciphertext })
    }

    /// Decrypt with the given content key.
    ///
    /// Fails with [`CoreError::IntegrityFailure`] if authentication fails,
    /// whether from a tampered ciphertext or the wrong key.
    pub fn decrypt(&self, key: &ContentKey) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| CoreError::EncryptionFailure(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(&self.nonce.0), self.ciphertext.as_slice())
            .map_err(|_| CoreError::IntegrityFailure)
    }

    /// Frame as `nonce || ciphertext` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(NONCE_LENGTH + self.ciphertext.len());
        buf.extend_from_slice(&self.nonce.0);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Parse the `nonce || ciphertext` framing.
    ///
    /// Any buffer shorter than the nonce is malformed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_LENGTH {
            return Err(CoreError::MalformedPayload {
                min: NONCE_LENGTH,
                got: bytes.len(),
            });
        }

        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(&bytes[..NONCE_LENGTH]);

        Ok(Self {
            nonce: EncryptionNonce(nonce),
            ciphertext: bytes[NONCE_LENGTH..].to_vec(),
        })
    }

    /// Get the size of the ciphertext.
    pub fn ciphertext_len(&self) -> usize {
        self.ciphertext.len()
    }
}
