//! X25519 key agreement for key wrapping.
//!
//! A sender wraps a secret for a recipient by combining an ephemeral X25519
//! key with the recipient's static public key; only the holder of the
//! matching static secret can recompute the shared key. No prior handshake
//! is needed.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use x25519_dalek::{EphemeralSecret, PublicKey, StaticSecret};

use signet_core::ContentKey;

use crate::error::{AccessError, Result};

/// Decode a 32-byte key from hex, tolerating a leading `0x`.
fn decode_key_hex(s: &str) -> Option<[u8; 32]> {
    let clean = s.strip_prefix("0x").unwrap_or(s);
    if clean.len() != 64 {
        return None;
    }
    let bytes = hex::decode(clean).ok()?;
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Some(arr)
}

/// An X25519 public key (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct X25519PublicKey(pub [u8; 32]);

impl X25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from hex, with or without a `0x` prefix.
    ///
    /// Anything other than exactly 64 hex characters after prefix stripping
    /// is rejected before any curve operation.
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_key_hex(s).map(Self).ok_or_else(|| {
            AccessError::InvalidPublicKey(format!(
                "expected 64 hex characters (optionally 0x-prefixed), got {}",
                s.strip_prefix("0x").unwrap_or(s).len()
            ))
        })
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to x25519-dalek PublicKey.
    pub fn to_dalek(&self) -> PublicKey {
        PublicKey::from(self.0)
    }
}

impl From<PublicKey> for X25519PublicKey {
    fn from(pk: PublicKey) -> Self {
        Self(*pk.as_bytes())
    }
}

/// An X25519 static secret key.
///
/// Key-agreement only; recipients hold one of these to unwrap keys wrapped
/// for them.
pub struct X25519StaticSecret(StaticSecret);

impl X25519StaticSecret {
    /// Generate a new random secret.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(StaticSecret::from(bytes))
    }

    /// Create from seed bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(StaticSecret::from(bytes))
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_key_hex(s)
            .map(|bytes| Self(StaticSecret::from(bytes)))
            .ok_or_else(|| {
                AccessError::InvalidSecretKey(
                    "expected 64 hex characters (optionally 0x-prefixed)".to_string(),
                )
            })
    }

    /// Derive the public key.
    pub fn public_key(&self) -> X25519PublicKey {
        X25519PublicKey::from(PublicKey::from(&self.0))
    }

    /// Perform key agreement with a peer's public key.
    pub fn diffie_hellman(&self, peer_public: &X25519PublicKey) -> SharedKey {
        let shared = self.0.diffie_hellman(&peer_public.to_dalek());
        SharedKey(*shared.as_bytes())
    }
}

impl fmt::Debug for X25519StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret material never appears in logs.
        write!(f, "X25519StaticSecret({:?})", self.public_key())
    }
}

/// A shared secret derived from X25519 key agreement.
#[derive(Clone)]
pub struct SharedKey([u8; 32]);

impl SharedKey {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derive a symmetric wrap key from this shared secret.
    ///
    /// Blake3 derive_key gives domain separation; the context binds the
    /// derived key to one recipient.
    pub fn derive_wrap_key(&self, context: &[u8]) -> ContentKey {
        let mut hasher = blake3::Hasher::new_derive_key("signet-keywrap-v1");
        hasher.update(&self.0);
        hasher.update(context);
        ContentKey::from_bytes(*hasher.finalize().as_bytes())
    }
}

/// Ephemeral key pair for one-time key agreement.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
    public: X25519PublicKey,
}

impl EphemeralKeyPair {
    /// Generate a new ephemeral key pair.
    pub fn generate() -> Self {
        let secret = EphemeralSecret::random_from_rng(rand::thread_rng());
        let public = X25519PublicKey::from(PublicKey::from(&secret));
        Self { secret, public }
    }

    /// Get the public key.
    pub fn public_key(&self) -> X25519PublicKey {
        self.public
    }

    /// Perform key agreement with a peer's public key.
    ///
    /// Consumes the ephemeral secret (can only be used once).
    pub fn diffie_hellman(self, peer_public: &X25519PublicKey) -> SharedKey {
        let shared = self.secret.diffie_hellman(&peer_public.to_dalek());
        SharedKey(*shared.as_bytes())
    }
}
