//! Per-document content keys.
//!
//! A content key is the random symmetric secret that directly encrypts a
//! document. It is generated once per document, travels as a 64-character
//! hex string, and is never persisted in plaintext.

use rand::RngCore;
use std::fmt;

use crate::error::{CoreError, Result};

/// Content key length in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// Content key length in hex characters.
pub const HEX_KEY_LENGTH: usize = 64;

/// A 256-bit symmetric content key.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentKey([u8; KEY_LENGTH]);

impl ContentKey {
    /// Generate a new random key from a cryptographically secure source.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; KEY_LENGTH];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LENGTH {
            return Err(CoreError::InvalidKeyLength {
                expected: KEY_LENGTH,
                got: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    /// Convert to hex string (the transit/storage representation).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string.
    ///
    /// The string must be exactly 64 hex characters; this is checked before
    /// any cryptographic work is attempted.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != HEX_KEY_LENGTH {
            return Err(CoreError::InvalidKeyFormat(format!(
                "expected {} hex characters, got {}",
                HEX_KEY_LENGTH,
                s.len()
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidKeyFormat(format!(
                "expected {} hex characters, got non-hex input",
                HEX_KEY_LENGTH
            )));
        }
        let bytes = hex::decode(s)
            .map_err(|e| CoreError::InvalidKeyFormat(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material never appears in logs.
        write!(f, "ContentKey(..)")
    }
}
