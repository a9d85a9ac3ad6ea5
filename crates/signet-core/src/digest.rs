//! Document fingerprints.
//!
//! A fingerprint is the Blake3 hash of the exact payload bytes at creation
//! time. It correlates a document across the creator's record and each
//! recipient's verification step, and binds key releases to byte content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte Blake3 document fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentFingerprint(pub [u8; 32]);

impl DocumentFingerprint {
    /// Compute the fingerprint of the given bytes.
    pub fn digest(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Check whether the given bytes hash to this fingerprint.
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::digest(data) == *self
    }

    /// The zero fingerprint (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for DocumentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for DocumentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for DocumentFingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for DocumentFingerprint {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let data = b"the agreement text";
        let f1 = DocumentFingerprint::digest(data);
        let f2 = DocumentFingerprint::digest(data);
        assert_eq!(f1, f2);

        let f3 = DocumentFingerprint::digest(b"a different agreement");
        assert_ne!(f1, f3);
    }

    #[test]
    fn test_hex_roundtrip() {
        let fp = DocumentFingerprint::digest(b"roundtrip");
        let hex = fp.to_hex();
        let recovered = DocumentFingerprint::from_hex(&hex).unwrap();
        assert_eq!(fp, recovered);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(DocumentFingerprint::from_hex("abcd").is_err());
    }

    #[test]
    fn test_matches() {
        let data = b"verify me";
        let fp = DocumentFingerprint::digest(data);
        assert!(fp.matches(data));
        assert!(!fp.matches(b"verify mE"));
    }

    #[test]
    fn test_debug_truncated() {
        let fp = DocumentFingerprint::from_bytes([0xcd; 32]);
        let debug = format!("{:?}", fp);
        assert!(debug.starts_with("Fingerprint("));
        assert_eq!(format!("{}", fp), "cdcdcdcdcdcdcdcd");
    }
}
