//! Strong type definitions shared across the signet crates.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet-style identity string, normalized to lowercase.
///
/// Identities are matched case-insensitively everywhere; normalizing at
/// construction keeps `Eq` and `Hash` consistent with that rule.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Identity(String);

impl Identity {
    /// Create an identity, trimming whitespace and lowercasing.
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the normalized identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identity string is empty.
    ///
    /// Empty identities cannot be built through the condition builders, but
    /// can arrive via deserialization and must be detectable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_normalizes_case() {
        let a = Identity::new("0xAbCdEf");
        let b = Identity::new("0xabcdef");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef");
    }

    #[test]
    fn test_identity_trims_whitespace() {
        let id = Identity::new("  0x1234  ");
        assert_eq!(id.as_str(), "0x1234");
    }

    #[test]
    fn test_identity_deserialize_normalizes() {
        let id: Identity = serde_json::from_str("\"0xABC\"").unwrap();
        assert_eq!(id.as_str(), "0xabc");
    }
}
