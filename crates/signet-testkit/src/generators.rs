//! Proptest generators for property-based testing.

use proptest::prelude::*;

use signet_access::{AccessCondition, X25519StaticSecret};
use signet_core::{ContentKey, DocumentFingerprint, Identity};

/// Generate a wallet-style identity.
pub fn identity() -> impl Strategy<Value = Identity> {
    "0x[0-9a-f]{6,40}".prop_map(|s| Identity::new(s))
}

/// Generate a random content key.
pub fn content_key() -> impl Strategy<Value = ContentKey> {
    any::<[u8; 32]>().prop_map(ContentKey::from_bytes)
}

/// Generate a random document fingerprint.
pub fn fingerprint() -> impl Strategy<Value = DocumentFingerprint> {
    any::<[u8; 32]>().prop_map(DocumentFingerprint::from_bytes)
}

/// Generate a deterministic X25519 static secret.
pub fn static_secret() -> impl Strategy<Value = X25519StaticSecret> {
    any::<[u8; 32]>().prop_map(X25519StaticSecret::from_bytes)
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX / 2
}

/// Generate an arbitrary well-formed condition tree.
pub fn condition() -> impl Strategy<Value = AccessCondition> {
    let leaf = prop_oneof![
        Just(AccessCondition::Anyone),
        identity().prop_map(AccessCondition::Identity),
        timestamp().prop_map(AccessCondition::ValidUntil),
    ];

    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner).prop_map(|(a, b)| a.or(b)),
        ]
    })
}
