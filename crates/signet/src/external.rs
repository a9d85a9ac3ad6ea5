//! External collaborator interfaces.
//!
//! The hosting application supplies these; the coordinator takes them by
//! explicit injection rather than module-level singletons, so lifecycle
//! (connect/disconnect) stays with the host.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use signet_access::X25519PublicKey;
use signet_core::{DocumentFingerprint, Identity};

use crate::error::{CoordinatorError, Result};

/// Resolves an identity to its wrap public key.
///
/// Backed by a key directory, a wallet service, or similar. A miss is a
/// hard error: envelope creation must never proceed with a partial
/// recipient list.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Look up the public key for an identity.
    async fn resolve(&self, identity: &Identity) -> Result<X25519PublicKey>;
}

/// A map-backed resolver for tests and fixed deployments.
#[derive(Default)]
pub struct MapResolver {
    keys: HashMap<Identity, X25519PublicKey>,
}

impl MapResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key for an identity.
    pub fn insert(&mut self, identity: impl Into<Identity>, key: X25519PublicKey) {
        self.keys.insert(identity.into(), key);
    }

    /// Builder-style registration.
    pub fn with_key(mut self, identity: impl Into<Identity>, key: X25519PublicKey) -> Self {
        self.insert(identity, key);
        self
    }
}

#[async_trait]
impl IdentityResolver for MapResolver {
    async fn resolve(&self, identity: &Identity) -> Result<X25519PublicKey> {
        self.keys
            .get(identity)
            .copied()
            .ok_or_else(|| CoordinatorError::UnknownIdentity(identity.clone()))
    }
}

/// Time oracle returning unix seconds.
///
/// The deployment decides what "now" is; a blockchain host can answer with
/// block time for tamper resistance, anything else with the system clock.
pub trait Clock: Send + Sync {
    /// Current time as a unix timestamp in seconds.
    fn now(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_secs() as i64
    }
}

/// Read-only view of an on-chain signature registry.
///
/// The coordinator never submits transactions; confirming registration and
/// counting signatures is as far as it looks.
#[async_trait]
pub trait SignatureRegistry: Send + Sync {
    /// Whether a document fingerprint is registered.
    async fn is_registered(&self, fingerprint: &DocumentFingerprint) -> Result<bool>;

    /// Number of signatures recorded for a fingerprint.
    async fn signature_count(&self, fingerprint: &DocumentFingerprint) -> Result<u64>;
}
