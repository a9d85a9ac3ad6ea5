//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: deterministic signing parties,
//! a fixed clock, and a ready-made coordinator over the in-memory store.

use signet::{Clock, Coordinator, MapResolver, MemoryStore};
use signet_access::{X25519PublicKey, X25519StaticSecret};
use signet_core::Identity;

/// A signing party with a deterministic keypair.
pub struct Party {
    pub identity: Identity,
    pub secret: X25519StaticSecret,
}

impl Party {
    /// Create a party from a key seed.
    ///
    /// The identity is derived from the public key, wallet-style.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let secret = X25519StaticSecret::from_bytes(seed);
        let identity = Identity::new(format!(
            "0x{}",
            &hex::encode(secret.public_key().as_bytes())[..40]
        ));
        Self { identity, secret }
    }

    /// Get the party's wrap public key.
    pub fn public_key(&self) -> X25519PublicKey {
        self.secret.public_key()
    }
}

/// Create multiple parties with distinct deterministic seeds.
pub fn multi_party_fixtures(count: usize) -> Vec<Party> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0x51;
            Party::from_seed(seed)
        })
        .collect()
}

/// A clock frozen at a fixed instant.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Build a coordinator over the in-memory store with every given party
/// resolvable.
pub fn coordinator(
    parties: &[Party],
    now: i64,
) -> Coordinator<MemoryStore, MapResolver, FixedClock> {
    let mut resolver = MapResolver::new();
    for party in parties {
        resolver.insert(party.identity.clone(), party.public_key());
    }
    Coordinator::new(MemoryStore::new(), resolver, FixedClock(now))
}
