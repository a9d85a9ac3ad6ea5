//! Access conditions: boolean predicate trees gating key release.
//!
//! A condition is a tree of identity and time predicates under And/Or
//! combinators. Trees are immutable; combination produces a new tree.
//! Builders validate structure, so a malformed tree can only arrive via
//! deserialization of untrusted data, and evaluation reports it as an
//! error rather than a silent deny.

use serde::{Deserialize, Serialize};

use signet_core::Identity;

use crate::error::{AccessError, Result};

/// A node in an access-condition tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessCondition {
    /// Matches any identity. The degenerate "public document" case.
    Anyone,

    /// Matches exactly one identity, case-insensitively.
    Identity(Identity),

    /// Holds while the current time is at or before this unix timestamp
    /// (seconds).
    ValidUntil(i64),

    /// Both subtrees must hold.
    And(Box<AccessCondition>, Box<AccessCondition>),

    /// Either subtree suffices.
    Or(Box<AccessCondition>, Box<AccessCondition>),
}

impl AccessCondition {
    /// A condition matching a single identity.
    pub fn identity(id: impl Into<Identity>) -> Self {
        Self::Identity(id.into())
    }

    /// A condition matching any of the given identities.
    ///
    /// Builds a left-associative Or-chain; a single identity yields the
    /// bare leaf. An identity list authorizes exactly its members, so an
    /// empty list is an error rather than a match-nothing tree.
    pub fn any_of<I, T>(identities: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Identity>,
    {
        let mut leaves = identities
            .into_iter()
            .map(|id| Self::Identity(id.into()));

        let first = leaves.next().ok_or(AccessError::EmptyCondition)?;
        Ok(leaves.fold(first, |chain, leaf| chain.or(leaf)))
    }

    /// A condition holding until the given unix timestamp (inclusive).
    pub fn valid_until(expires_at: i64) -> Self {
        Self::ValidUntil(expires_at)
    }

    /// Require both this condition and another.
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Accept either this condition or another.
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Evaluate against an identity and the current time.
    ///
    /// Returns `Ok(false)` for a legitimately unauthorized identity and
    /// `Err(MalformedCondition)` for a structurally invalid tree; the two
    /// must never be conflated. `And` short-circuits on the first false,
    /// `Or` on the first true.
    pub fn evaluate(&self, identity: &Identity, now: i64) -> Result<bool> {
        match self {
            Self::Anyone => Ok(true),
            Self::Identity(id) => {
                if id.is_empty() {
                    return Err(AccessError::MalformedCondition(
                        "identity leaf is empty".to_string(),
                    ));
                }
                Ok(id == identity)
            }
            Self::ValidUntil(expires_at) => Ok(now <= *expires_at),
            Self::And(a, b) => Ok(a.evaluate(identity, now)? && b.evaluate(identity, now)?),
            Self::Or(a, b) => Ok(a.evaluate(identity, now)? || b.evaluate(identity, now)?),
        }
    }

    /// Check the whole tree for structural validity.
    ///
    /// Run this after deserializing a condition from storage; builders
    /// cannot produce an invalid tree.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Anyone | Self::ValidUntil(_) => Ok(()),
            Self::Identity(id) => {
                if id.is_empty() {
                    Err(AccessError::MalformedCondition(
                        "identity leaf is empty".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            Self::And(a, b) | Self::Or(a, b) => {
                a.validate()?;
                b.validate()
            }
        }
    }

    /// Whether the given identity appears in any identity leaf.
    ///
    /// A structural scan, not an evaluation: time bounds and `Anyone`
    /// leaves are ignored.
    pub fn names_identity(&self, identity: &Identity) -> bool {
        match self {
            Self::Anyone | Self::ValidUntil(_) => false,
            Self::Identity(id) => id == identity,
            Self::And(a, b) | Self::Or(a, b) => {
                a.names_identity(identity) || b.names_identity(identity)
            }
        }
    }
}
