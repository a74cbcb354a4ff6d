//! # Account Identities
//!
//! The ledger never authenticates anyone. The environment (transaction
//! sequencer, test harness, whatever hosts the core) hands every operation
//! an already-authenticated caller identity, and the core only ever compares
//! it against stored identities. [`AccountId`] is therefore an opaque
//! string — by convention the bech32 address derived from the caller's
//! public key, but the ledger does not care.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NULL_IDENTITY;

/// An opaque account identity.
///
/// Equality is the only operation the core performs on identities. The
/// reserved all-zeros identity (see [`AccountId::null`]) can never receive
/// minted credits and can never hold a privileged role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wraps an environment-supplied identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the reserved null identity.
    pub fn null() -> Self {
        Self(NULL_IDENTITY.to_string())
    }

    /// Returns `true` if this is the null identity (or an empty string,
    /// which some callers use as a placeholder for "nobody").
    pub fn is_null(&self) -> bool {
        self.0.is_empty() || self.0 == NULL_IDENTITY
    }

    /// Borrows the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
